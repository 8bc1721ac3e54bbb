//! Maps every pixel of an image to a palette index, with or without dithering.

use crate::{
    color::{argb_index, channels, pack},
    histogram::HISTOGRAM_SIZE,
    search::PaletteSearch,
};
use std::{array, mem};

/// The number of entries per block of the lookup tables.
const BLOCK_SIZE: usize = 256;

/// The largest error a single pixel passes on, per channel.
const DITHER_MAX: i32 = 20;

/// Lookup tables for applying and limiting dither error.
struct DitherTables {
    /// Maps `value + 256` to `value` clamped to `0..=255`.
    clamp: [u8; 4 * BLOCK_SIZE],
    /// Maps `error + 256` to `error` clamped to `-DITHER_MAX..=DITHER_MAX`.
    limit: [i32; 2 * BLOCK_SIZE],
}

impl DitherTables {
    /// Builds both tables.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn new() -> Self {
        Self {
            clamp: array::from_fn(|i| i.saturating_sub(BLOCK_SIZE).min(255) as u8),
            limit: array::from_fn(|i| (i as i32 - BLOCK_SIZE as i32).clamp(-DITHER_MAX, DITHER_MAX)),
        }
    }

    /// Adds a sixteenth of the accumulated error `err` (rounded) to `c`, clamping the result.
    #[inline]
    #[allow(clippy::cast_sign_loss)]
    fn add_sixteenth(&self, err: i32, c: u8) -> u8 {
        self.clamp[((err + 0x1008) >> 4) as usize + usize::from(c)]
    }

    /// Adds a thirty-second of the accumulated error `err` (rounded) to `c`, clamping the result.
    #[inline]
    #[allow(clippy::cast_sign_loss)]
    fn add_thirty_second(&self, err: i32, c: u8) -> u8 {
        self.clamp[((err + 0x2010) >> 5) as usize + usize::from(c)]
    }

    /// Applies the accumulated error to a color.
    ///
    /// Without bias, every channel receives its full error.
    /// Otherwise, red and blue receive half of their error and alpha is left as is.
    #[inline]
    fn biased(&self, [a, r, g, b]: [u8; 4], err: [i32; 4], no_bias: bool) -> [u8; 4] {
        if no_bias {
            [
                self.add_sixteenth(err[0], a),
                self.add_sixteenth(err[1], r),
                self.add_sixteenth(err[2], g),
                self.add_sixteenth(err[3], b),
            ]
        } else {
            [
                a,
                self.add_thirty_second(err[1], r),
                self.add_sixteenth(err[2], g),
                self.add_thirty_second(err[3], b),
            ]
        }
    }

    /// Clamps the difference between a dithered channel and its palette channel.
    #[inline]
    #[allow(clippy::cast_sign_loss)]
    fn limit(&self, diff: i32) -> i32 {
        self.limit[(diff + BLOCK_SIZE as i32) as usize]
    }
}

/// Propagates, stores, and applies the dither error to the pixels.
///
/// Errors are stored in sixteenths. Both rows are indexed in scan order,
/// i.e., the next row is filled back to front, since it is scanned in the opposite direction.
struct ErrorBuf<'a> {
    /// The width of a row of pixels.
    width: usize,
    /// The propagated error for the current row of pixels.
    this_err: &'a mut [[i32; 4]],
    /// The propagated error for the next row of pixels.
    next_err: &'a mut [[i32; 4]],
}

impl<'a> ErrorBuf<'a> {
    /// Create the backing buffer for a new `ErrorBuf`.
    fn new_buf(width: usize) -> Vec<[i32; 4]> {
        vec![[0; 4]; 2 * (width + 2)]
    }

    /// Create a new `ErrorBuf` using the given `buf`
    fn new(width: usize, buf: &'a mut [[i32; 4]]) -> Self {
        let (this_err, next_err) = buf.split_at_mut(width + 2);
        Self { width, this_err, next_err }
    }

    /// The accumulated error for the `j`-th pixel in scan order.
    #[inline]
    fn error(&self, j: usize) -> [i32; 4] {
        self.this_err[j + 1]
    }

    /// Propagate error using Floyd–Steinberg weights from the `j`-th pixel in scan order.
    #[inline]
    fn propagate(&mut self, j: usize, err: [i32; 4]) {
        let below = self.width - j;
        for (c, &e) in err.iter().enumerate() {
            self.next_err[below - 1][c] = e;
            self.next_err[below + 1][c] += 3 * e;
            self.next_err[below][c] += 5 * e;
            self.this_err[j + 2][c] += 7 * e;
        }
    }

    /// Swap the error buffers and reset the start of the new next row.
    #[inline]
    fn next_row(&mut self) {
        mem::swap(&mut self.this_err, &mut self.next_err);
        self.next_err[self.width] = [0; 4];
    }
}

/// The state of one dithering pass.
struct Ditherer<'s, 'a> {
    /// The palette and its search caches.
    search: &'s mut PaletteSearch<'a>,
    /// The error lookup tables.
    tables: DitherTables,
    /// Palette index plus one for each dithered color bucket (`0` if not yet computed).
    lookup: Vec<u32>,
    /// Whether every channel receives its full error and results are cached per bucket.
    no_bias: bool,
}

impl<'s, 'a> Ditherer<'s, 'a> {
    /// Prepares a pass over the palette of `search`.
    fn new(search: &'s mut PaletteSearch<'a>) -> Self {
        let ctx = search.context();
        let no_bias = ctx.semi_transparency || ctx.palette_size.into_inner() < 64;
        Self {
            search,
            tables: DitherTables::new(),
            lookup: if no_bias { vec![0; HISTOGRAM_SIZE] } else { Vec::new() },
            no_bias,
        }
    }

    /// Picks the palette index for the dithered `pixel`.
    ///
    /// Fully transparent pixels map to slot `0`.
    fn index(&mut self, pixel: u32, dithered: [u8; 4], pos: usize) -> u16 {
        let transparent = channels(pixel)[0] == 0;

        if self.no_bias {
            let ctx = self.search.context();
            let [a, r, g, b] = dithered;
            let key = usize::from(argb_index(a, r, g, b, ctx.semi_transparency, ctx.has_transparency()));
            if self.lookup[key] == 0 {
                self.lookup[key] = if transparent {
                    1
                } else {
                    u32::from(self.search.nearest(pack(dithered), pos)) + 1
                };
            }
            #[allow(clippy::cast_possible_truncation)]
            {
                (self.lookup[key] - 1) as u16
            }
        } else if transparent {
            0
        } else {
            self.search.nearest(pack(dithered), pos)
        }
    }

    /// Dithers the `j`-th pixel in scan order of some row, returning its palette index.
    #[inline]
    fn dither_pixel(&mut self, pixel: u32, pos: usize, j: usize, error: &mut ErrorBuf) -> u16 {
        let dithered = self.tables.biased(channels(pixel), error.error(j), self.no_bias);
        let index = self.index(pixel, dithered, pos);

        let target = channels(self.search.palette()[usize::from(index)]);
        let err = array::from_fn(|c| self.tables.limit(i32::from(dithered[c]) - i32::from(target[c])));
        error.propagate(j, err);

        index
    }
}

/// Maps `pixels` to palette indices with serpentine error diffusion.
///
/// Even rows are scanned left to right, odd rows right to left.
/// Each pixel is looked up with [`PaletteSearch::nearest`] at position `row + j`,
/// where `j` is the pixel's index in scan order.
pub(crate) fn dither(pixels: &[u32], width: usize, search: &mut PaletteSearch) -> Vec<u16> {
    let mut indices = vec![0; pixels.len()];
    if width == 0 || search.palette().is_empty() {
        return indices;
    }

    let mut ditherer = Ditherer::new(search);
    let mut buf = ErrorBuf::new_buf(width);
    let mut error = ErrorBuf::new(width, &mut buf);

    for (row, (indices, pixels)) in indices
        .chunks_exact_mut(width)
        .zip(pixels.chunks_exact(width))
        .enumerate()
    {
        if row % 2 == 0 {
            for (j, (index, &pixel)) in indices.iter_mut().zip(pixels).enumerate() {
                *index = ditherer.dither_pixel(pixel, row + j, j, &mut error);
            }
        } else {
            for (j, (index, &pixel)) in indices.iter_mut().zip(pixels).rev().enumerate() {
                *index = ditherer.dither_pixel(pixel, row + j, j, &mut error);
            }
        }

        error.next_row();
    }

    indices
}

/// Maps `pixels` to palette indices with [`PaletteSearch::closest`], without dithering.
pub(crate) fn remap(pixels: &[u32], search: &mut PaletteSearch) -> Vec<u16> {
    pixels
        .iter()
        .enumerate()
        .map(|(i, &pixel)| search.closest(pixel, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::{OPAQUE_BLACK, OPAQUE_WHITE},
        context::{QuantizeContext, DEFAULT_ALPHA_THRESHOLD},
        tests::*,
        PaletteSize,
    };

    fn context(pixels: &[u32], k: u32) -> QuantizeContext {
        QuantizeContext::new(pixels, PaletteSize::from_clamped(k), DEFAULT_ALPHA_THRESHOLD, 0.5)
    }

    #[test]
    fn lookup_tables() {
        let tables = DitherTables::new();
        assert_eq!(tables.limit(-255), -DITHER_MAX);
        assert_eq!(tables.limit(-7), -7);
        assert_eq!(tables.limit(0), 0);
        assert_eq!(tables.limit(20), 20);
        assert_eq!(tables.limit(255), DITHER_MAX);

        assert_eq!(tables.add_sixteenth(0, 17), 17);
        assert_eq!(tables.add_sixteenth(16 * 20, 250), 255);
        assert_eq!(tables.add_sixteenth(-16 * 20, 5), 0);
        assert_eq!(tables.add_sixteenth(16 * 3 + 7, 100), 103);
        assert_eq!(tables.add_sixteenth(16 * 3 + 8, 100), 104);
        assert_eq!(tables.add_thirty_second(64, 100), 102);
    }

    #[test]
    fn error_weights() {
        let mut buf = ErrorBuf::new_buf(4);
        let mut error = ErrorBuf::new(4, &mut buf);
        error.propagate(0, [1, 2, 3, 4]);

        assert_eq!(error.this_err[2], [7, 14, 21, 28]);
        assert_eq!(error.next_err[3], [1, 2, 3, 4]);
        assert_eq!(error.next_err[4], [5, 10, 15, 20]);
        assert_eq!(error.next_err[5], [3, 6, 9, 12]);

        error.next_row();
        // the last pixel scanned in the reversed row lies below the first pixel of this row
        assert_eq!(error.error(3), [5, 10, 15, 20]);
        assert_eq!(error.next_err[4], [0; 4]);
    }

    #[test]
    fn exact_palette_colors_are_kept() {
        let palette = vec![OPAQUE_BLACK, 0xFF80_4020, OPAQUE_WHITE];
        let pixels = (0..64).map(|i| palette[i % 3]).collect::<Vec<_>>();

        for k in [16, 256] {
            let ctx = context(&pixels, k);
            let mut search = PaletteSearch::new(palette.clone(), &ctx);
            let dithered = dither(&pixels, 8, &mut search);
            let remapped = remap(&pixels, &mut search);

            let expected = (0..64).map(|i| (i % 3) as u16).collect::<Vec<_>>();
            assert_eq!(dithered, expected);
            assert_eq!(remapped, expected);
        }
    }

    #[test]
    fn transparent_pixels_map_to_slot_zero() {
        let pixels = (0..36)
            .map(|i| if i % 4 == 0 { 0x0000_0000 } else { 0xFF10_1010 })
            .collect::<Vec<_>>();

        for k in [16, 256] {
            let ctx = context(&pixels, k);
            let mut search = PaletteSearch::new(vec![0x0000_0000, OPAQUE_BLACK, OPAQUE_WHITE], &ctx);
            let indices = dither(&pixels, 6, &mut search);

            for (&pixel, &index) in pixels.iter().zip(&indices) {
                if pixel == 0 {
                    assert_eq!(index, 0);
                } else {
                    assert_ne!(index, 0);
                }
            }
        }
    }

    #[test]
    fn diffuses_error_across_flat_areas() {
        let pixels = vec![0xFF78_7878; 64];
        let ctx = context(&pixels, 2);
        let mut search = PaletteSearch::new(vec![OPAQUE_BLACK, OPAQUE_WHITE], &ctx);

        assert!(remap(&pixels, &mut search).iter().all(|&i| i == 0));

        let dithered = dither(&pixels, 8, &mut search);
        assert!(dithered.contains(&0));
        assert!(dithered.contains(&1));
    }

    #[test]
    fn dithering_is_deterministic() {
        let pixels = test_pixels_rgba(32 * 24);
        let palette = pixels[..40].to_vec();
        for k in [40, 200] {
            let ctx = context(&pixels, k);
            let run = || dither(&pixels, 32, &mut PaletteSearch::new(palette.clone(), &ctx));
            let indices = run();
            assert_eq!(indices, run());
            assert!(indices.iter().all(|&i| usize::from(i) < palette.len()));
        }
    }

    #[test]
    fn empty_inputs() {
        let ctx = context(&[], 16);
        assert!(dither(&[], 4, &mut PaletteSearch::new(vec![OPAQUE_BLACK], &ctx)).is_empty());
        assert_eq!(dither(&[OPAQUE_WHITE; 3], 3, &mut PaletteSearch::new(Vec::new(), &ctx)), vec![0; 3]);
        assert!(remap(&[], &mut PaletteSearch::new(vec![OPAQUE_BLACK], &ctx)).is_empty());
    }
}
