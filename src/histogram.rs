//! Buckets pixels into coarse color cells, producing the bins for clustering.

use crate::{
    color::{argb_index, channels},
    context::QuantizeContext,
};
use bitvec::vec::BitVec;

/// The number of possible histogram cells (every bucket key is 16 bits).
pub(crate) const HISTOGRAM_SIZE: usize = u16::MAX as usize + 1;

/// A cluster of pixels: its average color, its (possibly rescaled) pixel count,
/// and the bookkeeping used while merging bins.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Bin {
    /// Average alpha.
    pub(crate) a: f64,
    /// Average red.
    pub(crate) r: f64,
    /// Average green.
    pub(crate) g: f64,
    /// Average blue.
    pub(crate) b: f64,
    /// The number of pixels in the bin.
    pub(crate) count: f64,
    /// The next bin in the chain (`0` ends the chain).
    pub(crate) fw: u32,
    /// The previous bin in the chain.
    pub(crate) bk: u32,
    /// The current best merge partner.
    pub(crate) nn: u32,
    /// The cost of merging with `nn`.
    pub(crate) err: f32,
    /// When `err` was last computed.
    pub(crate) tm: u32,
    /// When this bin was last merged into, or [`DELETED`](crate::pnn::DELETED).
    pub(crate) mtm: u32,
}

/// The non-empty histogram cells of an image, in ascending bucket key order.
#[derive(Debug, Clone)]
pub(crate) struct Histogram {
    /// The non-empty bins holding average colors.
    bins: Vec<Bin>,
    /// The number of pixels that were added.
    total_count: u32,
}

impl Histogram {
    /// Builds the histogram of `pixels`.
    ///
    /// Transparent pixels are counted as the context's transparent color.
    pub(crate) fn new(pixels: &[u32], ctx: &QuantizeContext) -> Self {
        let semi = ctx.semi_transparency;
        let transparency = ctx.palette_size.into_inner() < 64 || ctx.has_transparency();

        let mut sums = vec![[0.0f64; 4]; HISTOGRAM_SIZE];
        let mut counts = vec![0u32; HISTOGRAM_SIZE];
        let mut occupied: BitVec = BitVec::repeat(false, HISTOGRAM_SIZE);

        for &pixel in pixels {
            let [a, r, g, b] = channels(ctx.substitute(pixel));
            let i = usize::from(argb_index(a, r, g, b, semi, transparency));

            let sum = &mut sums[i];
            sum[0] += f64::from(a);
            sum[1] += f64::from(r);
            sum[2] += f64::from(g);
            sum[3] += f64::from(b);
            counts[i] += 1;
            occupied.set(i, true);
        }

        let bins = occupied
            .iter_ones()
            .map(|i| {
                let count = f64::from(counts[i]);
                let [a, r, g, b] = sums[i].map(|s| s / count);
                Bin { a, r, g, b, count, ..Bin::default() }
            })
            .collect();

        #[allow(clippy::cast_possible_truncation)]
        let total_count = pixels.len() as u32;

        Self { bins, total_count }
    }

    /// The number of pixels that were bucketed.
    pub(crate) fn total_count(&self) -> u32 {
        self.total_count
    }

    /// The non-empty bins.
    #[cfg(test)]
    pub(crate) fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// The number of non-empty bins.
    pub(crate) fn len(&self) -> usize {
        self.bins.len()
    }

    /// Hands the bins over to the merge engine.
    pub(crate) fn into_bins(self) -> Vec<Bin> {
        self.bins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::DEFAULT_ALPHA_THRESHOLD, tests::*, PaletteSize};

    fn histogram(pixels: &[u32], k: u32) -> Histogram {
        let ctx = QuantizeContext::new(
            pixels,
            PaletteSize::from_clamped(k),
            DEFAULT_ALPHA_THRESHOLD,
            0.5,
        );
        Histogram::new(pixels, &ctx)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn total_of(hist: &Histogram) -> u32 {
        hist.bins().iter().map(|bin| bin.count as u32).sum()
    }

    #[test]
    fn empty_input() {
        let hist = histogram(&[], 256);
        assert_eq!(hist.len(), 0);
        assert_eq!(hist.total_count(), 0);
    }

    #[test]
    fn counts_sum_to_pixel_count() {
        for pixels in [test_pixels_opaque(4096), test_pixels_rgba(4096)] {
            for k in [2, 16, 64, 256] {
                let hist = histogram(&pixels, k);
                assert_eq!(hist.total_count(), 4096);
                assert_eq!(total_of(&hist), 4096);
            }
        }
    }

    #[test]
    fn exact_colors_keep_their_value() {
        let pixels = [0xFFFF_0000, 0xFF00_FF00, 0xFFFF_0000];
        let hist = histogram(&pixels, 256);
        assert_eq!(hist.len(), 2);

        let bins = hist.bins();
        // green sorts before red in the RGB565 key
        assert_eq!((bins[0].r, bins[0].g, bins[0].b, bins[0].count), (0.0, 255.0, 0.0, 1.0));
        assert_eq!((bins[1].r, bins[1].g, bins[1].b, bins[1].count), (255.0, 0.0, 0.0, 2.0));
    }

    #[test]
    fn transparent_pixels_share_one_bin() {
        let pixels = [0x0000_0000, 0x0712_3456, 0x00FF_FFFF, 0xFF80_8080];
        let hist = histogram(&pixels, 256);
        assert_eq!(hist.len(), 2);

        let transparent = hist.bins().iter().find(|bin| bin.a == 0.0).map(|bin| bin.count);
        assert_eq!(transparent, Some(3.0));
    }

    #[test]
    fn averages_within_a_cell() {
        // both colors fall into the same RGB565 cell
        let hist = histogram(&[0xFF00_0000, 0xFF06_0002], 256);
        assert_eq!(hist.len(), 1);
        let bin = hist.bins()[0];
        assert_eq!((bin.r, bin.g, bin.b), (3.0, 0.0, 1.0));
    }
}
