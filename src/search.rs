//! Maps pixels to palette indices.
//!
//! Two searches are provided:
//! - [`PaletteSearch::nearest`] always returns the single best palette entry
//!   and is used while dithering.
//! - [`PaletteSearch::closest`] tracks the two best entries for each color and alternates
//!   between them depending on the pixel position, spreading error without a dithering pass.
//!
//! Both searches are memoized per color. Since the caches are only valid for one palette,
//! every change to the palette goes through [`PaletteSearch`], which clears them.

use crate::{
    blue_noise::blue_noise,
    color::{channels, sqr, LUMA_CHROMA},
    context::QuantizeContext,
};
use std::collections::HashMap;

/// The blue noise value above which the luma coefficients replace the channel weights.
const LUMA_GATE: i8 = -88;

/// The initial error bound of the closest search, also marking an empty second-best slot.
const CLOSEST_UNSET: u32 = 0xFFFF;

/// The squared difference of two channel values.
#[inline]
fn sqr_diff(x: u8, y: u8) -> f64 {
    sqr(f64::from(x) - f64::from(y))
}

/// A palette together with the memoized results of searching it.
#[derive(Debug, Clone)]
pub(crate) struct PaletteSearch<'a> {
    /// The palette colors.
    palette: Vec<u32>,
    /// The run parameters.
    ctx: &'a QuantizeContext,
    /// Nearest search results per (substituted) color.
    nearest: HashMap<u32, u16>,
    /// Closest search results per color: `[best, second, best_err, second_err]`.
    closest: HashMap<u32, [u32; 4]>,
}

impl<'a> PaletteSearch<'a> {
    /// Creates a search over `palette` with empty caches.
    pub(crate) fn new(palette: Vec<u32>, ctx: &'a QuantizeContext) -> Self {
        Self {
            palette,
            ctx,
            nearest: HashMap::new(),
            closest: HashMap::new(),
        }
    }

    /// The run parameters.
    pub(crate) fn context(&self) -> &'a QuantizeContext {
        self.ctx
    }

    /// The palette being searched.
    pub(crate) fn palette(&self) -> &[u32] {
        &self.palette
    }

    /// Returns the palette.
    pub(crate) fn into_palette(self) -> Vec<u32> {
        self.palette
    }

    /// Empties both caches.
    pub(crate) fn clear(&mut self) {
        self.nearest.clear();
        self.closest.clear();
    }

    /// Overwrites the palette entry at `index`.
    pub(crate) fn set_entry(&mut self, index: u16, color: u32) {
        self.palette[usize::from(index)] = color;
        self.clear();
    }

    /// Swaps the palette entry at `index` with the entry in slot `0`.
    pub(crate) fn move_to_front(&mut self, index: u16) {
        self.palette.swap(0, usize::from(index));
        self.clear();
    }

    /// Returns the palette entry with the least weighted squared distance to `pixel`.
    ///
    /// Transparent pixels are looked up as the transparent color.
    /// When the image has transparency, opaque pixels never map to slot `0`
    /// (provided the palette has more than two entries).
    /// Ties go to the later entry. An empty palette yields `0`.
    pub(crate) fn nearest(&mut self, pixel: u32, pos: usize) -> u16 {
        let ctx = self.ctx;
        let pixel = ctx.substitute(pixel);
        if let Some(&k) = self.nearest.get(&pixel) {
            return k;
        }

        let [a, r, g, b] = channels(pixel);
        let len = self.palette.len();

        let mut k = usize::from(len > 2 && ctx.has_transparency() && a > ctx.alpha_threshold);

        let w = ctx.weights;
        let [pr, pg, pb] = if len > 2 && blue_noise(pos) > LUMA_GATE {
            LUMA_CHROMA[0]
        } else {
            [w.r, w.g, w.b]
        };

        let mut min = f64::INFINITY;
        for (i, &color) in self.palette.iter().enumerate().skip(k) {
            let [a2, r2, g2, b2] = channels(color);

            let mut dist = w.a * sqr_diff(a2, a);
            if dist > min {
                continue;
            }
            dist += pr * sqr_diff(r2, r);
            if dist > min {
                continue;
            }
            dist += pg * sqr_diff(g2, g);
            if dist > min {
                continue;
            }
            dist += pb * sqr_diff(b2, b);
            if dist > min {
                continue;
            }

            min = dist;
            k = i;
        }

        #[allow(clippy::cast_possible_truncation)]
        let k = k as u16;
        self.nearest.insert(pixel, k);
        k
    }

    /// Computes the two best palette entries for `pixel` as `[best, second, best_err, second_err]`.
    fn two_closest(&self, pixel: u32, pos: usize) -> [u32; 4] {
        let ctx = self.ctx;
        let [a, r, g, b] = channels(pixel);
        let mut closest = [0, 0, CLOSEST_UNSET, CLOSEST_UNSET];

        let w = ctx.weights;
        let [pr, pg, pb] = if blue_noise(pos) > LUMA_GATE {
            LUMA_CHROMA[0]
        } else {
            [w.r, w.g, w.b]
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        for (k, &color) in self.palette.iter().enumerate() {
            let [a2, r2, g2, b2] = channels(color);
            let bound = f64::from(closest[3]);

            let mut err = pr * sqr_diff(r2, r);
            if err >= bound {
                continue;
            }
            err += pg * sqr_diff(g2, g);
            if err >= bound {
                continue;
            }
            err += pb * sqr_diff(b2, b);
            if err >= bound {
                continue;
            }
            if ctx.semi_transparency {
                err += w.a * sqr_diff(a2, a);
            }

            if err < f64::from(closest[2]) {
                closest[1] = closest[0];
                closest[3] = closest[2];
                closest[0] = k as u32;
                closest[2] = err as u32;
            } else if err < bound {
                closest[1] = k as u32;
                closest[3] = err as u32;
            }
        }

        if closest[3] == CLOSEST_UNSET {
            closest[1] = closest[0];
        }

        closest
    }

    /// Returns one of the two best palette entries for `pixel`, alternating by position.
    ///
    /// The best entry is always chosen if it is much better than the second best.
    /// Falls back to [`PaletteSearch::nearest`] for transparent pixels,
    /// for errors of at least four times the palette length,
    /// and for exact matches in images with transparency.
    pub(crate) fn closest(&mut self, pixel: u32, pos: usize) -> u16 {
        let ctx = self.ctx;
        if channels(pixel)[0] <= ctx.alpha_threshold {
            return self.nearest(pixel, pos);
        }

        let closest = match self.closest.get(&pixel) {
            Some(&closest) => closest,
            None => {
                let closest = self.two_closest(pixel, pos);
                self.closest.insert(pixel, closest);
                closest
            }
        };

        #[allow(clippy::cast_possible_truncation)]
        let max_err = (self.palette.len() as u32) << 2;

        let mut idx = (pos + 1) % 2;
        if f64::from(closest[3]) * 0.67 < f64::from(closest[3]) - f64::from(closest[2]) {
            idx = 0;
        } else if closest[0] > closest[1] {
            idx = pos % 2;
        }

        let err = closest[idx + 2];
        if err >= max_err || (ctx.has_transparency() && err == 0) {
            self.nearest(pixel, pos)
        } else {
            #[allow(clippy::cast_possible_truncation)]
            {
                closest[idx] as u16
            }
        }
    }
}
