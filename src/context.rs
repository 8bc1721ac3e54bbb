//! The per-run quantization parameters.

use crate::{
    color::{alpha, ALPHA_WEIGHT, DEFAULT_TRANSPARENT_COLOR, LUMA_CHROMA},
    PaletteSize,
};

/// The default alpha value at or below which a pixel is treated as transparent.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 0xF;

/// The default blend between plain RGB distance and luma/chroma distance.
pub const DEFAULT_LUMA_CHROMA_RATIO: f64 = 0.5;

/// Alpha values at or above this are never counted as semi-transparent.
const SEMI_TRANSPARENT_LIMIT: u8 = 0xE0;

/// Perceptual weights for each channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ChannelWeights {
    /// Red weight.
    pub(crate) r: f64,
    /// Green weight.
    pub(crate) g: f64,
    /// Blue weight.
    pub(crate) b: f64,
    /// Alpha weight.
    pub(crate) a: f64,
}

impl ChannelWeights {
    /// Every channel weighted equally.
    pub(crate) const UNIFORM: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// The luma coefficients for color and the default alpha weight.
    pub(crate) const PERCEPTUAL: Self = Self {
        r: LUMA_CHROMA[0][0],
        g: LUMA_CHROMA[0][1],
        b: LUMA_CHROMA[0][2],
        a: ALPHA_WEIGHT,
    };

    /// Whether the green weight is still at least the luma coefficient,
    /// i.e., the weights were not lowered below the perceptual ones.
    pub(crate) fn green_at_least_luma(&self) -> bool {
        self.g >= LUMA_CHROMA[0][1]
    }
}

/// All state shared by the stages of one quantization run.
///
/// A new context is created for every run, so nothing leaks from a previous image.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuantizeContext {
    /// The requested number of palette colors.
    pub(crate) palette_size: PaletteSize,
    /// Pixels with an alpha at or below this are replaced by `transparent_color`.
    pub(crate) alpha_threshold: u8,
    /// The scan index of the last transparent pixel, if any.
    pub(crate) transparent_pixel: Option<usize>,
    /// Whether some pixel has an alpha between the threshold and nearly opaque.
    pub(crate) semi_transparency: bool,
    /// The color that stands in for every transparent pixel.
    pub(crate) transparent_color: u32,
    /// The perceptual channel weights.
    pub(crate) weights: ChannelWeights,
    /// The blend between plain RGB and luma/chroma distance in `0.0..=1.0`.
    pub(crate) ratio: f64,
}

impl QuantizeContext {
    /// Scans the alpha channel of `pixels` and derives the run parameters.
    pub(crate) fn new(pixels: &[u32], palette_size: PaletteSize, alpha_threshold: u8, ratio: f64) -> Self {
        let k = palette_size.into_inner();

        let mut transparent_pixel = None;
        let mut transparent_color = DEFAULT_TRANSPARENT_COLOR;
        let mut semi_transparency = false;

        for (i, &pixel) in pixels.iter().enumerate() {
            let a = alpha(pixel);
            if a <= alpha_threshold {
                transparent_pixel = Some(i);
                if a == 0 && k > 2 {
                    transparent_color = pixel;
                }
            } else if a < SEMI_TRANSPARENT_LIMIT {
                semi_transparency = true;
            }
        }

        let weights = if k <= 32 {
            ChannelWeights::UNIFORM
        } else {
            ChannelWeights::PERCEPTUAL
        };

        Self {
            palette_size,
            alpha_threshold,
            transparent_pixel,
            semi_transparency,
            transparent_color,
            weights,
            ratio: ratio.clamp(0.0, 1.0),
        }
    }

    /// Whether the image has at least one transparent pixel.
    pub(crate) fn has_transparency(&self) -> bool {
        self.transparent_pixel.is_some()
    }

    /// Replaces transparent pixels by the transparent color.
    #[inline]
    pub(crate) fn substitute(&self, pixel: u32) -> u32 {
        if alpha(pixel) <= self.alpha_threshold {
            self.transparent_color
        } else {
            pixel
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(pixels: &[u32], k: u32) -> QuantizeContext {
        QuantizeContext::new(
            pixels,
            PaletteSize::from_clamped(k),
            DEFAULT_ALPHA_THRESHOLD,
            DEFAULT_LUMA_CHROMA_RATIO,
        )
    }

    #[test]
    fn opaque_image() {
        let ctx = context(&[0xFF10_2030, 0xFFFF_FFFF], 256);
        assert!(!ctx.has_transparency());
        assert!(!ctx.semi_transparency);
        assert_eq!(ctx.transparent_color, DEFAULT_TRANSPARENT_COLOR);
        assert_eq!(ctx.weights, ChannelWeights::PERCEPTUAL);
    }

    #[test]
    fn picks_last_fully_transparent_pixel() {
        let ctx = context(&[0x0011_2233, 0xFF00_0000, 0x0044_5566, 0x0A00_0000], 256);
        assert_eq!(ctx.transparent_pixel, Some(3));
        assert_eq!(ctx.transparent_color, 0x0044_5566);
        assert!(!ctx.semi_transparency);
    }

    #[test]
    fn tiny_palettes_keep_default_transparent_color() {
        let ctx = context(&[0x0011_2233, 0xFF00_0000], 2);
        assert_eq!(ctx.transparent_pixel, Some(0));
        assert_eq!(ctx.transparent_color, DEFAULT_TRANSPARENT_COLOR);
        assert_eq!(ctx.weights, ChannelWeights::UNIFORM);
    }

    #[test]
    fn detects_semi_transparency() {
        assert!(context(&[0x8000_0000], 256).semi_transparency);
        assert!(!context(&[0xE000_0000], 256).semi_transparency);
        assert!(!context(&[0x0F00_0000], 256).semi_transparency);
        assert!(context(&[0x1000_0000], 256).semi_transparency);
    }

    #[test]
    fn substitutes_transparent_pixels() {
        let ctx = context(&[0x0012_3456], 256);
        assert_eq!(ctx.substitute(0x05FF_FFFF), 0x0012_3456);
        assert_eq!(ctx.substitute(0xFFFF_FFFF), 0xFFFF_FFFF);
    }
}
