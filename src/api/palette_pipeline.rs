//! Contains the [`PalettePipeline`] builder struct for the high level API.

use crate::{
    quantize::{run_palette, QuantizeOptions},
    ColorSlice, ImagePipeline, PaletteOutput, PaletteSize,
};

/// A builder struct to specify options to create a color palette for an image or slice of colors.
///
/// # Examples
/// ```
/// # use pnnquant::{PalettePipeline, QuantizeError};
/// # fn main() -> Result<(), QuantizeError> {
/// let pixels = vec![0xFF10_2030, 0xFF30_2010, 0x0000_0000, 0xFF10_2030];
///
/// let output = PalettePipeline::new(pixels.as_slice().try_into()?)
///     .palette_size(16)
///     .alpha_threshold(0x20)
///     .palette();
///
/// assert_eq!(output.palette.len(), 3);
/// assert_eq!(output.transparent_index, Some(0));
/// assert_eq!(output.image_type.mime(), "image/gif");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PalettePipeline<'a> {
    /// The input pixels.
    pub(crate) pixels: ColorSlice<'a>,
    /// The quantization options (dithering has no effect on the palette).
    pub(crate) options: QuantizeOptions,
}

impl<'a> PalettePipeline<'a> {
    /// Creates a new [`PalettePipeline`] with default options.
    #[must_use]
    pub fn new(pixels: ColorSlice<'a>) -> Self {
        Self {
            pixels,
            options: QuantizeOptions::default(),
        }
    }

    /// Sets the palette size which determines the (maximum) number of colors to have in the palette.
    ///
    /// The default palette size is `256`.
    #[must_use]
    pub fn palette_size(mut self, size: impl Into<PaletteSize>) -> Self {
        self.options.palette_size = size.into();
        self
    }

    /// Sets the alpha value at or below which pixels are treated as fully transparent.
    ///
    /// The default threshold is `15`.
    #[must_use]
    pub fn alpha_threshold(mut self, threshold: u8) -> Self {
        self.options.alpha_threshold = threshold;
        self
    }

    /// Sets the blend between plain RGB distance (`0.0`) and luma/chroma distance (`1.0`)
    /// used while merging colors. Values outside of `0.0..=1.0` are clamped.
    ///
    /// The default ratio is `0.5`.
    #[must_use]
    pub fn luma_chroma_ratio(mut self, ratio: f64) -> Self {
        self.options.luma_chroma_ratio = ratio;
        self
    }

    /// Runs the pipeline and returns the computed color palette.
    #[must_use]
    pub fn palette(&self) -> PaletteOutput {
        run_palette(&self.pixels, &self.options)
    }
}

impl<'a> From<ImagePipeline<'a>> for PalettePipeline<'a> {
    fn from(value: ImagePipeline<'a>) -> Self {
        let ImagePipeline { pixels, options, .. } = value;
        Self { pixels, options }
    }
}
