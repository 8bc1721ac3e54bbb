//! Contains the [`ImagePipeline`] builder struct for the high level API.

use crate::{
    quantize::{check_dimensions, run_indexed, QuantizeOptions},
    ColorSlice, PaletteOutput, PalettePipeline, PaletteSize, QuantizeError, QuantizeOutput,
};
#[cfg(feature = "image")]
use {crate::color::to_srgba, image::RgbaImage, palette::cast::IntoComponents};

/// A builder struct to specify options to create a quantized image or an indexed palette from an image.
///
/// # Examples
/// To start, create an [`ImagePipeline`] from packed `0xAARRGGBB` pixels and the image dimensions:
/// ```
/// # use pnnquant::{ImagePipeline, QuantizeError};
/// # fn main() -> Result<(), QuantizeError> {
/// let pixels = vec![0xFFFF_0000, 0xFF00_FF00, 0xFF00_FF00, 0xFFFF_0000];
/// let mut pipeline = ImagePipeline::new(pixels.as_slice().try_into()?, 2, 2)?;
/// # Ok(())
/// # }
/// ```
///
/// Then, you can change different options like the number of colors in the palette
/// or whether to dither:
/// ```
/// # use pnnquant::{ImagePipeline, QuantizeError};
/// # fn main() -> Result<(), QuantizeError> {
/// # let pixels = vec![0xFFFF_0000, 0xFF00_FF00, 0xFF00_FF00, 0xFFFF_0000];
/// # let mut pipeline = ImagePipeline::new(pixels.as_slice().try_into()?, 2, 2)?;
/// let pipeline = pipeline
///     .palette_size(2)
///     .dither(false)
///     .luma_chroma_ratio(0.25);
/// # Ok(())
/// # }
/// ```
///
/// Finally, run the pipeline:
/// ```
/// # use pnnquant::{ImagePipeline, QuantizeError};
/// # fn main() -> Result<(), QuantizeError> {
/// # let pixels = vec![0xFFFF_0000, 0xFF00_FF00, 0xFF00_FF00, 0xFFFF_0000];
/// # let mut pipeline = ImagePipeline::new(pixels.as_slice().try_into()?, 2, 2)?;
/// # pipeline.palette_size(2);
/// let output = pipeline.indexed_palette();
/// assert_eq!(output.pixels(), pixels);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct ImagePipeline<'a> {
    /// The input image as a flat slice of pixels.
    pub(crate) pixels: ColorSlice<'a>,
    /// The dimensions of the image.
    pub(crate) dimensions: (u32, u32),
    /// The quantization options.
    pub(crate) options: QuantizeOptions,
}

impl<'a> ImagePipeline<'a> {
    /// Creates a new [`ImagePipeline`] with default options.
    ///
    /// # Errors
    /// Returns an error if `width` or `height` is zero,
    /// or if the length of `pixels` is not equal to `width * height`.
    pub fn new(pixels: ColorSlice<'a>, width: u32, height: u32) -> Result<Self, QuantizeError> {
        check_dimensions(pixels.len(), width, height)?;
        Ok(Self {
            pixels,
            dimensions: (width, height),
            options: QuantizeOptions::default(),
        })
    }

    /// Sets the palette size which determines the (maximum) number of colors to have in the palette.
    ///
    /// Palettes of more than `256` colors result in [`Indices::U16`](crate::Indices::U16).
    ///
    /// The default palette size is `256`.
    pub fn palette_size(&mut self, size: impl Into<PaletteSize>) -> &mut Self {
        self.options.palette_size = size.into();
        self
    }

    /// Sets whether or not to apply dithering to the image.
    ///
    /// Dithering uses serpentine Floyd–Steinberg error diffusion.
    /// Without dithering, each pixel alternates between its two closest palette colors
    /// depending on its position.
    ///
    /// The default value is `true`.
    pub fn dither(&mut self, dither: bool) -> &mut Self {
        self.options.dither = dither;
        self
    }

    /// Sets the alpha value at or below which pixels are treated as fully transparent.
    ///
    /// The default threshold is `15`.
    pub fn alpha_threshold(&mut self, threshold: u8) -> &mut Self {
        self.options.alpha_threshold = threshold;
        self
    }

    /// Sets the blend between plain RGB distance (`0.0`) and luma/chroma distance (`1.0`)
    /// used while merging colors. Values outside of `0.0..=1.0` are clamped.
    ///
    /// The default ratio is `0.5`.
    pub fn luma_chroma_ratio(&mut self, ratio: f64) -> &mut Self {
        self.options.luma_chroma_ratio = ratio;
        self
    }

    /// The dimensions of the image as `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// Runs the pipeline and returns the computed color palette.
    #[must_use]
    pub fn palette(&self) -> PaletteOutput {
        PalettePipeline::from(self.clone()).palette()
    }

    /// Runs the pipeline and returns the quantized image as a list of indices into a palette.
    #[must_use]
    pub fn indexed_palette(&self) -> QuantizeOutput {
        let (width, _) = self.dimensions;
        run_indexed(&self.pixels, width as usize, &self.options)
    }

    /// Runs the pipeline and returns the quantized image as packed `0xAARRGGBB` pixels.
    #[must_use]
    pub fn quantized_pixels(&self) -> Vec<u32> {
        self.indexed_palette().pixels()
    }
}

#[cfg(feature = "image")]
impl<'a> ImagePipeline<'a> {
    /// Runs the pipeline and returns the quantized image.
    #[must_use]
    pub fn quantized_rgbaimage(&self) -> RgbaImage {
        let (width, height) = self.dimensions;
        let QuantizeOutput { palette, indices, .. } = self.indexed_palette();

        let palette = palette.into_iter().map(to_srgba).collect::<Vec<_>>();
        let buf = indices
            .iter()
            .map(|i| palette[i])
            .collect::<Vec<_>>()
            .into_components();

        #[allow(clippy::expect_used)]
        {
            // indices.len() will be equal to width * height,
            // so buf should be large enough by nature of its construction
            RgbaImage::from_vec(width, height, buf).expect("large enough buffer")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{tests::*, ImageType, Indices};

    #[test]
    fn rejects_bad_dimensions() {
        let pixels = test_pixels_opaque(6);
        let colors = ColorSlice::from_truncated(&pixels);
        assert_eq!(ImagePipeline::new(colors, 0, 6).unwrap_err(), QuantizeError::ZeroDimension);
        assert_eq!(
            ImagePipeline::new(colors, 4, 2).unwrap_err(),
            QuantizeError::DimensionMismatch { len: 6, width: 4, height: 2 }
        );
        assert_eq!(ImagePipeline::new(colors, 3, 2).unwrap().dimensions(), (3, 2));
    }

    #[test]
    fn palette_matches_palette_pipeline() {
        let pixels = test_pixels_rgba(32 * 32);
        let colors = ColorSlice::from_truncated(&pixels);
        let mut pipeline = ImagePipeline::new(colors, 32, 32).unwrap();
        pipeline.palette_size(48).alpha_threshold(0).luma_chroma_ratio(0.8);

        let expected = PalettePipeline::new(colors)
            .palette_size(48)
            .alpha_threshold(0)
            .luma_chroma_ratio(0.8)
            .palette();

        assert_eq!(pipeline.palette(), expected);
        assert_eq!(pipeline.indexed_palette().palette, expected.palette);
    }

    #[test]
    fn quantized_pixels_come_from_the_palette() {
        let pixels = test_pixels_opaque(40 * 25);
        let mut pipeline = ImagePipeline::new(ColorSlice::from_truncated(&pixels), 40, 25).unwrap();

        for dither in [false, true] {
            pipeline.palette_size(PaletteSize::from_clamped(300)).dither(dither);
            let output = pipeline.indexed_palette();
            assert!(matches!(output.indices, Indices::U16(_)));
            assert_eq!(output.image_type, ImageType::Png);

            let quantized = pipeline.quantized_pixels();
            assert_eq!(quantized.len(), pixels.len());
            assert!(quantized.iter().all(|c| output.palette.contains(c)));
        }
    }

    #[cfg(feature = "image")]
    #[test]
    fn rgba_image_round_trip() {
        let pixels = [0xFF00_0000, 0xFFFF_FFFF, 0x8040_2010, 0x0000_0000];
        let mut pipeline = ImagePipeline::new(ColorSlice::from_truncated(&pixels), 2, 2).unwrap();
        pipeline.palette_size(16);

        let img = pipeline.quantized_rgbaimage();
        assert_eq!((img.width(), img.height()), (2, 2));
        assert_eq!(crate::argb_pixels(&img), pipeline.quantized_pixels());
    }
}
