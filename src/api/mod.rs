//! Contains the types and functions for the high level pipeline builder API.

mod image_pipeline;
mod palette_pipeline;

pub use image_pipeline::ImagePipeline;
pub use palette_pipeline::PalettePipeline;

#[cfg(feature = "image")]
use {crate::color::from_srgba, image::RgbaImage, palette::Srgba};

/// Packs the pixels of an [`RgbaImage`] into `0xAARRGGBB` values, in row-major order.
///
/// # Examples
/// ```no_run
/// # use pnnquant::{argb_pixels, ImagePipeline};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = image::open("some image")?.into_rgba8();
/// let pixels = argb_pixels(&img);
/// let pipeline = ImagePipeline::new(pixels.as_slice().try_into()?, img.width(), img.height())?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "image")]
#[must_use]
pub fn argb_pixels(image: &RgbaImage) -> Vec<u32> {
    image
        .pixels()
        .map(|pixel| {
            let [r, g, b, a] = pixel.0;
            from_srgba(Srgba::new(r, g, b, a))
        })
        .collect()
}

#[cfg(all(test, feature = "image"))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn packs_rgba_pixels() {
        let img = RgbaImage::from_vec(2, 1, vec![1, 2, 3, 4, 0xFF, 0, 0x80, 0xFF]).unwrap();
        assert_eq!(argb_pixels(&img), vec![0x0401_0203, 0xFFFF_0080]);
    }
}
