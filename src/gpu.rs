//! Remapping an image to a finished palette on a graphics device.
//!
//! Palette generation always runs on the CPU. Once a palette exists, the per-pixel lookup
//! can be done by a fragment pass on any renderer implementing the narrow [`Renderer`] trait:
//! the palette is uploaded as a small square texture, the image is rendered once into an
//! offscreen target, and the result is read back as RGBA bytes.
//!
//! The pass itself does no dithering: fully transparent pixels take palette slot `0`,
//! every other pixel takes the palette color with the least squared RGB distance.
//!
//! [`SoftwareRenderer`] implements the pass on the CPU, and serves as the reference
//! for what a device backend has to compute.
//!
//! # Examples
//! ```
//! # use pnnquant::{gpu::{GpuQuantizer, ImageTexture, SoftwareRenderer}, ColorSlice, QuantizeError};
//! # fn main() -> Result<(), QuantizeError> {
//! let pixels = vec![0xFF10_1010, 0xFFF0_F0F0];
//! let image = ImageTexture::new(ColorSlice::try_from(pixels.as_slice())?, 2, 1)?;
//!
//! let mut quantizer = GpuQuantizer::new(SoftwareRenderer::new());
//! let rgba = quantizer.quantize(&image, &[0xFF00_0000, 0xFFFF_FFFF]);
//! assert_eq!(rgba, vec![0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
//! # Ok(())
//! # }
//! ```

use crate::{color::to_srgba, quantize::check_dimensions, ColorSlice, QuantizeError};
use ordered_float::OrderedFloat;
use palette::cast::IntoComponents;

/// The most palette colors a pass considers.
pub const MAX_PASS_COLORS: usize = 256;

/// Pixels with a normalized alpha below this take palette slot `0`.
const ALPHA_CUTOFF: f32 = 0.1;

/// A palette laid out as a square RGBA texture, row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTexture {
    /// The width and height of the texture.
    side: u32,
    /// The number of palette colors.
    colors: u32,
    /// The texels as RGBA bytes. Texels past the last color are zero.
    data: Vec<u8>,
}

impl PaletteTexture {
    /// Packs `palette` into the smallest square texture holding all of its colors.
    #[must_use]
    pub fn new(palette: &[u32]) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let side = (palette.len() as f64).sqrt().ceil() as u32;
        let texels = side as usize * side as usize;

        let mut data: Vec<u8> = palette
            .iter()
            .map(|&color| to_srgba(color))
            .collect::<Vec<_>>()
            .into_components();
        data.resize(texels * 4, 0);

        #[allow(clippy::cast_possible_truncation)]
        let colors = palette.len() as u32;

        Self { side, colors, data }
    }

    /// The width and height of the texture.
    #[must_use]
    pub fn side(&self) -> u32 {
        self.side
    }

    /// The number of palette colors stored in the texture.
    #[must_use]
    pub fn color_count(&self) -> u32 {
        self.colors
    }

    /// The texels as RGBA bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The RGBA bytes of the `index`-th color, or zero past the end of the texture.
    #[must_use]
    pub fn texel(&self, index: usize) -> [u8; 4] {
        self.data
            .get(index * 4..index * 4 + 4)
            .map_or([0; 4], |t| [t[0], t[1], t[2], t[3]])
    }
}

/// An image uploaded as RGBA bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTexture {
    /// The width of the image.
    width: u32,
    /// The height of the image.
    height: u32,
    /// The pixels as RGBA bytes, row by row.
    data: Vec<u8>,
}

impl ImageTexture {
    /// Creates a texture from packed `0xAARRGGBB` pixels.
    ///
    /// # Errors
    /// Returns an error if `width` or `height` is zero,
    /// or if the length of `pixels` is not equal to `width * height`.
    pub fn new(pixels: ColorSlice, width: u32, height: u32) -> Result<Self, QuantizeError> {
        check_dimensions(pixels.len(), width, height)?;
        let data = pixels
            .iter()
            .map(|&pixel| to_srgba(pixel))
            .collect::<Vec<_>>()
            .into_components();
        Ok(Self { width, height, data })
    }

    /// The dimensions of the image as `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The pixels as RGBA bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(feature = "image")]
impl From<&image::RgbaImage> for ImageTexture {
    fn from(image: &image::RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.as_raw().clone(),
        }
    }
}

/// The inputs of one palette lookup pass.
#[derive(Debug, Clone, Copy)]
pub struct PalettePass<'a> {
    /// The image to remap.
    pub image: &'a ImageTexture,
    /// The palette to remap to.
    pub palette: &'a PaletteTexture,
}

impl PalettePass<'_> {
    /// The number of palette colors the pass considers.
    #[must_use]
    pub fn color_count(&self) -> usize {
        (self.palette.color_count() as usize).min(MAX_PASS_COLORS)
    }
}

/// The operations a graphics backend must provide to run a [`PalettePass`].
pub trait Renderer {
    /// A handle to an offscreen render target.
    type Target: Clone;

    /// Allocates an offscreen RGBA target of the given size.
    fn create_render_target(&mut self, width: u32, height: u32) -> Self::Target;

    /// The currently bound render target, or `None` for the default framebuffer.
    fn render_target(&self) -> Option<Self::Target>;

    /// Binds a render target, or the default framebuffer for `None`.
    fn set_render_target(&mut self, target: Option<Self::Target>);

    /// Runs the pass over the full currently bound target.
    fn render(&mut self, pass: &PalettePass);

    /// Copies the RGBA contents of `target` into `buffer`.
    fn read_render_target_pixels(&self, target: &Self::Target, buffer: &mut [u8]);

    /// Releases a render target that is no longer needed.
    fn dispose_render_target(&mut self, _target: Self::Target) {}
}

/// Remaps images to a palette with a [`Renderer`].
#[derive(Debug, Clone)]
pub struct GpuQuantizer<R: Renderer> {
    /// The graphics backend.
    renderer: R,
}

impl<R: Renderer> GpuQuantizer<R> {
    /// Creates a quantizer drawing with `renderer`.
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// The graphics backend.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the graphics backend.
    pub fn into_inner(self) -> R {
        self.renderer
    }

    /// Renders `image` with every pixel replaced by a color of `palette`,
    /// returning the result as RGBA bytes.
    ///
    /// The previously bound render target is restored afterwards.
    pub fn quantize(&mut self, image: &ImageTexture, palette: &[u32]) -> Vec<u8> {
        let (width, height) = image.dimensions();
        let palette = PaletteTexture::new(palette);
        tracing::debug!(width, height, side = palette.side(), "rendering palette pass");

        let target = self.renderer.create_render_target(width, height);
        let previous = self.renderer.render_target();
        self.renderer.set_render_target(Some(target.clone()));
        self.renderer.render(&PalettePass { image, palette: &palette });
        self.renderer.set_render_target(previous);

        let mut buffer = vec![0; width as usize * height as usize * 4];
        self.renderer.read_render_target_pixels(&target, &mut buffer);
        self.renderer.dispose_render_target(target);

        buffer
    }
}

/// An offscreen target of the [`SoftwareRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct Framebuffer {
    /// The width in pixels.
    width: u32,
    /// The height in pixels.
    height: u32,
    /// The RGBA contents.
    data: Vec<u8>,
}

/// A [`Renderer`] evaluating passes on the CPU.
///
/// Targets are indices into the renderer's list of framebuffers.
#[derive(Debug, Clone, Default)]
pub struct SoftwareRenderer {
    /// The allocated framebuffers (`None` once disposed).
    targets: Vec<Option<Framebuffer>>,
    /// The bound framebuffer.
    current: Option<usize>,
}

impl SoftwareRenderer {
    /// Creates a renderer without any targets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of targets that have not been disposed.
    #[must_use]
    pub fn live_targets(&self) -> usize {
        self.targets.iter().filter(|t| t.is_some()).count()
    }
}

/// Normalizes a byte to `0.0..=1.0`, as a texture sampler does.
#[inline]
fn unorm(value: u8) -> f32 {
    f32::from(value) / 255.0
}

/// Computes the pass output for one RGBA texel.
fn shade(texel: [u8; 4], pass: &PalettePass) -> [u8; 4] {
    if unorm(texel[3]) < ALPHA_CUTOFF {
        return pass.palette.texel(0);
    }

    (0..pass.color_count())
        .map(|i| pass.palette.texel(i))
        .min_by_key(|color| {
            let dist: f32 = (0..3).map(|c| (unorm(texel[c]) - unorm(color[c])).powi(2)).sum();
            OrderedFloat(dist)
        })
        .unwrap_or([0; 4])
}

impl Renderer for SoftwareRenderer {
    type Target = usize;

    fn create_render_target(&mut self, width: u32, height: u32) -> Self::Target {
        self.targets.push(Some(Framebuffer {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }));
        self.targets.len() - 1
    }

    fn render_target(&self) -> Option<Self::Target> {
        self.current
    }

    fn set_render_target(&mut self, target: Option<Self::Target>) {
        self.current = target;
    }

    fn render(&mut self, pass: &PalettePass) {
        let Some(target) = self.current.and_then(|i| self.targets.get_mut(i)).and_then(Option::as_mut) else {
            tracing::warn!("no render target bound, skipping pass");
            return;
        };

        if (target.width, target.height) != pass.image.dimensions() {
            tracing::warn!(
                target_size = ?(target.width, target.height),
                image_size = ?pass.image.dimensions(),
                "render target size differs from image size"
            );
        }

        for (out, texel) in target
            .data
            .chunks_exact_mut(4)
            .zip(pass.image.data().chunks_exact(4))
        {
            out.copy_from_slice(&shade([texel[0], texel[1], texel[2], texel[3]], pass));
        }
    }

    fn read_render_target_pixels(&self, target: &Self::Target, buffer: &mut [u8]) {
        if let Some(Some(framebuffer)) = self.targets.get(*target) {
            let n = buffer.len().min(framebuffer.data.len());
            buffer[..n].copy_from_slice(&framebuffer.data[..n]);
        }
    }

    fn dispose_render_target(&mut self, target: Self::Target) {
        if let Some(slot) = self.targets.get_mut(target) {
            *slot = None;
        }
    }
}
