//! The quantization entry points: palette generation followed by pixel remapping.
//!
//! The builder structs in the high-level API call into these functions,
//! but they can also be used directly when the `pipelines` feature is disabled.
//!
//! # Examples
//! ```
//! # use pnnquant::{quantize::{self, QuantizeOptions}, ColorSlice, PaletteSize, QuantizeError};
//! # fn main() -> Result<(), QuantizeError> {
//! let pixels = vec![0xFFFF_0000, 0xFF00_FF00, 0xFF00_FF00, 0xFFFF_0000];
//! let colors = ColorSlice::try_from(pixels.as_slice())?;
//!
//! let options = QuantizeOptions { palette_size: PaletteSize::from(2), ..QuantizeOptions::default() };
//! let output = quantize::indexed(colors, 2, 2, &options)?;
//! assert_eq!(output.pixels(), pixels);
//! # Ok(())
//! # }
//! ```

use crate::{
    assembler::{assemble, fixed_palette},
    context::{QuantizeContext, DEFAULT_ALPHA_THRESHOLD, DEFAULT_LUMA_CHROMA_RATIO},
    dither::{dither, remap},
    histogram::Histogram,
    pnn::cluster,
    search::PaletteSearch,
    ColorSlice, ImageType, Indices, PaletteOutput, PaletteSize, QuantizeError, QuantizeOutput,
};

/// The options of a quantization run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizeOptions {
    /// The maximum number of palette colors.
    pub palette_size: PaletteSize,
    /// Whether to use error diffusion when remapping pixels.
    pub dither: bool,
    /// Pixels with an alpha at or below this value are treated as fully transparent.
    pub alpha_threshold: u8,
    /// The blend between plain RGB distance (`0.0`) and luma/chroma distance (`1.0`).
    pub luma_chroma_ratio: f64,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            palette_size: PaletteSize::default(),
            dither: true,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            luma_chroma_ratio: DEFAULT_LUMA_CHROMA_RATIO,
        }
    }
}

impl QuantizeOptions {
    /// Creates the per-run context for `pixels`.
    pub(crate) fn context(&self, pixels: &[u32]) -> QuantizeContext {
        QuantizeContext::new(pixels, self.palette_size, self.alpha_threshold, self.luma_chroma_ratio)
    }
}

/// Checks that `len` pixels form a non-empty `width` by `height` image.
pub(crate) fn check_dimensions(len: usize, width: u32, height: u32) -> Result<(), QuantizeError> {
    if width == 0 || height == 0 {
        Err(QuantizeError::ZeroDimension)
    } else if u64::from(width) * u64::from(height) != len as u64 {
        Err(QuantizeError::DimensionMismatch { len, width, height })
    } else {
        Ok(())
    }
}

/// Builds the histogram of `pixels`, clusters it, and assembles the palette.
///
/// Palette sizes of two colors skip clustering and use a fixed palette,
/// unless the image has at most two distinct bins.
pub(crate) fn generate_palette(pixels: &[u32], ctx: &mut QuantizeContext) -> Vec<u32> {
    let k = ctx.palette_size.into_inner() as usize;

    let hist = Histogram::new(pixels, ctx);
    tracing::debug!(bins = hist.len(), pixels = hist.total_count(), "built histogram");

    if k <= 2 && hist.len() > k {
        return fixed_palette(ctx);
    }

    let bins = cluster(hist.into_bins(), ctx);
    assemble(&bins, ctx)
}

/// Replaces the palette entry nearest to the transparent pixel with the transparent color
/// and moves it to slot `0`.
///
/// Nothing changes for images without transparency or palettes of at most two colors.
pub(crate) fn finalize_transparency(pixels: &[u32], palette: Vec<u32>, ctx: &QuantizeContext) -> Vec<u32> {
    let Some(pos) = ctx.transparent_pixel else { return palette };
    if palette.len() <= 2 {
        return palette;
    }

    let mut search = PaletteSearch::new(palette, ctx);
    let k = search.nearest(pixels[pos], pos);
    search.set_entry(k, ctx.transparent_color);
    search.move_to_front(k);
    tracing::debug!(replaced = k, color = ctx.transparent_color, "placed transparent color");

    search.into_palette()
}

/// Generates the final palette for `pixels`, returning it with the context of the run.
fn generate(pixels: &[u32], options: &QuantizeOptions) -> (QuantizeContext, Vec<u32>) {
    let mut ctx = options.context(pixels);
    let palette = generate_palette(pixels, &mut ctx);
    let palette = finalize_transparency(pixels, palette, &ctx);
    tracing::debug!(colors = palette.len(), "generated palette");
    (ctx, palette)
}

/// The `transparent_index` reported for a run.
fn transparent_index(ctx: &QuantizeContext) -> Option<u32> {
    ctx.has_transparency().then_some(0)
}

/// Computes only the palette of `pixels`.
pub(crate) fn run_palette(pixels: &[u32], options: &QuantizeOptions) -> PaletteOutput {
    let _span = tracing::debug_span!("palette", pixels = pixels.len(), colors = %options.palette_size).entered();

    let (ctx, palette) = generate(pixels, options);
    PaletteOutput {
        palette,
        transparent_index: transparent_index(&ctx),
        image_type: ImageType::new(options.palette_size, ctx.semi_transparency),
    }
}

/// Computes the palette of `pixels` and maps every pixel to it.
///
/// `pixels` must hold whole rows of `width` pixels.
pub(crate) fn run_indexed(pixels: &[u32], width: usize, options: &QuantizeOptions) -> QuantizeOutput {
    let _span = tracing::debug_span!(
        "quantize",
        pixels = pixels.len(),
        colors = %options.palette_size,
        dither = options.dither,
    )
    .entered();

    let (ctx, palette) = generate(pixels, options);

    let mut search = PaletteSearch::new(palette, &ctx);
    let indices = if options.dither {
        dither(pixels, width, &mut search)
    } else {
        remap(pixels, &mut search)
    };
    let palette = search.into_palette();
    tracing::debug!(colors = palette.len(), "remapped pixels");

    QuantizeOutput {
        palette,
        indices: Indices::new(indices, options.palette_size),
        transparent_index: transparent_index(&ctx),
        image_type: ImageType::new(options.palette_size, ctx.semi_transparency),
    }
}

/// Computes a palette of at most `options.palette_size` colors for the given pixels.
///
/// When the image has transparent pixels, the transparent color is placed in slot `0`.
#[must_use]
pub fn palette(pixels: ColorSlice, options: &QuantizeOptions) -> PaletteOutput {
    run_palette(&pixels, options)
}

/// Quantizes a `width` by `height` image, returning the palette and an index for each pixel.
///
/// # Errors
/// Returns an error if either dimension is zero
/// or if the number of pixels does not equal `width * height`.
pub fn indexed(
    pixels: ColorSlice,
    width: u32,
    height: u32,
    options: &QuantizeOptions,
) -> Result<QuantizeOutput, QuantizeError> {
    check_dimensions(pixels.len(), width, height)?;
    Ok(run_indexed(&pixels, width as usize, options))
}
