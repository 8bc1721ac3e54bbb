//! A color quantizer based on pairwise nearest neighbor clustering.
//!
//! `pnnquant` reduces an image with alpha to a palette of at most [`MAX_COLORS`] colors.
//! Pixels are collected into a coarse histogram, the closest pair of bins is merged
//! until only the requested number of colors remain, and every pixel is then mapped
//! to the palette, optionally with serpentine error diffusion.
//!
//! Pixels are packed as `0xAARRGGBB` values. When an image contains fully transparent pixels,
//! the transparent color is always placed at palette index `0`.
//!
//! # Features
//! To reduce dependencies and compile times, `pnnquant` has several `cargo` features
//! that can be turned off or on:
//! - `pipelines`: exposes builder structs that serve as the high-level API (more details below).
//! - `image`: enables integration with the [`image`] crate.
//! - `gpu`: exposes remapping to a finished palette through a pluggable renderer (see [`gpu`]).
//!
//! # High-Level API
//! To get started with the high-level API, see [`ImagePipeline`].
//! If you want a color palette instead of a quantized image, see [`PalettePipeline`] instead.
//! Both of these have examples in their documentation, but here is an additional example:
//! ```no_run
//! # use pnnquant::{argb_pixels, ImagePipeline};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("some image")?.into_rgba8();
//! let pixels = argb_pixels(&img);
//!
//! let quantized = ImagePipeline::new(pixels.as_slice().try_into()?, img.width(), img.height())?
//!     .palette_size(128) // set the max number of colors in the palette
//!     .dither(false) // turn dithering off
//!     .quantized_rgbaimage();
//! # Ok(())
//! # }
//! ```
//!
//! Without the `pipelines` feature, the same steps are available as plain functions in [`quantize`].

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]

mod assembler;
mod blue_noise;
mod context;
mod dither;
mod error;
mod histogram;
mod pnn;
mod search;
mod types;

#[cfg(test)]
mod tests;

#[cfg(feature = "pipelines")]
mod api;

pub mod color;
pub mod quantize;

#[cfg(feature = "gpu")]
pub mod gpu;

pub use context::{DEFAULT_ALPHA_THRESHOLD, DEFAULT_LUMA_CHROMA_RATIO};
pub use error::QuantizeError;
pub use types::*;

#[cfg(feature = "pipelines")]
pub use api::*;

/// The maximum supported image size in number of pixels is `u32::MAX`.
pub const MAX_PIXELS: u32 = u32::MAX;

/// The minimum supported number of palette colors is `2`.
pub const MIN_COLORS: u32 = 2;

/// The maximum supported number of palette colors is `65536`.
pub const MAX_COLORS: u32 = u16::MAX as u32 + 1;
