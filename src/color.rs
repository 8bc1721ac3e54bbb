//! Packed ARGB pixel helpers and the shared color constants.
//!
//! Pixels are 32-bit values laid out as `0xAARRGGBB`.

use palette::{rgb::channels::Argb, Srgba};

/// Rows of the luma/chroma transform (Y, U, V) applied to `(r, g, b)` differences.
pub const LUMA_CHROMA: [[f64; 3]; 3] = [
    [0.299, 0.587, 0.114],
    [-0.14713, -0.28886, 0.436],
    [0.615, -0.51499, -0.10001],
];

/// The default perceptual weight of the alpha channel.
pub const ALPHA_WEIGHT: f64 = 0.3333;

/// The transparent color used when the image does not supply one.
pub const DEFAULT_TRANSPARENT_COLOR: u32 = 0x00FF_FFFF;

/// An opaque black pixel.
pub const OPAQUE_BLACK: u32 = 0xFF00_0000;

/// An opaque white pixel.
pub const OPAQUE_WHITE: u32 = 0xFFFF_FFFF;

/// Splits a pixel into its `[a, r, g, b]` channels.
#[inline]
#[must_use]
pub const fn channels(pixel: u32) -> [u8; 4] {
    pixel.to_be_bytes()
}

/// Packs `[a, r, g, b]` channels into a pixel.
#[inline]
#[must_use]
pub const fn pack(argb: [u8; 4]) -> u32 {
    u32::from_be_bytes(argb)
}

/// Returns the alpha channel of a pixel.
#[inline]
#[must_use]
pub const fn alpha(pixel: u32) -> u8 {
    (pixel >> 24) as u8
}

/// Computes the coarse histogram cell of a color.
///
/// Three bit-truncation schemes are used:
/// - `semi_transparency`: 4 bits for each channel including alpha.
/// - `transparency`: 1 alpha bit and 5 bits for each color channel.
/// - otherwise: the alpha channel is ignored and colors are grouped as RGB565.
#[inline]
#[must_use]
pub const fn argb_index(a: u8, r: u8, g: u8, b: u8, semi_transparency: bool, transparency: bool) -> u16 {
    let (a, r, g, b) = (a as u16, r as u16, g as u16, b as u16);
    if semi_transparency {
        (a & 0xF0) << 8 | (r & 0xF0) << 4 | (g & 0xF0) | (b >> 4)
    } else if transparency {
        (a & 0x80) << 8 | (r & 0xF8) << 7 | (g & 0xF8) << 2 | (b >> 3)
    } else {
        (r & 0xF8) << 8 | (g & 0xFC) << 3 | (b >> 3)
    }
}

/// Converts an sRGBA color into a packed pixel.
#[inline]
#[must_use]
pub fn from_srgba(color: Srgba<u8>) -> u32 {
    color.into_u32::<Argb>()
}

/// Converts a packed pixel into an sRGBA color.
#[inline]
#[must_use]
pub fn to_srgba(pixel: u32) -> Srgba<u8> {
    Srgba::from_u32::<Argb>(pixel)
}

/// Squares a channel difference.
#[inline]
pub(crate) fn sqr(value: f64) -> f64 {
    value * value
}
