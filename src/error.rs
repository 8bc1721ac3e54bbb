//! The error type returned when validating quantization inputs.

use crate::AboveMaxLen;
use thiserror::Error;

/// An invalid configuration detected before quantization starts.
///
/// The quantization algorithms themselves never fail;
/// all checks happen once at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantizeError {
    /// The image width or height is zero.
    #[error("image dimensions cannot be zero")]
    ZeroDimension,

    /// The number of pixels does not equal `width * height`.
    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        /// The length of the pixel buffer.
        len: usize,
        /// The given image width.
        width: u32,
        /// The given image height.
        height: u32,
    },

    /// The palette size is outside of the supported range.
    #[error("palette size must be between 2 and 65536, got {0}")]
    InvalidPaletteSize(u32),

    /// The pixel buffer is too large.
    #[error("too many pixels: {0}")]
    TooManyPixels(#[from] AboveMaxLen<u32>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_bad_value() {
        assert_eq!(
            QuantizeError::InvalidPaletteSize(1).to_string(),
            "palette size must be between 2 and 65536, got 1"
        );
        assert_eq!(
            QuantizeError::DimensionMismatch { len: 3, width: 2, height: 2 }.to_string(),
            "pixel buffer length 3 does not match dimensions 2x2"
        );
    }
}
