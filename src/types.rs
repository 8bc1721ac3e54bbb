//! Contains various types needed across the crate.

use crate::{QuantizeError, MAX_COLORS, MAX_PIXELS, MIN_COLORS};
use std::{
    error::Error,
    fmt::{Debug, Display},
    ops::Deref,
};

/// An error type for when the length of an input (e.g., `Vec` or slice)
/// is above the maximum supported value.
///
/// The inner value is the maximum supported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AboveMaxLen<T>(pub T);

impl<T: Display> Display for AboveMaxLen<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "above the maximum length of {}", self.0)
    }
}

impl<T: Debug + Display> Error for AboveMaxLen<T> {}

/// A simple new type wrapper around a slice of packed `0xAARRGGBB` pixels
/// with the invariant that the length of the slice must not be greater than [`MAX_PIXELS`].
///
/// # Examples
/// Use `try_into` or [`ColorSlice::from_truncated`] to create [`ColorSlice`]s.
/// ```
/// # use pnnquant::{ColorSlice, AboveMaxLen};
/// # fn main() -> Result<(), AboveMaxLen<u32>> {
/// let pixels = vec![0xFFFF_0000, 0xFF00_FF00];
/// let colors: ColorSlice = pixels.as_slice().try_into()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorSlice<'a>(&'a [u32]);

impl<'a> ColorSlice<'a> {
    /// Creates a new [`ColorSlice`] by truncating the input slice to a max length of [`MAX_PIXELS`].
    #[must_use]
    pub fn from_truncated(pixels: &'a [u32]) -> Self {
        Self(&pixels[..pixels.len().min(MAX_PIXELS as usize)])
    }
}

impl<'a> AsRef<[u32]> for ColorSlice<'a> {
    fn as_ref(&self) -> &[u32] {
        self
    }
}

impl<'a> Deref for ColorSlice<'a> {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl<'a> From<ColorSlice<'a>> for &'a [u32] {
    fn from(val: ColorSlice<'a>) -> Self {
        val.0
    }
}

impl<'a> TryFrom<&'a [u32]> for ColorSlice<'a> {
    type Error = AboveMaxLen<u32>;

    fn try_from(slice: &'a [u32]) -> Result<Self, Self::Error> {
        if slice.len() <= MAX_PIXELS as usize {
            Ok(Self(slice))
        } else {
            Err(AboveMaxLen(MAX_PIXELS))
        }
    }
}

/// This type is used to specify the (maximum) number of colors to include in a palette.
///
/// This is a simple new type wrapper around `u32` with the invariant that it must be
/// in the range [`MIN_COLORS`]`..=`[`MAX_COLORS`].
///
/// # Examples
/// ```
/// # use pnnquant::{PaletteSize, QuantizeError};
/// # fn main() -> Result<(), QuantizeError> {
/// let size = PaletteSize::from(16);
/// let size = PaletteSize::try_from(1024u32)?;
/// let size = PaletteSize::from_clamped(100_000);
/// assert_eq!(size, PaletteSize::MAX);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PaletteSize(u32);

impl PaletteSize {
    /// The smallest supported palette size (given by [`MIN_COLORS`]).
    pub const MIN: Self = Self(MIN_COLORS);

    /// The largest supported palette size (given by [`MAX_COLORS`]).
    pub const MAX: Self = Self(MAX_COLORS);

    /// Gets the inner `u32` value.
    #[must_use]
    pub const fn into_inner(self) -> u32 {
        self.0
    }

    /// Creates a [`PaletteSize`] by clamping the given `u32` to the supported range.
    #[must_use]
    pub const fn from_clamped(value: u32) -> Self {
        if value < MIN_COLORS {
            Self::MIN
        } else if value > MAX_COLORS {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Whether indices into a palette of this size need more than 8 bits.
    #[must_use]
    pub const fn needs_wide_indices(self) -> bool {
        self.0 > 256
    }
}

impl Default for PaletteSize {
    fn default() -> Self {
        Self(256)
    }
}

impl From<PaletteSize> for u32 {
    fn from(val: PaletteSize) -> Self {
        val.into_inner()
    }
}

impl From<u8> for PaletteSize {
    /// Values below [`MIN_COLORS`] are raised to [`PaletteSize::MIN`].
    fn from(value: u8) -> Self {
        Self::from_clamped(value.into())
    }
}

impl TryFrom<u32> for PaletteSize {
    type Error = QuantizeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if (MIN_COLORS..=MAX_COLORS).contains(&value) {
            Ok(PaletteSize(value))
        } else {
            Err(QuantizeError::InvalidPaletteSize(value))
        }
    }
}

impl Display for PaletteSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.into_inner())
    }
}

/// The image format best suited to hold a quantized result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    /// More than 256 colors or semi-transparent colors.
    Png,
    /// At most 256 colors with binary transparency.
    Gif,
}

impl ImageType {
    /// Picks the image type for the given palette size and alpha content.
    #[must_use]
    pub const fn new(palette_size: PaletteSize, semi_transparency: bool) -> Self {
        if palette_size.needs_wide_indices() || semi_transparency {
            Self::Png
        } else {
            Self::Gif
        }
    }

    /// The MIME type string, e.g. `image/png`.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

impl Display for ImageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime())
    }
}

/// Per-pixel palette indices.
///
/// 8-bit indices are used when the requested palette size is at most `256`,
/// otherwise 16-bit indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indices {
    /// Indices into a palette of at most `256` colors.
    U8(Vec<u8>),
    /// Indices into a palette of more than `256` colors.
    U16(Vec<u16>),
}

impl Indices {
    /// Narrows the given indices to the width required by `palette_size`.
    #[must_use]
    pub(crate) fn new(indices: Vec<u16>, palette_size: PaletteSize) -> Self {
        if palette_size.needs_wide_indices() {
            Self::U16(indices)
        } else {
            #[allow(clippy::cast_possible_truncation)]
            Self::U8(indices.into_iter().map(|i| i as u8).collect())
        }
    }

    /// The number of indices.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(indices) => indices.len(),
            Self::U16(indices) => indices.len(),
        }
    }

    /// Whether there are no indices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the `i`-th index widened to `usize`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<usize> {
        match self {
            Self::U8(indices) => indices.get(i).copied().map(usize::from),
            Self::U16(indices) => indices.get(i).copied().map(usize::from),
        }
    }

    /// Iterates over the indices widened to `usize`.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let (narrow, wide) = match self {
            Self::U8(indices) => (indices.as_slice(), [].as_slice()),
            Self::U16(indices) => ([].as_slice(), indices.as_slice()),
        };
        narrow
            .iter()
            .map(|&i| usize::from(i))
            .chain(wide.iter().map(|&i| usize::from(i)))
    }
}

/// The palette produced by a quantization run, without any per-pixel indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteOutput {
    /// The generated palette of packed `0xAARRGGBB` colors.
    ///
    /// Its length is at most the requested palette size.
    pub palette: Vec<u32>,
    /// The palette slot holding the transparent color, if the image has transparent pixels.
    ///
    /// This is always slot `0` when present.
    pub transparent_index: Option<u32>,
    /// The image format hint for the result.
    pub image_type: ImageType,
}

/// The output struct returned by the full quantization functions.
///
/// It contains the color `palette` for the image alongside an index into `palette` for each pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizeOutput {
    /// The generated palette of packed `0xAARRGGBB` colors.
    pub palette: Vec<u32>,
    /// The remapped image, where each pixel is replaced with an index into `palette`.
    pub indices: Indices,
    /// The palette slot holding the transparent color, if the image has transparent pixels.
    pub transparent_index: Option<u32>,
    /// The image format hint for the result.
    pub image_type: ImageType,
}

impl QuantizeOutput {
    /// Reconstructs the quantized image by gathering palette colors through `indices`.
    #[must_use]
    pub fn pixels(&self) -> Vec<u32> {
        self.indices.iter().map(|i| self.palette[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_bounds() {
        assert_eq!(PaletteSize::try_from(1u32), Err(QuantizeError::InvalidPaletteSize(1)));
        assert_eq!(
            PaletteSize::try_from(MAX_COLORS + 1),
            Err(QuantizeError::InvalidPaletteSize(MAX_COLORS + 1))
        );
        assert_eq!(PaletteSize::try_from(2u32).map(PaletteSize::into_inner), Ok(2));
        assert_eq!(PaletteSize::from(0), PaletteSize::MIN);
        assert_eq!(PaletteSize::from_clamped(u32::MAX), PaletteSize::MAX);
    }

    #[test]
    fn indices_width_follows_palette_size() {
        let indices = Indices::new(vec![0, 3, 255], PaletteSize::default());
        assert_eq!(indices, Indices::U8(vec![0, 3, 255]));

        let wide = PaletteSize::from_clamped(257);
        let indices = Indices::new(vec![0, 256], wide);
        assert_eq!(indices.iter().collect::<Vec<_>>(), vec![0, 256]);
        assert_eq!(indices.get(1), Some(256));
        assert_eq!(indices.get(2), None);
    }

    #[test]
    fn image_type_hint() {
        assert_eq!(ImageType::new(PaletteSize::default(), false), ImageType::Gif);
        assert_eq!(ImageType::new(PaletteSize::default(), true), ImageType::Png);
        assert_eq!(ImageType::new(PaletteSize::MAX, false).mime(), "image/png");
    }

    #[test]
    fn reconstructs_pixels() {
        let output = QuantizeOutput {
            palette: vec![0xFF00_0000, 0xFFFF_FFFF],
            indices: Indices::U8(vec![1, 0, 1]),
            transparent_index: None,
            image_type: ImageType::Gif,
        };
        assert_eq!(output.pixels(), vec![0xFFFF_FFFF, 0xFF00_0000, 0xFFFF_FFFF]);
    }
}
