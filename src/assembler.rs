//! Turns the surviving bins into a palette.

use crate::{
    color::{pack, OPAQUE_BLACK, OPAQUE_WHITE},
    context::QuantizeContext,
    histogram::Bin,
    pnn::live_bins,
};
use num_traits::clamp;

/// Converts an averaged channel value to a byte, clamping and truncating it.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f64) -> u8 {
    clamp(value, 0.0, 255.0) as u8
}

/// Emits one color per live bin, in chain order.
///
/// When the image has transparency, a bin that ended up fully transparent
/// is swapped into slot `0`, and slot `0` is set to the context's transparent color.
pub(crate) fn assemble(bins: &[Bin], ctx: &QuantizeContext) -> Vec<u32> {
    let mut palette = Vec::with_capacity(ctx.palette_size.into_inner() as usize);

    for bin in live_bins(bins) {
        let a = channel(bin.a);
        palette.push(pack([a, channel(bin.r), channel(bin.g), channel(bin.b)]));

        if ctx.has_transparency() && a == 0 {
            let k = palette.len() - 1;
            palette.swap(0, k);
            palette[0] = ctx.transparent_color;
        }
    }

    palette
}

/// The palette used for two colors when the image has more than two bins.
///
/// This is `[transparent color, opaque black]` for images with transparency,
/// and `[opaque black, opaque white]` otherwise.
pub(crate) fn fixed_palette(ctx: &QuantizeContext) -> Vec<u32> {
    if ctx.has_transparency() {
        vec![ctx.transparent_color, OPAQUE_BLACK]
    } else {
        vec![OPAQUE_BLACK, OPAQUE_WHITE]
    }
}
