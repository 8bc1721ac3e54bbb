use pnnquant::{
    quantize::{self, QuantizeOptions},
    ColorSlice, ImageType, Indices, PaletteSize, QuantizeError,
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

const RED: u32 = 0xFFFF_0000;
const GREEN: u32 = 0xFF00_FF00;

fn options(k: u32, dither: bool) -> QuantizeOptions {
    QuantizeOptions {
        palette_size: PaletteSize::try_from(k).unwrap(),
        dither,
        ..QuantizeOptions::default()
    }
}

fn random_pixels(len: usize, seed: u64) -> Vec<u32> {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}

/// A smooth gradient with a fully transparent first row.
fn gradient(width: u32, height: u32) -> Vec<u32> {
    (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if y == 0 {
                    0x0010_2030
                } else {
                    0xFF00_0000 | (x * 4) << 16 | (y * 4) << 8 | (x + y) * 2
                }
            })
        })
        .collect()
}

#[test]
fn red_and_green_are_kept_exactly() {
    let pixels = [RED, GREEN];
    let colors = ColorSlice::try_from(pixels.as_slice()).unwrap();

    let output = quantize::indexed(colors, 2, 1, &options(2, false)).unwrap();
    let mut palette = output.palette.clone();
    palette.sort_unstable();
    assert_eq!(palette, vec![GREEN, RED]);
    assert_eq!(output.pixels(), pixels);
    assert_eq!(output.transparent_index, None);
    assert_eq!(output.image_type, ImageType::Gif);
}

#[test]
fn fully_transparent_image() {
    let pixels = [0x0000_0000; 16];
    let colors = ColorSlice::try_from(pixels.as_slice()).unwrap();

    for dither in [false, true] {
        let output = quantize::indexed(colors, 4, 4, &options(4, dither)).unwrap();
        assert_eq!(output.palette[0], 0x0000_0000);
        assert_eq!(output.transparent_index, Some(0));
        assert!(output.indices.iter().all(|i| i == 0));
    }
}

#[test]
fn single_color_image() {
    let color = 0xFF3C_7A99;
    let pixels = vec![color; 1_000_000];
    let colors = ColorSlice::try_from(pixels.as_slice()).unwrap();

    let output = quantize::indexed(colors, 1000, 1000, &options(2, true)).unwrap();
    assert!(!output.palette.is_empty() && output.palette.len() <= 2);
    assert!(output.palette.contains(&color));
    assert!(output.pixels().iter().all(|&p| p == color));
}

#[test]
fn runs_are_deterministic() {
    let pixels = random_pixels(96 * 64, 7);
    let colors = ColorSlice::try_from(pixels.as_slice()).unwrap();

    for (k, dither) in [(16, true), (16, false), (255, true), (300, false)] {
        let a = quantize::indexed(colors, 96, 64, &options(k, dither)).unwrap();
        let b = quantize::indexed(colors, 96, 64, &options(k, dither)).unwrap();
        assert_eq!(a, b);
        assert_eq!(quantize::palette(colors, &options(k, dither)).palette, a.palette);
    }
}

#[test]
fn transparent_color_takes_slot_zero() {
    let pixels = gradient(64, 64);
    let colors = ColorSlice::try_from(pixels.as_slice()).unwrap();

    for k in [3, 8, 64, 256] {
        for dither in [false, true] {
            let output = quantize::indexed(colors, 64, 64, &options(k, dither)).unwrap();
            assert_eq!(output.palette[0], 0x0010_2030);
            assert_eq!(output.transparent_index, Some(0));
            assert!(output.indices.iter().take(64).all(|i| i == 0));
        }
    }
}

#[test]
fn palette_length_is_bounded() {
    let pixels = random_pixels(128 * 128, 3);
    let colors = ColorSlice::try_from(pixels.as_slice()).unwrap();

    for k in [2, 5, 32, 256, 257, 4096] {
        let output = quantize::indexed(colors, 128, 128, &options(k, true)).unwrap();
        assert!(output.palette.len() <= k as usize);
        assert!(output.indices.iter().all(|i| i < output.palette.len()));
        assert_eq!(matches!(output.indices, Indices::U16(_)), k > 256);
    }

    let few = [RED, GREEN, RED, 0xFF00_00FF];
    let colors = ColorSlice::try_from(few.as_slice()).unwrap();
    assert_eq!(quantize::palette(colors, &options(256, true)).palette.len(), 3);
}

#[test]
fn semi_transparency_prefers_png() {
    let mut pixels = gradient(32, 32);
    pixels[100] = 0x8012_3456;
    let colors = ColorSlice::try_from(pixels.as_slice()).unwrap();

    let output = quantize::palette(colors, &options(16, true));
    assert_eq!(output.image_type, ImageType::Png);
    assert_eq!(output.image_type.mime(), "image/png");
}

#[test]
fn invalid_inputs_are_reported() {
    assert_eq!(PaletteSize::try_from(1u32), Err(QuantizeError::InvalidPaletteSize(1)));
    assert_eq!(PaletteSize::try_from(65537u32), Err(QuantizeError::InvalidPaletteSize(65537)));

    let pixels = [RED; 6];
    let colors = ColorSlice::try_from(pixels.as_slice()).unwrap();
    let options = QuantizeOptions::default();
    assert_eq!(quantize::indexed(colors, 0, 6, &options), Err(QuantizeError::ZeroDimension));
    assert_eq!(
        quantize::indexed(colors, 4, 2, &options),
        Err(QuantizeError::DimensionMismatch { len: 6, width: 4, height: 2 })
    );
}

#[cfg(feature = "gpu")]
#[test]
fn renderer_pass_matches_exact_palette() {
    use pnnquant::gpu::{GpuQuantizer, ImageTexture, SoftwareRenderer};

    let pixels = [RED, GREEN, GREEN, 0x0000_0000];
    let colors = ColorSlice::try_from(pixels.as_slice()).unwrap();
    let palette = quantize::palette(colors, &options(4, false)).palette;
    assert_eq!(palette[0], 0x0000_0000);

    let image = ImageTexture::new(colors, 2, 2).unwrap();
    let rgba = GpuQuantizer::new(SoftwareRenderer::new()).quantize(&image, &palette);
    assert_eq!(rgba, image.data());
}
