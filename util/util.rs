#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use image::RgbaImage;
use pnnquant::argb_pixels;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

/// A benchmark input: name, width, height, and packed `0xAARRGGBB` pixels.
pub struct BenchImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl BenchImage {
    pub fn from_rgbaimage(name: String, image: &RgbaImage) -> Self {
        Self {
            name,
            width: image.width(),
            height: image.height(),
            pixels: argb_pixels(image),
        }
    }
}

pub fn load_images(images: &[PathBuf]) -> Vec<BenchImage> {
    images
        .iter()
        .map(|path| {
            image::open(path).map(|image| {
                BenchImage::from_rgbaimage(
                    path.file_name().unwrap().to_owned().into_string().unwrap(),
                    &image.into_rgba8(),
                )
            })
        })
        .collect::<Result<_, _>>()
        .expect("loaded each image")
}

pub fn load_image_dir(dir: impl AsRef<Path>) -> Vec<BenchImage> {
    let mut paths = std::fs::read_dir(dir)
        .expect("read img directory")
        .collect::<Result<Vec<_>, _>>()
        .expect("read each file")
        .iter()
        .map(std::fs::DirEntry::path)
        .collect::<Vec<_>>();

    paths.sort();

    load_images(&paths)
}

pub const BENCH_DIR: &str = "img/bench";

pub fn root_dir() -> PathBuf {
    // assume current exe path is something like: target/build/deps/current_exe
    let exe = std::env::current_exe().unwrap();
    exe.parent()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap()
        .to_path_buf()
}

/// A smooth opaque gradient with a transparent border.
pub fn gradient(width: u32, height: u32) -> BenchImage {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    return 0;
                }
                let r = x * 255 / width;
                let g = y * 255 / height;
                let b = (x + y) * 255 / (width + height);
                0xFF00_0000 | r << 16 | g << 8 | b
            })
        })
        .collect();

    BenchImage { name: format!("gradient_{width}x{height}"), width, height, pixels }
}

/// Uniform random noise with random alpha.
pub fn noise(width: u32, height: u32) -> BenchImage {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(0);
    let pixels = (0..width * height).map(|_| rng.gen()).collect();
    BenchImage { name: format!("noise_{width}x{height}"), width, height, pixels }
}

pub fn synthetic_images() -> Vec<BenchImage> {
    vec![gradient(512, 512), noise(512, 512)]
}

static BENCH_IMAGES: OnceLock<Vec<BenchImage>> = OnceLock::new();

/// Images from [`BENCH_DIR`] if present, otherwise generated ones.
pub fn benchmark_images() -> &'static [BenchImage] {
    BENCH_IMAGES.get_or_init(|| {
        let dir = root_dir().join(BENCH_DIR);
        if dir.is_dir() {
            load_image_dir(dir)
        } else {
            synthetic_images()
        }
    })
}
