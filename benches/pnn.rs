#[path = "../util/util.rs"]
mod util;

use util::{benchmark_images, BenchImage};

use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, Bencher, BenchmarkId, Criterion,
    SamplingMode,
};
use pnnquant::{
    quantize::{self, QuantizeOptions},
    ColorSlice, PaletteSize,
};

fn bench(
    c: &mut Criterion,
    group: &str,
    mut f: impl FnMut(&mut Bencher<WallTime>, &(PaletteSize, &BenchImage)),
) {
    let mut group = c.benchmark_group(group);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_secs(2));

    for k in [PaletteSize::from_clamped(256), 64.into(), 16.into()] {
        for image in benchmark_images() {
            group.bench_with_input(
                BenchmarkId::new(k.to_string(), &image.name),
                &(k, image),
                &mut f,
            );
        }
    }
}

fn pnn_palette(c: &mut Criterion) {
    bench(c, "pnn_palette", |b, &(k, image)| {
        let colors = ColorSlice::try_from(image.pixels.as_slice()).unwrap();
        let options = QuantizeOptions { palette_size: k, ..QuantizeOptions::default() };
        b.iter(|| quantize::palette(colors, &options))
    })
}

fn pnn_palette_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("pnn_palette_wide");
    group.sample_size(10).sampling_mode(SamplingMode::Flat);

    for image in benchmark_images() {
        let colors = ColorSlice::try_from(image.pixels.as_slice()).unwrap();
        let options = QuantizeOptions {
            palette_size: PaletteSize::from_clamped(1024),
            ..QuantizeOptions::default()
        };
        group.bench_function(&image.name, |b| b.iter(|| quantize::palette(colors, &options)));
    }
}

criterion_group!(benches, pnn_palette, pnn_palette_wide);
criterion_main!(benches);
