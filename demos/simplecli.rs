#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use image::RgbaImage;
use pnnquant::{
    argb_pixels,
    gpu::{GpuQuantizer, ImageTexture, SoftwareRenderer},
    ImagePipeline, PaletteSize, PalettePipeline,
};
use tracing_subscriber::EnvFilter;

#[derive(Subcommand)]
enum Command {
    /// Quantize and remap the image on the CPU.
    Quantize {
        #[arg(long)]
        no_dither: bool,

        #[arg(long, default_value_t = pnnquant::DEFAULT_ALPHA_THRESHOLD)]
        alpha_threshold: u8,

        #[arg(long, default_value_t = pnnquant::DEFAULT_LUMA_CHROMA_RATIO)]
        luma_chroma_ratio: f64,

        output: PathBuf,
    },
    /// Print the palette as hex `AARRGGBB` values.
    Palette,
    /// Generate the palette on the CPU and remap with the renderer pass.
    Render { output: PathBuf },
}

#[derive(Parser)]
pub struct Options {
    #[arg(short, long, default_value_t = PaletteSize::default(), value_parser = parse_palette_size)]
    k: PaletteSize,

    #[arg(long)]
    verbose: bool,

    input: PathBuf,

    #[command(subcommand)]
    command: Command,
}

fn parse_palette_size(s: &str) -> Result<PaletteSize, String> {
    let value: u32 = s.parse().map_err(|e| format!("{e}"))?;
    value.try_into().map_err(|e| format!("{e}"))
}

fn main() {
    let Options { k, verbose, input, command } = Options::parse();

    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    macro_rules! log {
        ($name: literal, $val: expr) => {{
            let time = std::time::Instant::now();
            let value = $val;
            tracing::info!("{} took {}ms", $name, time.elapsed().as_millis());
            value
        }};
    }

    let image = log!("read image", image::open(input).unwrap().into_rgba8());
    let (width, height) = image.dimensions();
    let pixels = argb_pixels(&image);
    let colors = pixels.as_slice().try_into().unwrap();

    match command {
        Command::Quantize {
            no_dither,
            alpha_threshold,
            luma_chroma_ratio,
            output,
        } => {
            let mut pipeline = ImagePipeline::new(colors, width, height).unwrap();
            pipeline
                .palette_size(k)
                .dither(!no_dither)
                .alpha_threshold(alpha_threshold)
                .luma_chroma_ratio(luma_chroma_ratio);

            let quantized = log!("quantization and remapping", pipeline.quantized_rgbaimage());
            log!("write image", quantized.save(output).unwrap());
        }
        Command::Palette => {
            let output = log!("quantization", PalettePipeline::new(colors).palette_size(k).palette());
            for color in &output.palette {
                println!("{color:08X}");
            }
            tracing::info!(
                colors = output.palette.len(),
                transparent_index = ?output.transparent_index,
                image_type = %output.image_type,
            );
        }
        Command::Render { output } => {
            let palette = log!("quantization", PalettePipeline::new(colors).palette_size(k).palette()).palette;
            let texture = ImageTexture::from(&image);
            let mut quantizer = GpuQuantizer::new(SoftwareRenderer::new());
            let rgba = log!("remapping", quantizer.quantize(&texture, &palette));
            let quantized = RgbaImage::from_vec(width, height, rgba).unwrap();
            log!("write image", quantized.save(output).unwrap());
        }
    }
}
