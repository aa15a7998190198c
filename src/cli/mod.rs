use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use jmpeg::{
    config::{DEFAULT_I_FRAME_INTERVAL, UPPER_SEARCH_RANGE},
    decode_image, decode_video, encode_image, encode_video,
    filters::{chroma_view, luma_view},
    ppm::{decode_ppm, encode_ppm},
    CodecConfig, CompressedImage, CompressedVideo, RgbImage,
};

use format::{determine_file_format, FileFormat};

mod format;

/// JPEG-like still image and MPEG-like video codec over PPM files.
#[derive(Parser, Debug)]
#[command(name = "jmpeg", version)]
pub struct Cli {
    /// Log every pipeline stage
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a PPM image into a still image container
    Encode { input: PathBuf, output: PathBuf },

    /// Decompress a still image container into a PPM image
    Decode { input: PathBuf, output: PathBuf },

    /// Compress a sequence of equally sized PPM frames into a video container
    EncodeVideo {
        output: PathBuf,
        #[arg(required = true)]
        frames: Vec<PathBuf>,
        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Decompress a video container into numbered PPM frames
    DecodeVideo {
        input: PathBuf,
        output_dir: PathBuf,
        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Write the luma-only and chroma-only views of a PPM image
    Channels { input: PathBuf, output_dir: PathBuf },
}

/// Video parameters. Decoding needs the values used for encoding.
#[derive(Args, Debug)]
pub struct CodecArgs {
    /// Motion search radius in pixels (1-15)
    #[arg(long, default_value_t = UPPER_SEARCH_RANGE)]
    search_area: u8,

    /// Distance between intra coded frames
    #[arg(long, default_value_t = DEFAULT_I_FRAME_INTERVAL)]
    i_frame_interval: usize,

    /// Search motion on all cores
    #[arg(long)]
    parallel: bool,
}

impl CodecArgs {
    fn config(&self) -> CodecConfig {
        CodecConfig::default()
            .with_search_area(self.search_area)
            .with_i_frame_interval(self.i_frame_interval)
            .with_parallel(self.parallel)
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Encode { input, output } => {
            let image = read_ppm(&input)?;
            let encoded = encode_image(&image, &CodecConfig::default())?;
            write(&output, encoded.as_bytes())?;
            info!(
                "{} -> {} ({} bytes)",
                input.display(),
                output.display(),
                encoded.len()
            );
        }
        Command::Decode { input, output } => {
            let bytes = read_expecting(&input, FileFormat::CompressedImage)?;
            let image = decode_image(&CompressedImage::from_bytes(bytes))
                .with_context(|| format!("failed to decode {}", input.display()))?;
            write(&output, &encode_ppm(&image))?;
        }
        Command::EncodeVideo {
            output,
            frames,
            codec,
        } => {
            let images = frames
                .iter()
                .map(|path| read_ppm(path))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let encoded = encode_video(&images, &codec.config())?;
            write(&output, encoded.as_bytes())?;
            info!(
                "{} frames -> {} ({} bytes)",
                images.len(),
                output.display(),
                encoded.len()
            );
        }
        Command::DecodeVideo {
            input,
            output_dir,
            codec,
        } => {
            let bytes = read_expecting(&input, FileFormat::CompressedVideo)?;
            let frames = decode_video(&CompressedVideo::from_bytes(bytes), &codec.config())
                .with_context(|| format!("failed to decode {}", input.display()))?;

            fs::create_dir_all(&output_dir)
                .with_context(|| format!("failed to create {}", output_dir.display()))?;
            for (index, frame) in frames.iter().enumerate() {
                write(
                    &output_dir.join(format!("frame_{index:04}.ppm")),
                    &encode_ppm(frame),
                )?;
            }
            info!("{} frames -> {}", frames.len(), output_dir.display());
        }
        Command::Channels { input, output_dir } => {
            let image = read_ppm(&input)?;

            fs::create_dir_all(&output_dir)
                .with_context(|| format!("failed to create {}", output_dir.display()))?;
            write(&output_dir.join("luma.ppm"), &encode_ppm(&luma_view(&image)))?;
            write(&output_dir.join("chroma.ppm"), &encode_ppm(&chroma_view(&image)))?;
        }
    }

    Ok(())
}

fn read_expecting(path: &Path, expected: FileFormat) -> anyhow::Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    match determine_file_format(path, &bytes) {
        Some(format) if format == expected => Ok(bytes),
        Some(format) => bail!("{} is {:?}, expected {:?}", path.display(), format, expected),
        None => bail!("unrecognized file format {}", path.display()),
    }
}

fn read_ppm(path: &Path) -> anyhow::Result<RgbImage> {
    let bytes = read_expecting(path, FileFormat::Ppm)?;

    decode_ppm(&bytes).with_context(|| format!("failed to parse {}", path.display()))
}

fn write(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}
