use std::path::Path;

use thiserror::Error;

use crate::{
    binary::byte_reader::ByteReader,
    colors::Rgb,
    error::CodecError,
    image::{Resolution, RgbImage},
};

const PPM_SIGNATURE: &[u8] = b"P6";
const PPM_EXTENSIONS: [&str; 2] = ["ppm", "pnm"];
const MAX_SUPPORTED_MAXVAL: u32 = u8::MAX as u32;

#[derive(Error, Debug)]
pub enum PpmError {
    #[error("File does not look like a binary PPM file (magic number missing)")]
    Signature,

    #[error("PPM stream ended unexpectedly: expected {0}")]
    UnexpectedEnd(String),

    #[error("{field} is not a valid unsigned integer")]
    InvalidNumber { field: &'static str },

    #[error("Maxval must be between 1 and 255, found {0}")]
    UnsupportedMaxval(u32),

    #[error(transparent)]
    Image(#[from] CodecError),
}

pub fn is_ppm_by_signature(file: &[u8]) -> bool {
    file.starts_with(PPM_SIGNATURE)
}

pub fn is_ppm_by_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            PPM_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
}

pub fn decode_ppm(bytes: &[u8]) -> Result<RgbImage, PpmError> {
    let mut reader = ByteReader::new(bytes);
    let signature = reader
        .read_ppm_symbol()
        .ok_or_else(|| PpmError::UnexpectedEnd("magic number".to_string()))?;

    if signature != PPM_SIGNATURE {
        return Err(PpmError::Signature);
    }

    let width = read_ascii_integer(&mut reader, "width")?;
    let height = read_ascii_integer(&mut reader, "height")?;
    let max_color_value = read_ascii_integer(&mut reader, "maxval")?;

    if max_color_value == 0 || max_color_value > MAX_SUPPORTED_MAXVAL {
        return Err(PpmError::UnsupportedMaxval(max_color_value));
    }

    let resolution = Resolution::new(width, height);
    resolution.check()?;

    reader
        .skip_single_whitespace()
        .ok_or_else(|| PpmError::UnexpectedEnd("whitespace before the raster".to_string()))?;

    let expected_pixel_bytes_size = resolution.pixel_count() * 3;
    let left = reader.number_of_bytes_left();
    let pixel_bytes = reader.read_bytes(expected_pixel_bytes_size).ok_or_else(|| {
        PpmError::UnexpectedEnd(format!(
            "{expected_pixel_bytes_size} pixel value bytes for a {width}x{height} file, only found {left}"
        ))
    })?;

    let scale = |sample: u8| -> u8 {
        if max_color_value == MAX_SUPPORTED_MAXVAL {
            sample
        } else {
            let sample = (sample as u32).min(max_color_value);
            ((sample * MAX_SUPPORTED_MAXVAL + max_color_value / 2) / max_color_value) as u8
        }
    };

    let pixels = pixel_bytes
        .chunks_exact(3)
        .map(|rgb| Rgb::new(scale(rgb[0]), scale(rgb[1]), scale(rgb[2])))
        .collect();

    Ok(RgbImage::new(resolution, pixels)?)
}

pub fn encode_ppm(image: &RgbImage) -> Vec<u8> {
    let header = format!("P6\n{} {}\n{}\n", image.width(), image.height(), MAX_SUPPORTED_MAXVAL);
    let mut bytes = Vec::with_capacity(header.len() + image.pixels.len() * 3);
    bytes.extend(header.as_bytes());
    bytes.extend(image.to_raw());

    bytes
}

fn read_ascii_integer(reader: &mut ByteReader, field: &'static str) -> Result<u32, PpmError> {
    let bytes = reader
        .read_ppm_symbol()
        .ok_or_else(|| PpmError::UnexpectedEnd(field.to_string()))?;

    std::str::from_utf8(bytes)
        .ok()
        .and_then(|text| text.parse::<u32>().ok())
        .ok_or(PpmError::InvalidNumber { field })
}
