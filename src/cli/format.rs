use std::path::Path;

use jmpeg::ppm::{is_ppm_by_extension, is_ppm_by_signature};

pub const IMAGE_EXTENSION: &str = "cjpg";
pub const VIDEO_EXTENSION: &str = "cmpeg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Ppm,
    CompressedImage,
    CompressedVideo,
}

impl FileFormat {
    pub fn is_format_by_signature(&self, file: &[u8]) -> bool {
        match self {
            FileFormat::Ppm => is_ppm_by_signature(file),
            // containers start with raw dimensions and carry no magic number
            FileFormat::CompressedImage | FileFormat::CompressedVideo => false,
        }
    }

    pub fn is_format_by_extension(&self, path: &Path) -> bool {
        match self {
            FileFormat::Ppm => is_ppm_by_extension(path),
            FileFormat::CompressedImage => has_extension(path, IMAGE_EXTENSION),
            FileFormat::CompressedVideo => has_extension(path, VIDEO_EXTENSION),
        }
    }
}

pub const SUPPORTED_FORMATS: [FileFormat; 3] = [
    FileFormat::Ppm,
    FileFormat::CompressedImage,
    FileFormat::CompressedVideo,
];

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case(expected))
}

pub fn determine_file_format(path: &Path, file: &[u8]) -> Option<FileFormat> {
    SUPPORTED_FORMATS
        .into_iter()
        .find(|format| format.is_format_by_signature(file))
        .or_else(|| {
            SUPPORTED_FORMATS
                .into_iter()
                .find(|format| format.is_format_by_extension(path))
        })
}
