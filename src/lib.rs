pub mod algebra;
pub mod binary;
pub mod codec;
pub mod colors;
pub mod config;
pub mod dct;
pub mod error;
pub mod filters;
pub mod image;
pub mod motion;
pub mod padding;
pub mod plane;
pub mod ppm;
pub mod quantization;
pub mod subsample;

pub use codec::{
    decode::{decode_image, decode_video},
    encode::{encode_image, encode_video},
    CompressedImage, CompressedVideo,
};
pub use colors::Rgb;
pub use config::CodecConfig;
pub use error::{CodecError, Result};
pub use image::{Resolution, RgbImage};
