//! Container layout shared by still images and videos.
//!
//! ```text
//! 4 bytes  width,  i32 little endian
//! 4 bytes  height, i32 little endian
//! payload, run-length encoded, one entry per frame:
//!     intra      Y, Cr, Cb quantized zigzagged planes padded to 8
//!     predicted  Y, Cr, Cb motion vectors (dx, dy as i8)
//!                Y, Cr, Cb quantized zigzagged residuals padded to the
//!                macroblock sizes
//! ```
//!
//! A still image is a stream holding a single intra frame. Nothing besides the
//! dimensions is stored; plane sizes and frame types follow from the
//! dimensions and the [`CodecConfig`].

use tracing::warn;

use crate::{
    algebra::align_up,
    binary::byte_reader::ByteReader,
    config::CodecConfig,
    dct::DiscreteCosineTransformer,
    error::{CodecError, Result},
    image::Resolution,
    motion::{macroblock_count, MotionField, MotionVector},
    padding::{pad, unpad},
    plane::{ColorFrame, Plane},
    subsample::chroma_dimensions,
};

pub mod decode;
pub mod encode;
pub mod rle;

pub const HEADER_LENGTH: usize = 8;
const VECTOR_LENGTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    pub luma: (usize, usize),
    pub chroma: (usize, usize),
    pub intra_luma: (usize, usize),
    pub intra_chroma: (usize, usize),
    pub predicted_luma: (usize, usize),
    pub predicted_chroma: (usize, usize),
}

impl FrameGeometry {
    pub fn new(resolution: Resolution, config: &CodecConfig) -> Self {
        let luma = (resolution.width as usize, resolution.height as usize);
        let chroma = chroma_dimensions(luma.0, luma.1);
        let aligned = |(width, height): (usize, usize), block| {
            (align_up(width, block), align_up(height, block))
        };

        Self {
            luma,
            chroma,
            intra_luma: aligned(luma, config.dct_block_size),
            intra_chroma: aligned(chroma, config.dct_block_size),
            predicted_luma: aligned(luma, config.macro_size_y),
            predicted_chroma: aligned(chroma, config.macro_size_crcb),
        }
    }

    pub fn vector_counts(&self, config: &CodecConfig) -> [usize; 3] {
        let (width, height) = self.predicted_luma;
        let (chroma_width, chroma_height) = self.predicted_chroma;
        let chroma = macroblock_count(chroma_width, chroma_height, config.macro_size_crcb);

        [macroblock_count(width, height, config.macro_size_y), chroma, chroma]
    }

    pub fn intra_length(&self) -> usize {
        area(self.intra_luma) + 2 * area(self.intra_chroma)
    }

    pub fn predicted_length(&self, config: &CodecConfig) -> usize {
        let vectors: usize = self.vector_counts(config).iter().sum();

        vectors * VECTOR_LENGTH + area(self.predicted_luma) + 2 * area(self.predicted_chroma)
    }
}

fn area((width, height): (usize, usize)) -> usize {
    width * height
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictedFrame {
    pub vectors: MotionField,
    pub residual: ColorFrame<i8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Intra(ColorFrame<i8>),
    Predicted(PredictedFrame),
}

impl Frame {
    fn write_to(&self, payload: &mut Vec<u8>) {
        match self {
            Frame::Intra(planes) => write_planes(planes, payload),
            Frame::Predicted(PredictedFrame { vectors, residual }) => {
                for field in [&vectors.y, &vectors.cr, &vectors.cb] {
                    payload.extend(field.iter().flat_map(|vector| vector.to_bytes()));
                }
                write_planes(residual, payload);
            }
        }
    }
}

fn write_planes(planes: &ColorFrame<i8>, payload: &mut Vec<u8>) {
    for plane in planes.planes() {
        payload.extend(plane.samples().iter().map(|&sample| sample as u8));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    pub resolution: Resolution,
    pub frames: Vec<Frame>,
}

impl Stream {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut payload = Vec::new();
        for frame in &self.frames {
            frame.write_to(&mut payload);
        }

        let mut bytes = Vec::with_capacity(HEADER_LENGTH + payload.len());
        bytes.extend((self.resolution.width as i32).to_le_bytes());
        bytes.extend((self.resolution.height as i32).to_le_bytes());
        bytes.extend(rle::encode(&payload));

        bytes
    }

    pub fn from_bytes(bytes: &[u8], config: &CodecConfig, kind: StreamKind) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let (width, height) = reader
            .read_i32_le()
            .zip(reader.read_i32_le())
            .ok_or_else(|| {
                CodecError::format(format!(
                    "expected a {HEADER_LENGTH} byte header, found {} bytes",
                    bytes.len()
                ))
            })?;

        if width <= 0 || height <= 0 {
            return Err(CodecError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            });
        }

        let resolution = Resolution::new(width as u32, height as u32);
        let geometry = FrameGeometry::new(resolution, config);
        let payload = rle::decode(reader.rest())?;
        let mut reader = ByteReader::new(&payload);
        let mut frames = Vec::new();

        while !reader.is_finished() {
            if kind == StreamKind::Image && !frames.is_empty() {
                warn!(
                    trailing = reader.number_of_bytes_left(),
                    "ignoring bytes after the image payload"
                );
                break;
            }

            let index = frames.len();
            let frame = if config.is_intra_frame(index) {
                Frame::Intra(read_planes(
                    &mut reader,
                    geometry.intra_luma,
                    geometry.intra_chroma,
                    index,
                )?)
            } else {
                read_predicted(&mut reader, &geometry, config, index)?
            };
            frames.push(frame);
        }

        if frames.is_empty() {
            return Err(CodecError::format("container holds no frames"));
        }

        Ok(Self { resolution, frames })
    }
}

fn truncated(index: usize, needed: usize, left: usize) -> CodecError {
    CodecError::format(format!(
        "frame {index} is truncated: needed {needed} more bytes, found {left}"
    ))
}

fn read_plane(
    reader: &mut ByteReader,
    (width, height): (usize, usize),
    index: usize,
) -> Result<Plane<i8>> {
    let left = reader.number_of_bytes_left();
    let bytes = reader
        .read_bytes(width * height)
        .ok_or_else(|| truncated(index, width * height, left))?;

    Plane::new(width, height, bytes.iter().map(|&byte| byte as i8).collect())
}

fn read_planes(
    reader: &mut ByteReader,
    luma: (usize, usize),
    chroma: (usize, usize),
    index: usize,
) -> Result<ColorFrame<i8>> {
    Ok(ColorFrame::new(
        read_plane(reader, luma, index)?,
        read_plane(reader, chroma, index)?,
        read_plane(reader, chroma, index)?,
    ))
}

fn read_predicted(
    reader: &mut ByteReader,
    geometry: &FrameGeometry,
    config: &CodecConfig,
    index: usize,
) -> Result<Frame> {
    let needed = geometry.predicted_length(config);
    let left = reader.number_of_bytes_left();
    if left < needed {
        return Err(truncated(index, needed, left));
    }

    let mut read_vectors = |count: usize| -> Result<Vec<MotionVector>> {
        let left = reader.number_of_bytes_left();
        let bytes = reader
            .read_bytes(count * VECTOR_LENGTH)
            .ok_or_else(|| truncated(index, count * VECTOR_LENGTH, left))?;

        Ok(bytes
            .chunks_exact(VECTOR_LENGTH)
            .map(|pair| MotionVector::from_bytes([pair[0], pair[1]]))
            .collect())
    };

    let [y, cr, cb] = geometry.vector_counts(config);
    let vectors = MotionField {
        y: read_vectors(y)?,
        cr: read_vectors(cr)?,
        cb: read_vectors(cb)?,
    };
    let residual = read_planes(
        reader,
        geometry.predicted_luma,
        geometry.predicted_chroma,
        index,
    )?;

    Ok(Frame::Predicted(PredictedFrame { vectors, residual }))
}

pub(crate) struct FrameCoder<'a> {
    pub config: &'a CodecConfig,
    pub geometry: FrameGeometry,
    pub dct: DiscreteCosineTransformer,
}

impl<'a> FrameCoder<'a> {
    pub fn new(resolution: Resolution, config: &'a CodecConfig) -> Self {
        Self {
            config,
            geometry: FrameGeometry::new(resolution, config),
            dct: DiscreteCosineTransformer::new(),
        }
    }

    pub fn pad_for_motion(&self, frame: &ColorFrame<u8>) -> ColorFrame<u8> {
        ColorFrame::new(
            pad(&frame.y, self.config.macro_size_y),
            pad(&frame.cr, self.config.macro_size_crcb),
            pad(&frame.cb, self.config.macro_size_crcb),
        )
    }

    pub fn crop(&self, frame: &ColorFrame<u8>) -> ColorFrame<u8> {
        let (width, height) = self.geometry.luma;
        let (chroma_width, chroma_height) = self.geometry.chroma;

        ColorFrame::new(
            unpad(&frame.y, width, height),
            unpad(&frame.cr, chroma_width, chroma_height),
            unpad(&frame.cb, chroma_width, chroma_height),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage(Vec<u8>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedVideo(Vec<u8>);

macro_rules! container_bytes {
    ($name:ident) => {
        impl $name {
            pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
                Self(bytes.into())
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            pub fn into_bytes(self) -> Vec<u8> {
                self.0
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

container_bytes!(CompressedImage);
container_bytes!(CompressedVideo);
