use tracing::{debug, info, trace};

use crate::{
    colors::rgb_to_ycrcb,
    config::CodecConfig,
    error::{CodecError, Result},
    image::RgbImage,
    motion::{build_residual, estimate_motion},
    padding::pad,
    plane::ColorFrame,
    quantization::{
        quantize_and_zigzag,
        tables::{INTRA_QUANTIZATION_TABLE, RESIDUAL_QUANTIZATION_TABLE},
    },
    subsample::subsample,
};

use super::{CompressedImage, CompressedVideo, Frame, FrameCoder, PredictedFrame, Stream};

impl FrameCoder<'_> {
    pub(crate) fn encode_intra(&self, frame: &ColorFrame<u8>) -> ColorFrame<i8> {
        let block_size = self.config.dct_block_size;
        let amplitudes = frame.map_planes(|plane| {
            self.dct
                .dct(&pad(plane, block_size).map(|&sample| sample as f64))
        });

        quantize_and_zigzag(&amplitudes, &INTRA_QUANTIZATION_TABLE)
    }

    pub(crate) fn encode_predicted(
        &self,
        reference: &ColorFrame<u8>,
        current: &ColorFrame<u8>,
    ) -> PredictedFrame {
        let reference = self.pad_for_motion(reference);
        let current = self.pad_for_motion(current);
        let vectors = estimate_motion(&reference, &current, self.config);

        let (macro_y, macro_crcb) = (self.config.macro_size_y, self.config.macro_size_crcb);
        let residual = ColorFrame::new(
            build_residual(&vectors.y, &reference.y, &current.y, macro_y),
            build_residual(&vectors.cr, &reference.cr, &current.cr, macro_crcb),
            build_residual(&vectors.cb, &reference.cb, &current.cb, macro_crcb),
        );
        let amplitudes = residual.map_planes(|plane| self.dct.dct(plane));

        PredictedFrame {
            vectors,
            residual: quantize_and_zigzag(&amplitudes, &RESIDUAL_QUANTIZATION_TABLE),
        }
    }
}

fn compression_ratio(raw: usize, compressed: usize) -> f64 {
    raw as f64 / compressed.max(1) as f64
}

pub fn encode_image(image: &RgbImage, config: &CodecConfig) -> Result<CompressedImage> {
    config.validate()?;
    image.check()?;

    let coder = FrameCoder::new(image.resolution, config);
    let planes = coder.encode_intra(&subsample(&rgb_to_ycrcb(image)));
    let stream = Stream {
        resolution: image.resolution,
        frames: vec![Frame::Intra(planes)],
    };
    let bytes = stream.to_bytes();

    debug!(
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        ratio = compression_ratio(image.resolution.pixel_count() * 3, bytes.len()),
        "encoded image"
    );

    Ok(CompressedImage::from_bytes(bytes))
}

pub fn encode_video(frames: &[RgbImage], config: &CodecConfig) -> Result<CompressedVideo> {
    config.validate()?;

    let (stream, _) = encode_stream(frames, config)?;
    let bytes = stream.to_bytes();

    info!(
        frames = frames.len(),
        width = stream.resolution.width,
        height = stream.resolution.height,
        bytes = bytes.len(),
        ratio = compression_ratio(
            stream.resolution.pixel_count() * 3 * frames.len(),
            bytes.len()
        ),
        "encoded video"
    );

    Ok(CompressedVideo::from_bytes(bytes))
}

pub(crate) fn encode_stream(
    frames: &[RgbImage],
    config: &CodecConfig,
) -> Result<(Stream, Vec<ColorFrame<u8>>)> {
    let first = frames.first().ok_or(CodecError::EmptyInput)?;
    first.check()?;

    for (index, frame) in frames.iter().enumerate().skip(1) {
        if frame.resolution != first.resolution {
            return Err(CodecError::FrameSizeMismatch {
                index,
                width: first.width(),
                height: first.height(),
                actual_width: frame.width(),
                actual_height: frame.height(),
            });
        }
        frame.check()?;
    }

    let coder = FrameCoder::new(first.resolution, config);
    let mut encoded = Vec::with_capacity(frames.len());
    let mut references: Vec<ColorFrame<u8>> = Vec::with_capacity(frames.len());

    for (index, image) in frames.iter().enumerate() {
        let current = subsample(&rgb_to_ycrcb(image));

        let (frame, reconstructed) = match references.last() {
            Some(reference) if !config.is_intra_frame(index) => {
                let predicted = coder.encode_predicted(reference, &current);
                let reconstructed = coder.decode_predicted(reference, &predicted);
                trace!(
                    index,
                    zero_vectors = predicted.vectors.zero_count(),
                    vectors = predicted.vectors.len(),
                    "predicted frame"
                );

                (Frame::Predicted(predicted), reconstructed)
            }
            _ => {
                let planes = coder.encode_intra(&current);
                let reconstructed = coder.decode_intra(&planes);
                trace!(index, "intra frame");

                (Frame::Intra(planes), reconstructed)
            }
        };

        encoded.push(frame);
        references.push(reconstructed);
    }

    let stream = Stream {
        resolution: first.resolution,
        frames: encoded,
    };

    Ok((stream, references))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{codec::StreamKind, colors::Rgb, image::Resolution};

    #[test]
    fn test_invalid_config_is_rejected() {
        let image = RgbImage::filled(Resolution::new(8, 8), Rgb::new(1, 2, 3));
        let config = CodecConfig::default().with_search_area(0);

        assert!(matches!(
            encode_image(&image, &config),
            Err(CodecError::UnsupportedConfig(_))
        ));
        assert!(matches!(
            encode_video(&[image], &config),
            Err(CodecError::UnsupportedConfig(_))
        ));
    }

    #[test]
    fn test_inconsistent_image_is_rejected() {
        let image = RgbImage {
            resolution: Resolution::new(4, 4),
            pixels: vec![Rgb::new(0, 0, 0); 15],
        };

        assert_eq!(
            encode_image(&image, &CodecConfig::default()),
            Err(CodecError::BufferSize {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_empty_video_is_rejected() {
        assert_eq!(
            encode_video(&[], &CodecConfig::default()),
            Err(CodecError::EmptyInput)
        );
    }

    #[test]
    fn test_frame_sizes_must_match() {
        let frames = [
            RgbImage::filled(Resolution::new(8, 8), Rgb::new(0, 0, 0)),
            RgbImage::filled(Resolution::new(8, 8), Rgb::new(0, 0, 0)),
            RgbImage::filled(Resolution::new(16, 8), Rgb::new(0, 0, 0)),
        ];

        assert_eq!(
            encode_video(&frames, &CodecConfig::default()),
            Err(CodecError::FrameSizeMismatch {
                index: 2,
                width: 8,
                height: 8,
                actual_width: 16,
                actual_height: 8
            })
        );
    }

    #[test]
    fn test_frame_types_follow_interval() {
        let resolution = Resolution::new(16, 16);
        let frames: Vec<_> = (0..5)
            .map(|i| RgbImage::filled(resolution, Rgb::new(10 * i, 20, 30)))
            .collect();
        let config = CodecConfig::default()
            .with_i_frame_interval(3)
            .with_search_area(2);

        let video = encode_video(&frames, &config).unwrap();
        let stream = Stream::from_bytes(video.as_bytes(), &config, StreamKind::Video).unwrap();

        let kinds: Vec<bool> = stream
            .frames
            .iter()
            .map(|frame| matches!(frame, Frame::Intra(_)))
            .collect();
        assert_eq!(kinds, [true, false, false, true, false]);
    }
}
