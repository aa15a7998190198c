use tracing::debug;

use crate::{
    colors::{clamp_byte, ycrcb_to_rgb},
    config::CodecConfig,
    error::{CodecError, Result},
    image::RgbImage,
    motion::reconstruct,
    plane::ColorFrame,
    quantization::{
        tables::{INTRA_QUANTIZATION_TABLE, RESIDUAL_QUANTIZATION_TABLE},
        unzigzag_and_dequantize,
    },
    subsample::fill_subsample,
};

use super::{CompressedImage, CompressedVideo, Frame, FrameCoder, PredictedFrame, Stream, StreamKind};

impl FrameCoder<'_> {
    pub(crate) fn decode_intra(&self, planes: &ColorFrame<i8>) -> ColorFrame<u8> {
        let samples = unzigzag_and_dequantize(planes, &INTRA_QUANTIZATION_TABLE)
            .map_planes(|plane| self.dct.idct(plane).map(|&sample| clamp_byte(sample)));

        self.crop(&samples)
    }

    pub(crate) fn decode_predicted(
        &self,
        reference: &ColorFrame<u8>,
        frame: &PredictedFrame,
    ) -> ColorFrame<u8> {
        let residual = unzigzag_and_dequantize(&frame.residual, &RESIDUAL_QUANTIZATION_TABLE)
            .map_planes(|plane| self.dct.idct(plane));
        let reference = self.pad_for_motion(reference);
        let vectors = &frame.vectors;

        let (macro_y, macro_crcb) = (self.config.macro_size_y, self.config.macro_size_crcb);
        let reconstructed = ColorFrame::new(
            reconstruct(&vectors.y, &reference.y, &residual.y, macro_y),
            reconstruct(&vectors.cr, &reference.cr, &residual.cr, macro_crcb),
            reconstruct(&vectors.cb, &reference.cb, &residual.cb, macro_crcb),
        );

        self.crop(&reconstructed)
    }
}

fn to_rgb(frame: &ColorFrame<u8>) -> RgbImage {
    ycrcb_to_rgb(&fill_subsample(frame))
}

pub fn decode_image(image: &CompressedImage) -> Result<RgbImage> {
    let config = CodecConfig::default();
    let stream = Stream::from_bytes(image.as_bytes(), &config, StreamKind::Image)?;

    let Some(Frame::Intra(planes)) = stream.frames.first() else {
        return Err(CodecError::format("image does not start with an intra frame"));
    };

    debug!(
        width = stream.resolution.width,
        height = stream.resolution.height,
        "decoding image"
    );
    let coder = FrameCoder::new(stream.resolution, &config);

    Ok(to_rgb(&coder.decode_intra(planes)))
}

// Decodes every frame of `video`. The config must match the one the video
// was encoded with, since frame types and macroblock sizes are not stored.
pub fn decode_video(video: &CompressedVideo, config: &CodecConfig) -> Result<Vec<RgbImage>> {
    config.validate()?;

    let stream = Stream::from_bytes(video.as_bytes(), config, StreamKind::Video)?;

    debug!(
        frames = stream.frames.len(),
        width = stream.resolution.width,
        height = stream.resolution.height,
        "decoding video"
    );

    Ok(decode_stream(&stream, config)?.iter().map(to_rgb).collect())
}

pub(crate) fn decode_stream(
    stream: &Stream,
    config: &CodecConfig,
) -> Result<Vec<ColorFrame<u8>>> {
    let coder = FrameCoder::new(stream.resolution, config);
    let mut decoded: Vec<ColorFrame<u8>> = Vec::with_capacity(stream.frames.len());

    for (index, frame) in stream.frames.iter().enumerate() {
        let reconstructed = match (frame, decoded.last()) {
            (Frame::Intra(planes), _) => coder.decode_intra(planes),
            (Frame::Predicted(predicted), Some(reference)) => {
                coder.decode_predicted(reference, predicted)
            }
            (Frame::Predicted(_), None) => {
                return Err(CodecError::format(format!(
                    "predicted frame {index} has no reference frame"
                )));
            }
        };

        decoded.push(reconstructed);
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec::encode::{encode_image, encode_stream, encode_video},
        colors::Rgb,
        image::Resolution,
    };

    fn moving_square(offset: u32) -> RgbImage {
        RgbImage::from_fn(Resolution::new(40, 24), |x, y| {
            if (offset..offset + 8).contains(&x) && (8..16).contains(&y) {
                Rgb::new(230, 40, 200)
            } else {
                Rgb::new((x * 5) as u8, (50 + y * 4) as u8, 90)
            }
        })
    }

    #[test]
    fn test_flat_gray_is_lossless() {
        let image = RgbImage::filled(Resolution::new(16, 16), Rgb::new(128, 128, 128));
        let encoded = encode_image(&image, &CodecConfig::default()).unwrap();

        assert_eq!(decode_image(&encoded).unwrap(), image);
    }

    #[test]
    fn test_truncated_image_is_rejected() {
        let image = RgbImage::from_fn(Resolution::new(13, 7), |x, y| {
            Rgb::new((x * 19) as u8, (y * 31) as u8, (x ^ y) as u8)
        });
        let encoded = encode_image(&image, &CodecConfig::default()).unwrap();
        let mut bytes = encoded.into_bytes();
        bytes.truncate(bytes.len() / 2);

        assert!(matches!(
            decode_image(&CompressedImage::from_bytes(bytes)),
            Err(CodecError::Format(_))
        ));
    }

    #[test]
    fn test_video_keeps_frame_count_and_size() {
        let resolution = Resolution::new(24, 17);
        let image = RgbImage::from_fn(resolution, |x, y| {
            Rgb::new((x * 10) as u8, (y * 12) as u8, 90)
        });
        let config = CodecConfig::default().with_search_area(4);
        let video = encode_video(&[image.clone(), image.clone(), image], &config).unwrap();
        let frames = decode_video(&video, &config).unwrap();

        assert_eq!(frames.len(), 3);
        for frame in &frames {
            assert_eq!(frame.resolution, resolution);
        }
    }

    #[test]
    fn test_encoder_references_match_decoded_frames() {
        let frames: Vec<_> = (0..12).map(|i| moving_square(i * 2)).collect();
        let config = CodecConfig::default()
            .with_i_frame_interval(5)
            .with_search_area(6);

        let (stream, references) = encode_stream(&frames, &config).unwrap();
        let parsed = Stream::from_bytes(&stream.to_bytes(), &config, StreamKind::Video).unwrap();
        assert_eq!(parsed, stream);

        let kinds: Vec<bool> = parsed
            .frames
            .iter()
            .map(|frame| matches!(frame, Frame::Intra(_)))
            .collect();
        assert_eq!(kinds.iter().filter(|&&intra| intra).count(), 3);
        assert!(!kinds[4] && kinds[5] && !kinds[6]);

        let decoded = decode_stream(&parsed, &config).unwrap();
        assert_eq!(decoded.len(), references.len());
        for (index, (decoded, reference)) in decoded.iter().zip(&references).enumerate() {
            assert_eq!(decoded, reference, "frame {index}");
        }

        let video = encode_video(&frames, &config).unwrap();
        let images = decode_video(&video, &config).unwrap();
        for (index, (image, reference)) in images.iter().zip(&references).enumerate() {
            assert_eq!(*image, to_rgb(reference), "frame {index}");
        }
    }

    #[test]
    fn test_decode_video_validates_config() {
        let video = CompressedVideo::from_bytes(vec![8, 0, 0, 0, 8, 0, 0, 0]);
        let config = CodecConfig::default().with_i_frame_interval(0);

        assert!(matches!(
            decode_video(&video, &config),
            Err(CodecError::UnsupportedConfig(_))
        ));
    }
}
