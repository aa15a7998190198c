use jmpeg::{
    decode_image, encode_image, CodecConfig, CodecError, CompressedImage, Resolution, Rgb,
    RgbImage,
};

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(Resolution::new(width, height), |x, y| {
        Rgb::new((x * 8) as u8, (y * 8) as u8, (100 + x + y) as u8)
    })
}

fn mean_absolute_error(a: &RgbImage, b: &RgbImage) -> f64 {
    let total: u64 = a
        .to_raw()
        .iter()
        .zip(b.to_raw())
        .map(|(&x, y)| x.abs_diff(y) as u64)
        .sum();

    total as f64 / (a.pixels.len() * 3) as f64
}

#[test]
fn flat_gray_image_is_lossless() {
    let image = RgbImage::filled(Resolution::new(16, 16), Rgb::new(128, 128, 128));
    let encoded = encode_image(&image, &CodecConfig::default()).unwrap();

    assert_eq!(decode_image(&encoded).unwrap(), image);
}

#[test]
fn odd_sizes_keep_their_dimensions() {
    for (width, height) in [(1, 1), (2, 3), (7, 9), (13, 7), (17, 16), (31, 5)] {
        let image = gradient(width, height);
        let encoded = encode_image(&image, &CodecConfig::default()).unwrap();
        let decoded = decode_image(&encoded).unwrap();

        assert_eq!(decoded.resolution, image.resolution, "{width}x{height}");
    }
}

#[test]
fn smooth_image_survives_round_trip() {
    let image = gradient(21, 13);
    let encoded = encode_image(&image, &CodecConfig::default()).unwrap();
    let decoded = decode_image(&encoded).unwrap();

    let error = mean_absolute_error(&image, &decoded);
    assert!(error < 10., "mean absolute error {error}");
}

#[test]
fn header_holds_original_dimensions() {
    let encoded = encode_image(&gradient(13, 7), &CodecConfig::default()).unwrap();

    assert_eq!(&encoded.as_bytes()[..8], &[13, 0, 0, 0, 7, 0, 0, 0]);
}

#[test]
fn encoding_is_deterministic() {
    let image = gradient(24, 24);
    let first = encode_image(&image, &CodecConfig::default()).unwrap();
    let second = encode_image(&image, &CodecConfig::default().with_parallel(true)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn truncated_stream_is_a_format_error() {
    let encoded = encode_image(&gradient(16, 16), &CodecConfig::default()).unwrap();
    let bytes = encoded.as_bytes();

    for length in [0, 4, 7, 8, bytes.len() - 1] {
        let truncated = CompressedImage::from_bytes(&bytes[..length]);
        assert!(
            matches!(decode_image(&truncated), Err(CodecError::Format(_))),
            "length {length}"
        );
    }
}

#[test]
fn negative_dimensions_are_rejected() {
    let mut bytes = vec![0xff, 0xff, 0xff, 0xff, 8, 0, 0, 0];
    bytes.extend([0; 16]);

    assert!(matches!(
        decode_image(&CompressedImage::from_bytes(bytes)),
        Err(CodecError::InvalidDimensions { width: -1, height: 8 })
    ));
}

#[test]
fn bad_config_is_unsupported() {
    let image = gradient(8, 8);

    for config in [
        CodecConfig::default().with_search_area(16),
        CodecConfig::default().with_dct_block_size(4),
        CodecConfig::default().with_macro_sizes(12, 8),
        CodecConfig::default().with_i_frame_interval(0),
    ] {
        assert!(matches!(
            encode_image(&image, &config),
            Err(CodecError::UnsupportedConfig(_))
        ));
    }
}

#[test]
fn zero_sized_image_is_rejected() {
    let image = RgbImage::new(Resolution::new(0, 5), Vec::new()).unwrap();

    assert!(matches!(
        encode_image(&image, &CodecConfig::default()),
        Err(CodecError::InvalidDimensions { .. })
    ));
}
