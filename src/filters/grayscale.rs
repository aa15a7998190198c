use crate::{
    colors::{Rgb, YCrCb},
    image::RgbImage,
};

use super::Filter;

const NEUTRAL_LUMA: u8 = 128;

pub struct GrayScaleFilter;

impl Filter for GrayScaleFilter {
    fn filter_image(&self, image: &RgbImage) -> RgbImage {
        RgbImage::from_fn(image.resolution, |x, y| {
            let luma = YCrCb::from(&image.pixel(x, y)).y;

            Rgb::new(luma, luma, luma)
        })
    }
}

pub struct ChromaFilter;

impl Filter for ChromaFilter {
    fn filter_image(&self, image: &RgbImage) -> RgbImage {
        RgbImage::from_fn(image.resolution, |x, y| {
            let color = YCrCb::from(&image.pixel(x, y));

            Rgb::from(&YCrCb::new(NEUTRAL_LUMA, color.cr, color.cb))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Resolution;

    #[test]
    fn test_grayscale_uses_luma() {
        let image = RgbImage::filled(Resolution::new(2, 2), Rgb::new(255, 0, 0));
        let gray = GrayScaleFilter.filter_image(&image);

        assert_eq!(gray.resolution, image.resolution);
        assert!(gray.pixels.iter().all(|&px| px == Rgb::new(76, 76, 76)));
    }

    #[test]
    fn test_chroma_of_gray_is_neutral() {
        let image = RgbImage::filled(Resolution::new(3, 1), Rgb::new(20, 20, 20));
        let chroma = ChromaFilter.filter_image(&image);

        assert!(chroma.pixels.iter().all(|&px| px == Rgb::new(128, 128, 128)));
    }

    #[test]
    fn test_filter_images() {
        let images = vec![RgbImage::filled(Resolution::new(1, 1), Rgb::new(0, 0, 255)); 2];
        let filtered = GrayScaleFilter.filter_images(&images);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[1].pixel(0, 0), Rgb::new(29, 29, 29));
    }
}
