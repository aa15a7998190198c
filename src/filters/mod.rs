use crate::image::RgbImage;

pub mod grayscale;

pub use grayscale::{ChromaFilter, GrayScaleFilter};

pub trait Filter {
    fn filter_image(&self, image: &RgbImage) -> RgbImage;

    fn filter_images(&self, images: &[RgbImage]) -> Vec<RgbImage> {
        images.iter().map(|image| self.filter_image(image)).collect()
    }
}

pub fn luma_view(image: &RgbImage) -> RgbImage {
    GrayScaleFilter.filter_image(image)
}

pub fn chroma_view(image: &RgbImage) -> RgbImage {
    ChromaFilter.filter_image(image)
}
