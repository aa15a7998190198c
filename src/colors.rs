use crate::{
    algebra::{Matrix3, Vec3},
    image::RgbImage,
    plane::{ColorFrame, Plane},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<&Rgb> for Vec3 {
    fn from(val: &Rgb) -> Self {
        Vec3([val.r as f64, val.g as f64, val.b as f64])
    }
}

impl From<Vec3> for Rgb {
    fn from(value: Vec3) -> Self {
        Rgb {
            r: clamp_byte(value.0[0]),
            g: clamp_byte(value.0[1]),
            b: clamp_byte(value.0[2]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YCrCb {
    pub y: u8,
    pub cr: u8,
    pub cb: u8,
}

impl YCrCb {
    pub const fn new(y: u8, cr: u8, cb: u8) -> Self {
        Self { y, cr, cb }
    }
}

impl From<&YCrCb> for Vec3 {
    fn from(val: &YCrCb) -> Self {
        Vec3([val.y as f64, val.cr as f64, val.cb as f64])
    }
}

impl From<Vec3> for YCrCb {
    fn from(value: Vec3) -> Self {
        YCrCb {
            y: clamp_byte(value.0[0]),
            cr: clamp_byte(value.0[1]),
            cb: clamp_byte(value.0[2]),
        }
    }
}

// BT.601 full range, outputs ordered (Y, Cr, Cb)
const RGB_TO_YCRCB_CONVERSION_TABLE: Matrix3 = Matrix3::new(
    [0.299, 0.5, -0.168736],
    [0.587, -0.418688, -0.331264],
    [0.114, -0.081312, 0.5],
);
const YCRCB_CONVERSION_OFFSET: Vec3 = Vec3::new(0., 128., 128.);

const YCRCB_TO_RGB_CONVERSION_TABLE: Matrix3 = Matrix3::new(
    [1., 1., 1.],
    [1.402, -0.714136, 0.],
    [0., -0.344136, 1.772],
);

impl From<&Rgb> for YCrCb {
    fn from(rgb: &Rgb) -> Self {
        let rgb_vec: Vec3 = rgb.into();

        Self::from(YCRCB_CONVERSION_OFFSET + rgb_vec * &RGB_TO_YCRCB_CONVERSION_TABLE)
    }
}

impl From<&YCrCb> for Rgb {
    fn from(ycrcb: &YCrCb) -> Self {
        let vec: Vec3 = ycrcb.into();

        Rgb::from((vec - YCRCB_CONVERSION_OFFSET) * &YCRCB_TO_RGB_CONVERSION_TABLE)
    }
}

#[inline]
pub fn clamp_byte(value: f64) -> u8 {
    value.round().clamp(u8::MIN as f64, u8::MAX as f64) as u8
}

pub fn rgb_to_ycrcb(image: &RgbImage) -> ColorFrame<u8> {
    let width = image.resolution.width as usize;
    let height = image.resolution.height as usize;
    let converted: Vec<YCrCb> = image.pixels.iter().map(YCrCb::from).collect();

    ColorFrame::new(
        Plane::from_fn(width, height, |x, y| converted[y * width + x].y),
        Plane::from_fn(width, height, |x, y| converted[y * width + x].cr),
        Plane::from_fn(width, height, |x, y| converted[y * width + x].cb),
    )
}

pub fn ycrcb_to_rgb(frame: &ColorFrame<u8>) -> RgbImage {
    debug_assert_eq!(frame.y.len(), frame.cr.len());
    debug_assert_eq!(frame.y.len(), frame.cb.len());

    let pixels = frame
        .y
        .samples()
        .iter()
        .zip(frame.cr.samples())
        .zip(frame.cb.samples())
        .map(|((&y, &cr), &cb)| Rgb::from(&YCrCb::new(y, cr, cb)))
        .collect();

    RgbImage::from_parts(frame.y.width() as u32, frame.y.height() as u32, pixels)
}
