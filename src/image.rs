use crate::{
    colors::Rgb,
    error::{CodecError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn check(&self) -> Result<()> {
        if self.width == 0
            || self.height == 0
            || self.width > i32::MAX as u32
            || self.height > i32::MAX as u32
        {
            return Err(CodecError::InvalidDimensions {
                width: self.width as i64,
                height: self.height as i64,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    pub resolution: Resolution,
    pub pixels: Vec<Rgb>,
}

impl RgbImage {
    pub fn new(resolution: Resolution, pixels: Vec<Rgb>) -> Result<Self> {
        if pixels.len() != resolution.pixel_count() {
            return Err(CodecError::BufferSize {
                expected: resolution.pixel_count(),
                actual: pixels.len(),
            });
        }

        Ok(Self { resolution, pixels })
    }

    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<Rgb>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);

        Self {
            resolution: Resolution::new(width, height),
            pixels,
        }
    }

    pub fn from_fn(resolution: Resolution, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        let pixels = (0..resolution.height)
            .flat_map(|y| (0..resolution.width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();

        Self { resolution, pixels }
    }

    pub fn filled(resolution: Resolution, color: Rgb) -> Self {
        Self {
            resolution,
            pixels: vec![color; resolution.pixel_count()],
        }
    }

    pub fn from_raw(resolution: Resolution, bytes: &[u8]) -> Result<Self> {
        let expected = resolution.pixel_count() * 3;

        if bytes.len() != expected {
            return Err(CodecError::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }

        let pixels = bytes
            .chunks_exact(3)
            .map(|rgb| Rgb::new(rgb[0], rgb[1], rgb[2]))
            .collect();

        Ok(Self { resolution, pixels })
    }

    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|px| [px.r, px.g, px.b])
            .collect()
    }

    pub fn check(&self) -> Result<()> {
        self.resolution.check()?;

        if self.pixels.len() != self.resolution.pixel_count() {
            return Err(CodecError::BufferSize {
                expected: self.resolution.pixel_count(),
                actual: self.pixels.len(),
            });
        }

        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.resolution.width
    }

    pub fn height(&self) -> u32 {
        self.resolution.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.pixels[y as usize * self.resolution.width as usize + x as usize]
    }
}
