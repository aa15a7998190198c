use crate::error::{CodecError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane<T> {
    width: usize,
    height: usize,
    samples: Vec<T>,
}

impl<T> Plane<T> {
    pub fn new(width: usize, height: usize, samples: Vec<T>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(CodecError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            })?;

        if samples.len() != expected {
            return Err(CodecError::BufferSize {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut samples = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }

        Self {
            width,
            height,
            samples,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Plane<U> {
        Plane {
            width: self.width,
            height: self.height,
            samples: self.samples.iter().map(f).collect(),
        }
    }
}

impl<T: Copy> Plane<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            samples: vec![value; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.samples[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        self.samples[y * self.width + x] = value;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorFrame<T> {
    pub y: Plane<T>,
    pub cr: Plane<T>,
    pub cb: Plane<T>,
}

pub type TransformedFrame = ColorFrame<f64>;

impl<T> ColorFrame<T> {
    pub fn new(y: Plane<T>, cr: Plane<T>, cb: Plane<T>) -> Self {
        Self { y, cr, cb }
    }

    pub fn map_planes<U>(&self, mut f: impl FnMut(&Plane<T>) -> Plane<U>) -> ColorFrame<U> {
        ColorFrame {
            y: f(&self.y),
            cr: f(&self.cr),
            cb: f(&self.cb),
        }
    }

    pub fn planes(&self) -> [&Plane<T>; 3] {
        [&self.y, &self.cr, &self.cb]
    }
}
