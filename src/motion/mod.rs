use crate::{algebra::div_ceil, plane::Plane};

pub mod compensation;
pub mod estimation;

pub use compensation::{build_residual, reconstruct};
pub use estimation::{estimate_motion, estimate_plane, TieBreak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MotionVector {
    pub dx: i8,
    pub dy: i8,
}

impl MotionVector {
    pub const ZERO: MotionVector = MotionVector { dx: 0, dy: 0 };

    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn to_bytes(self) -> [u8; 2] {
        [self.dx as u8, self.dy as u8]
    }

    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self::new(bytes[0] as i8, bytes[1] as i8)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MotionField {
    pub y: Vec<MotionVector>,
    pub cr: Vec<MotionVector>,
    pub cb: Vec<MotionVector>,
}

impl MotionField {
    pub fn zero_count(&self) -> usize {
        [&self.y, &self.cr, &self.cb]
            .iter()
            .map(|vectors| vectors.iter().filter(|v| v.is_zero()).count())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.y.len() + self.cr.len() + self.cb.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn macroblock_count(width: usize, height: usize, macro_size: usize) -> usize {
    div_ceil(width, macro_size) * div_ceil(height, macro_size)
}

pub(crate) fn macroblock_origins<T>(
    plane: &Plane<T>,
    macro_size: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let width = plane.width();

    (0..plane.height())
        .step_by(macro_size)
        .flat_map(move |y| (0..width).step_by(macro_size).map(move |x| (x, y)))
}
