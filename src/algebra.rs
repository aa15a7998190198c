use std::ops::{Add, Mul, Sub};

pub fn align_up(n: usize, alignment: usize) -> usize {
    let remainder = n % alignment;

    if remainder == 0 {
        n
    } else {
        n - remainder + alignment
    }
}

pub fn div_ceil(n: usize, divisor: usize) -> usize {
    align_up(n, divisor) / divisor
}

pub struct Matrix3(pub [Vec3; 3]);

impl Matrix3 {
    pub const fn new(x: [f64; 3], y: [f64; 3], z: [f64; 3]) -> Self {
        Self([Vec3(x), Vec3(y), Vec3(z)])
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3(pub [f64; 3]);

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Self::Output {
        Self([self.0[0] * rhs, self.0[1] * rhs, self.0[2] * rhs])
    }
}

impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
        ])
    }
}

impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self([
            self.0[0] - rhs.0[0],
            self.0[1] - rhs.0[1],
            self.0[2] - rhs.0[2],
        ])
    }
}

impl Mul<&Matrix3> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: &Matrix3) -> Self::Output {
        rhs.0[0] * self.0[0] + rhs.0[1] * self.0[1] + rhs.0[2] * self.0[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 8), 0);
        assert_eq!(align_up(1, 8), 8);
        assert_eq!(align_up(8, 8), 8);
        assert_eq!(align_up(13, 16), 16);
        assert_eq!(align_up(17, 16), 32);
    }

    #[test]
    fn test_div_ceil() {
        assert_eq!(div_ceil(15, 8), 2);
        assert_eq!(div_ceil(16, 8), 2);
        assert_eq!(div_ceil(17, 8), 3);
    }

    #[test]
    fn test_vector_matrix_product() {
        let identity = Matrix3::new([1., 0., 0.], [0., 1., 0.], [0., 0., 1.]);
        let v = Vec3::new(1., 2., 3.);
        assert_eq!(v * &identity, v);

        let swap = Matrix3::new([0., 1., 0.], [1., 0., 0.], [0., 0., 2.]);
        assert_eq!(v * &swap, Vec3::new(2., 1., 6.));
    }
}
