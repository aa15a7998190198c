use crate::{colors::clamp_byte, plane::Plane};

use super::{macroblock_origins, MotionVector};

/// Calls `f(x, y, source_x, source_y)` for every sample of every macroblock
/// whose displaced source lies inside the plane. Samples displaced outside
/// the plane are skipped.
fn for_each_displaced<T>(
    plane: &Plane<T>,
    vectors: &[MotionVector],
    macro_size: usize,
    mut f: impl FnMut(usize, usize, usize, usize),
) {
    let width = plane.width() as isize;
    let height = plane.height() as isize;

    for ((x, y), vector) in macroblock_origins(plane, macro_size).zip(vectors) {
        for l in 0..macro_size {
            for k in 0..macro_size {
                let px = (x + k) as isize;
                let py = (y + l) as isize;
                let sx = px + vector.dx as isize;
                let sy = py + vector.dy as isize;

                if px < width && py < height && sx >= 0 && sy >= 0 && sx < width && sy < height
                {
                    f(px as usize, py as usize, sx as usize, sy as usize);
                }
            }
        }
    }
}

/// `current - reference[shifted]` per sample. Samples whose displaced source
/// falls outside the reference stay 0.
pub fn build_residual(
    vectors: &[MotionVector],
    reference: &Plane<u8>,
    current: &Plane<u8>,
    macro_size: usize,
) -> Plane<f64> {
    debug_assert_eq!(
        (reference.width(), reference.height()),
        (current.width(), current.height())
    );

    let mut residual = Plane::filled(current.width(), current.height(), 0.);
    for_each_displaced(current, vectors, macro_size, |x, y, sx, sy| {
        residual.set(x, y, current.get(x, y) as f64 - reference.get(sx, sy) as f64);
    });

    residual
}

/// `reference[shifted] + residual`, clamped to a byte. Samples whose
/// displaced source falls outside the reference stay 0.
pub fn reconstruct(
    vectors: &[MotionVector],
    reference: &Plane<u8>,
    residual: &Plane<f64>,
    macro_size: usize,
) -> Plane<u8> {
    debug_assert_eq!(
        (reference.width(), reference.height()),
        (residual.width(), residual.height())
    );

    let mut frame = Plane::filled(reference.width(), reference.height(), 0u8);
    for_each_displaced(reference, vectors, macro_size, |x, y, sx, sy| {
        frame.set(
            x,
            y,
            clamp_byte(reference.get(sx, sy) as f64 + residual.get(x, y)),
        );
    });

    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> Plane<u8> {
        Plane::from_fn(width, height, |x, y| (x * 7 + y * 3) as u8)
    }

    #[test]
    fn test_zero_vectors_give_plain_difference() {
        let reference = Plane::filled(16, 16, 100u8);
        let current = ramp(16, 16);
        let residual = build_residual(&[MotionVector::ZERO; 4], &reference, &current, 8);
        assert_eq!(residual.get(3, 5), current.get(3, 5) as f64 - 100.);
    }

    #[test]
    fn test_residual_round_trip() {
        let reference = ramp(32, 16);
        let current = Plane::from_fn(32, 16, |x, y| reference.get((x + 2) % 32, y));
        let vectors = [
            MotionVector::new(2, 0),
            MotionVector::new(2, 0),
            MotionVector::new(-3, 1),
            MotionVector::ZERO,
            MotionVector::new(0, -2),
            MotionVector::new(1, 1),
            MotionVector::ZERO,
            MotionVector::new(-1, 0),
        ];

        let residual = build_residual(&vectors, &reference, &current, 8);
        let restored = reconstruct(&vectors, &reference, &residual, 8);

        for y in 0..16 {
            for x in 0..32 {
                let index = (y / 8) * 4 + x / 8;
                let v = vectors[index];
                let sx = x as isize + v.dx as isize;
                let sy = y as isize + v.dy as isize;
                if (0..32).contains(&sx) && (0..16).contains(&sy) {
                    assert_eq!(restored.get(x, y), current.get(x, y), "({x}, {y})");
                } else {
                    assert_eq!(restored.get(x, y), 0, "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_out_of_bounds_offsets_stay_zero() {
        let reference = Plane::filled(8, 8, 50u8);
        let current = Plane::filled(8, 8, 80u8);
        let vectors = [MotionVector::new(-3, 0)];

        let residual = build_residual(&vectors, &reference, &current, 8);
        assert_eq!(residual.get(0, 4), 0.);
        assert_eq!(residual.get(2, 4), 0.);
        assert_eq!(residual.get(3, 4), 30.);

        let restored = reconstruct(&vectors, &reference, &residual, 8);
        assert_eq!(restored.get(2, 7), 0);
        assert_eq!(restored.get(3, 7), 80);
    }

    #[test]
    fn test_reconstruct_clamps() {
        let reference = Plane::filled(8, 8, 250u8);
        let residual = Plane::filled(8, 8, 20.);
        let restored = reconstruct(&[MotionVector::ZERO], &reference, &residual, 8);
        assert!(restored.samples().iter().all(|&v| v == 255));

        let residual = Plane::filled(8, 8, -300.);
        let restored = reconstruct(&[MotionVector::ZERO], &reference, &residual, 8);
        assert!(restored.samples().iter().all(|&v| v == 0));
    }
}
