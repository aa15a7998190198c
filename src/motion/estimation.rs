use rayon::prelude::*;
use tracing::trace;

use crate::{config::CodecConfig, plane::ColorFrame, plane::Plane};

use super::{MotionField, MotionVector};

/// How the best cost is compared with the cost of not moving at all. When
/// they compare equal the zero vector wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    Rounded,
    Exact,
}

impl TieBreak {
    fn is_tie(self, best: f64, zero: f64) -> bool {
        match self {
            TieBreak::Rounded => best.round_ties_even() == zero.round_ties_even(),
            TieBreak::Exact => best == zero,
        }
    }
}

pub fn estimate_motion(
    reference: &ColorFrame<u8>,
    current: &ColorFrame<u8>,
    config: &CodecConfig,
) -> MotionField {
    let estimate = |reference, current, macro_size, tie_break| {
        estimate_plane(
            reference,
            current,
            macro_size,
            config.search_area,
            tie_break,
            config.parallel,
        )
    };

    let field = MotionField {
        y: estimate(&reference.y, &current.y, config.macro_size_y, TieBreak::Rounded),
        cr: estimate(&reference.cr, &current.cr, config.macro_size_crcb, TieBreak::Exact),
        cb: estimate(&reference.cb, &current.cb, config.macro_size_crcb, TieBreak::Exact),
    };
    trace!(
        vectors = field.len(),
        zero = field.zero_count(),
        "estimated motion field"
    );

    field
}

/// Exhaustive search over `[-search_area, search_area]^2` for every
/// macroblock, keeping only displacements that leave the whole macroblock
/// inside the reference plane.
pub fn estimate_plane(
    reference: &Plane<u8>,
    current: &Plane<u8>,
    macro_size: usize,
    search_area: u8,
    tie_break: TieBreak,
    parallel: bool,
) -> Vec<MotionVector> {
    debug_assert_eq!(
        (reference.width(), reference.height()),
        (current.width(), current.height())
    );

    let rows: Vec<usize> = (0..current.height()).step_by(macro_size).collect();
    let search_row = |&y: &usize| -> Vec<MotionVector> {
        (0..current.width())
            .step_by(macro_size)
            .map(|x| {
                search_macroblock(reference, current, x, y, macro_size, search_area, tie_break)
            })
            .collect()
    };

    let vectors: Vec<Vec<MotionVector>> = if parallel {
        rows.par_iter().map(search_row).collect()
    } else {
        rows.iter().map(search_row).collect()
    };

    vectors.into_iter().flatten().collect()
}

fn search_macroblock(
    reference: &Plane<u8>,
    current: &Plane<u8>,
    x: usize,
    y: usize,
    macro_size: usize,
    search_area: u8,
    tie_break: TieBreak,
) -> MotionVector {
    let search_area = search_area as isize;
    let size = macro_size as isize;
    let mut best_vector = MotionVector::ZERO;
    let mut best_cost = f64::MAX;
    let mut zero_cost = f64::MAX;

    for i in -search_area..=search_area {
        for j in -search_area..=search_area {
            let left = x as isize + i;
            let top = y as isize + j;

            if left < 0
                || top < 0
                || left + size > reference.width() as isize
                || top + size > reference.height() as isize
            {
                continue;
            }

            let cost = mean_absolute_difference(
                current,
                reference,
                (x, y),
                (left as usize, top as usize),
                macro_size,
            );

            if i == 0 && j == 0 {
                zero_cost = cost;
            }

            if cost < best_cost {
                best_cost = cost;
                best_vector = MotionVector::new(i as i8, j as i8);
            }
        }
    }

    if tie_break.is_tie(best_cost, zero_cost) {
        MotionVector::ZERO
    } else {
        best_vector
    }
}

pub fn mean_absolute_difference(
    current: &Plane<u8>,
    reference: &Plane<u8>,
    (x, y): (usize, usize),
    (ref_x, ref_y): (usize, usize),
    macro_size: usize,
) -> f64 {
    let cols = macro_size.min(current.width() - x);
    let rows = macro_size.min(current.height() - y);
    let mut sum: u64 = 0;

    for l in 0..rows {
        for k in 0..cols {
            sum += current.get(x + k, y + l).abs_diff(reference.get(ref_x + k, ref_y + l)) as u64;
        }
    }

    sum as f64 / (macro_size * macro_size) as f64
}
