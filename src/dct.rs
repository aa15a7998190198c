use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::plane::Plane;

pub const NUM_DCT_SIGNALS: usize = 8;

// 2 / sqrt(N * N)
const DCT_SCALE: f64 = 2. / NUM_DCT_SIGNALS as f64;

/// Direct (non-fast) 8x8 DCT-II and its inverse over whole planes.
///
/// Blocks on the right and bottom edge of a plane whose size is not a multiple
/// of 8 are transformed over the samples that exist only: every loop stops at
/// `min(8, remaining)` and the missing samples are neither read nor written.
/// Such truncated blocks do not round trip exactly; the codec pads planes first.
pub struct DiscreteCosineTransformer {
    cosines: [[f64; NUM_DCT_SIGNALS]; NUM_DCT_SIGNALS],
}

impl Default for DiscreteCosineTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscreteCosineTransformer {
    pub fn new() -> Self {
        let mut cosines = [[0.; NUM_DCT_SIGNALS]; NUM_DCT_SIGNALS];

        #[allow(clippy::needless_range_loop)]
        for frequency in 0..NUM_DCT_SIGNALS {
            for position in 0..NUM_DCT_SIGNALS {
                cosines[frequency][position] = f64::cos(
                    (2. * position as f64 + 1.) * frequency as f64 * PI
                        / (2. * NUM_DCT_SIGNALS as f64),
                );
            }
        }

        Self { cosines }
    }

    fn normalization(frequency: usize) -> f64 {
        if frequency == 0 {
            FRAC_1_SQRT_2
        } else {
            1.
        }
    }

    pub fn dct(&self, plane: &Plane<f64>) -> Plane<f64> {
        let mut amplitudes = Plane::filled(plane.width(), plane.height(), 0.);

        for_each_block(plane.width(), plane.height(), |left, top, cols, rows| {
            for u in 0..rows {
                for v in 0..cols {
                    let mut sum = 0.;

                    for x in 0..rows {
                        for y in 0..cols {
                            sum += plane.get(left + y, top + x)
                                * self.cosines[u][x]
                                * self.cosines[v][y];
                        }
                    }

                    let scale =
                        DCT_SCALE * Self::normalization(u) * Self::normalization(v);
                    amplitudes.set(left + v, top + u, sum * scale);
                }
            }
        });

        amplitudes
    }

    pub fn idct(&self, amplitudes: &Plane<f64>) -> Plane<f64> {
        let mut signal = Plane::filled(amplitudes.width(), amplitudes.height(), 0.);

        for_each_block(amplitudes.width(), amplitudes.height(), |left, top, cols, rows| {
            for x in 0..rows {
                for y in 0..cols {
                    let mut sum = 0.;

                    for u in 0..rows {
                        for v in 0..cols {
                            sum += amplitudes.get(left + v, top + u)
                                * self.cosines[u][x]
                                * self.cosines[v][y]
                                * Self::normalization(u)
                                * Self::normalization(v);
                        }
                    }

                    signal.set(left + y, top + x, sum * DCT_SCALE);
                }
            }
        });

        signal
    }
}

fn for_each_block(width: usize, height: usize, mut f: impl FnMut(usize, usize, usize, usize)) {
    for top in (0..height).step_by(NUM_DCT_SIGNALS) {
        for left in (0..width).step_by(NUM_DCT_SIGNALS) {
            let cols = NUM_DCT_SIGNALS.min(width - left);
            let rows = NUM_DCT_SIGNALS.min(height - top);

            f(left, top, cols, rows);
        }
    }
}
