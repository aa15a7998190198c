use crate::{dct::NUM_DCT_SIGNALS, plane::Plane};

pub const BLOCK_LENGTH: usize = NUM_DCT_SIGNALS * NUM_DCT_SIGNALS;

#[rustfmt::skip]
pub const ZIGZAG_ORDER: [usize; BLOCK_LENGTH] = [
     0,  1,  8, 16,  9,  2,  3, 10,
    17, 24, 32, 25, 18, 11,  4,  5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13,  6,  7, 14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63,
];

pub fn zigzag_block<T: Copy>(block: &[T; BLOCK_LENGTH]) -> [T; BLOCK_LENGTH] {
    std::array::from_fn(|i| block[ZIGZAG_ORDER[i]])
}

pub fn unzigzag_block<T: Copy>(scanned: &[T; BLOCK_LENGTH]) -> [T; BLOCK_LENGTH] {
    let mut block = *scanned;

    for (i, &position) in ZIGZAG_ORDER.iter().enumerate() {
        block[position] = scanned[i];
    }

    block
}

// Partial blocks at the edge of an unaligned plane are left in raster order.
pub fn zigzag<T: Copy>(plane: &Plane<T>) -> Plane<T> {
    permute_blocks(plane, zigzag_block)
}

pub fn unzigzag<T: Copy>(plane: &Plane<T>) -> Plane<T> {
    permute_blocks(plane, unzigzag_block)
}

fn permute_blocks<T: Copy>(
    plane: &Plane<T>,
    permutation: fn(&[T; BLOCK_LENGTH]) -> [T; BLOCK_LENGTH],
) -> Plane<T> {
    let mut result = plane.clone();
    let full_cols = plane.width() / NUM_DCT_SIGNALS;
    let full_rows = plane.height() / NUM_DCT_SIGNALS;

    for block_row in 0..full_rows {
        for block_col in 0..full_cols {
            let left = block_col * NUM_DCT_SIGNALS;
            let top = block_row * NUM_DCT_SIGNALS;
            let block: [T; BLOCK_LENGTH] = std::array::from_fn(|i| {
                plane.get(left + i % NUM_DCT_SIGNALS, top + i / NUM_DCT_SIGNALS)
            });

            for (i, value) in permutation(&block).into_iter().enumerate() {
                result.set(left + i % NUM_DCT_SIGNALS, top + i / NUM_DCT_SIGNALS, value);
            }
        }
    }

    result
}
