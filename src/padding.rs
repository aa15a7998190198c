use crate::{algebra::align_up, plane::Plane};

pub fn pad<T: Copy + Default>(plane: &Plane<T>, block_size: usize) -> Plane<T> {
    let width = align_up(plane.width(), block_size);
    let height = align_up(plane.height(), block_size);

    if width == plane.width() && height == plane.height() {
        return plane.clone();
    }

    Plane::from_fn(width, height, |x, y| {
        if x < plane.width() && y < plane.height() {
            plane.get(x, y)
        } else {
            T::default()
        }
    })
}

pub fn unpad<T: Copy>(plane: &Plane<T>, width: usize, height: usize) -> Plane<T> {
    debug_assert!(width <= plane.width() && height <= plane.height());

    if width == plane.width() && height == plane.height() {
        return plane.clone();
    }

    Plane::from_fn(width, height, |x, y| plane.get(x, y))
}
