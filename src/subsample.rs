use crate::{
    algebra::div_ceil,
    plane::{ColorFrame, Plane},
};

pub fn subsample(frame: &ColorFrame<u8>) -> ColorFrame<u8> {
    ColorFrame::new(
        frame.y.clone(),
        decimate(&frame.cr),
        decimate(&frame.cb),
    )
}

pub fn fill_subsample(frame: &ColorFrame<u8>) -> ColorFrame<u8> {
    let width = frame.y.width();
    let height = frame.y.height();

    ColorFrame::new(
        frame.y.clone(),
        expand(&frame.cr, width, height),
        expand(&frame.cb, width, height),
    )
}

pub fn chroma_dimensions(width: usize, height: usize) -> (usize, usize) {
    (div_ceil(width, 2), div_ceil(height, 2))
}

fn decimate(plane: &Plane<u8>) -> Plane<u8> {
    let (width, height) = chroma_dimensions(plane.width(), plane.height());

    Plane::from_fn(width, height, |x, y| plane.get(x * 2, y * 2))
}

fn expand(plane: &Plane<u8>, width: usize, height: usize) -> Plane<u8> {
    debug_assert_eq!(
        (plane.width(), plane.height()),
        chroma_dimensions(width, height)
    );

    Plane::from_fn(width, height, |x, y| plane.get(x / 2, y / 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: usize, height: usize) -> ColorFrame<u8> {
        ColorFrame::new(
            Plane::from_fn(width, height, |x, y| (x + y) as u8),
            Plane::from_fn(width, height, |x, y| (y * width + x) as u8),
            Plane::from_fn(width, height, |x, y| (200 - y * width - x) as u8),
        )
    }

    #[test]
    fn test_subsample_dimensions() {
        let sub = subsample(&frame(5, 3));
        assert_eq!((sub.y.width(), sub.y.height()), (5, 3));
        assert_eq!((sub.cr.width(), sub.cr.height()), (3, 2));
        assert_eq!((sub.cb.width(), sub.cb.height()), (3, 2));
    }

    #[test]
    fn test_subsample_keeps_even_positions() {
        let sub = subsample(&frame(5, 3));
        assert_eq!(sub.cr.samples(), &[0, 2, 4, 10, 12, 14]);
    }

    #[test]
    fn test_fill_follows_neighbour_rules() {
        let sub = subsample(&frame(5, 3));
        let filled = fill_subsample(&sub);
        let cr = filled.cr;

        for y in 0..3 {
            for x in 0..5 {
                let expected = if y % 2 == 0 && x % 2 == 0 {
                    sub.cr.get(x / 2, y / 2)
                } else if y % 2 == 0 {
                    cr.get(x - 1, y)
                } else {
                    cr.get(x, y - 1)
                };
                assert_eq!(cr.get(x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_fill_is_exact_for_2x2_constant_chroma() {
        let original = ColorFrame::new(
            Plane::filled(4, 4, 90),
            Plane::from_fn(4, 4, |x, y| ((x / 2) * 40 + (y / 2) * 7) as u8),
            Plane::from_fn(4, 4, |x, y| 255 - ((x / 2) * 40 + (y / 2) * 7) as u8),
        );
        assert_eq!(fill_subsample(&subsample(&original)), original);
    }
}
