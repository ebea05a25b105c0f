// Pick well separated colours for each root of a polynomial
//
// The hue wheel red -> magenta -> blue -> cyan -> green -> yellow is
// cut into one slice per root, and the colour darkens with the number
// of iterations it took to reach the root.

use image::Rgb;

use crate::polynomial::MAX_ITER;

// Six bands of 255 levels each
const WHEEL : usize = 1530;

pub fn colour(n_roots : usize, root_index : usize, iterations : usize) -> Rgb<u8> {
    assert!(n_roots > 0, "colour needs at least one root");
    assert!(root_index < n_roots, "root index out of range");
    let kth = root_index * WHEEL / n_roots;
    let k = (kth % 255) as u32;
    let base : [u32; 3] = match kth / 255 {
        0 => [255, 0, k],
        1 => [255 - k, 0, 255],
        2 => [0, k, 255],
        3 => [0, 255, 255 - k],
        4 => [k, 255, 0],
        _ => [255, 255 - k, 0]
    };
    let iterations = iterations as u32;
    Rgb([
        darken(base[0], iterations),
        darken(base[1], iterations),
        darken(base[2], iterations)
    ])
}

// Integer truncating fade to black as iterations approach MAX_ITER
fn darken(channel : u32, iterations : u32) -> u8 {
    (channel - iterations * channel / MAX_ITER as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_roots_sit_opposite_on_the_wheel() {
        assert_eq!(colour(2, 0, 0), Rgb([255, 0, 0]));
        assert_eq!(colour(2, 1, 0), Rgb([0, 255, 255]));
    }

    #[test]
    fn iterations_darken_the_colour() {
        assert_eq!(colour(2, 1, 5), Rgb([0, 213, 213]));
        assert_eq!(colour(2, 0, 10), Rgb([170, 0, 0]));
    }

    #[test]
    fn three_roots_split_the_wheel_in_thirds() {
        assert_eq!(colour(3, 0, 0), Rgb([255, 0, 0]));
        assert_eq!(colour(3, 1, 10), Rgb([0, 0, 170]));
        assert_eq!(colour(3, 2, 20), Rgb([0, 85, 0]));
    }

    #[test]
    fn max_iterations_is_black() {
        assert_eq!(colour(3, 2, MAX_ITER), Rgb([0, 0, 0]));
    }
}
