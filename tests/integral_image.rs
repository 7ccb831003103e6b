use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;

use surf::{Float, Image};
use surf::image::{mirror_index, integral_image::IntegralImage};

fn random_image(width: usize, height: usize, seed: u64) -> Image {
    let mut rng = SmallRng::seed_from_u64(seed);
    let data = (0..width*height).map(|_| rng.gen_range(0.0..255.0)).collect::<Vec<Float>>();
    Image::new(width, height, data).unwrap()
}

fn brute_force_sum(padded: &Image, padding: usize, x_range: (isize, isize), y_range: (isize, isize)) -> Float {
    let mut sum = 0.0;
    for y in y_range.0..y_range.1 {
        for x in x_range.0..x_range.1 {
            sum += padded.get((x + padding as isize) as usize, (y + padding as isize) as usize);
        }
    }
    sum
}

#[test]
fn test_mirror_index() {
    assert_eq!(mirror_index(0, 5), 0);
    assert_eq!(mirror_index(4, 5), 4);
    assert_eq!(mirror_index(-1, 5), 1);
    assert_eq!(mirror_index(-4, 5), 4);
    assert_eq!(mirror_index(5, 5), 4);
    assert_eq!(mirror_index(6, 5), 3);
    assert_eq!(mirror_index(9, 5), 0);
    assert_eq!(mirror_index(10, 5), 0);
    assert_eq!(mirror_index(-12, 5), 2);
}

#[test]
fn test_padding_symmetry() {
    let (width, height, padding) = (9, 7, 4);
    let image = random_image(width, height, 1);
    let padded = image.pad(padding);
    let p = padding;

    assert_eq!(padded.width(), width + 2*padding);
    assert_eq!(padded.height(), height + 2*padding);

    for k in 1..padding+1 {
        for y in 0..height {
            // left and right
            assert_eq!(padded.get(p - k, y + p), image.get(k, y));
            assert_eq!(padded.get(p + width - 1 + k, y + p), image.get(width - k, y));
        }
        for x in 0..width {
            // top and bottom
            assert_eq!(padded.get(x + p, p - k), image.get(x, k));
            assert_eq!(padded.get(x + p, p + height - 1 + k), image.get(x, height - k));
        }
        // top left corner
        assert_eq!(padded.get(p - k, p - k), image.get(k, k));
    }

    for y in 0..height {
        for x in 0..width {
            assert_eq!(padded.get(x + p, y + p), image.get(x, y));
        }
    }
}

#[test]
fn test_integral_values_are_prefix_sums() {
    let (width, height, padding) = (6, 5, 3);
    let image = random_image(width, height, 2);
    let padded = image.pad(padding);
    let integral = IntegralImage::new(&image, padding);
    let p = padding as isize;

    assert_relative_eq!(integral.value(-p, -p), padded.get(0, 0), epsilon = 1e-9);
    let last_x = (width + padding - 1) as isize;
    let last_y = (height + padding - 1) as isize;
    assert_relative_eq!(integral.value(last_x, last_y), padded.data().iter().sum::<Float>(), max_relative = 1e-12);
    assert_relative_eq!(integral.value(2, 1), brute_force_sum(&padded, padding, (-p, 3), (-p, 2)), max_relative = 1e-12);
}

#[test]
fn test_box_sum_matches_brute_force() {
    let (width, height, padding) = (13, 11, 10);
    let image = random_image(width, height, 3);
    let padded = image.pad(padding);
    let integral = IntegralImage::new(&image, padding);
    let mut rng = SmallRng::seed_from_u64(4);

    for _ in 0..200 {
        let c = rng.gen_range(1..8isize);
        let d = rng.gen_range(1..8isize);
        let a = rng.gen_range(-2..3isize);
        let b = rng.gen_range(-2..3isize);
        let x = rng.gen_range(0..width as isize);
        let y = rng.gen_range(0..height as isize);
        // covers (x-a-c, x-a] x (y-b-d, y-b]
        let expected = brute_force_sum(&padded, padding, (x - a - c + 1, x - a + 1), (y - b - d + 1, y - b + 1));
        assert_relative_eq!(integral.box_sum(a, b, c, d, x, y), expected, epsilon = 1e-7);
    }

    // single pixel
    assert_relative_eq!(integral.box_sum(0, 0, 1, 1, 4, 7), image.get(4, 7), epsilon = 1e-9);
    // whole image
    let total = image.data().iter().sum::<Float>();
    let w = width as isize;
    let h = height as isize;
    assert_relative_eq!(integral.box_sum(0, 0, w, h, w - 1, h - 1), total, epsilon = 1e-7);
}

#[test]
fn test_negative_extents_flip_sign() {
    let image = random_image(10, 10, 5);
    let integral = IntegralImage::new(&image, 4);
    let forward = integral.box_sum(0, 0, 3, 2, 5, 5);
    let backward = integral.box_sum(3, 0, -3, 2, 5, 5);
    assert_relative_eq!(forward, -backward, epsilon = 1e-9);
}

#[test]
fn test_haar_responses_on_ramps() {
    let lambda: isize = 2;
    let expected = (lambda*(lambda + 1)*(2*lambda + 1)) as Float;

    let ramp_x = Image::from_fn(40, 40, |x, _| x as Float).unwrap();
    let integral_x = IntegralImage::new(&ramp_x, 8);
    assert_relative_eq!(integral_x.haar_x(20, 20, lambda), expected, epsilon = 1e-9);
    assert_relative_eq!(integral_x.haar_y(20, 20, lambda), 0.0, epsilon = 1e-9);

    let ramp_y = Image::from_fn(40, 40, |_, y| y as Float).unwrap();
    let integral_y = IntegralImage::new(&ramp_y, 8);
    assert_relative_eq!(integral_y.haar_y(20, 20, lambda), expected, epsilon = 1e-9);
    assert_relative_eq!(integral_y.haar_x(20, 20, lambda), 0.0, epsilon = 1e-9);

    let falling = Image::from_fn(40, 40, |x, _| (40 - x) as Float).unwrap();
    let integral_falling = IntegralImage::new(&falling, 8);
    assert_relative_eq!(integral_falling.haar_x(20, 20, lambda), -expected, epsilon = 1e-9);
}
