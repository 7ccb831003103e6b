use rayon::prelude::*;

use crate::Float;
use crate::image::integral_image::IntegralImage;
use crate::numerics::{gaussian_2_d, angular_sector};
use super::KeyPoint;

/// Radius of the sampled disk in scale units
pub const ORIENTATION_RADIUS: isize = 6;
pub const ORIENTATION_SIGMA: Float = 2.0;

/// Dominant gradient direction around a keypoint in (-pi, pi].
///
/// Samples lie on the disk of radius 6 around the rounded keypoint position, offsets are truncated
/// after scaling. Each gaussian weighted haar response is binned by angle, the bins are smoothed by a
/// circular window of half width `sectors/12`, and the angle of the strongest window is returned.
pub fn orientation(integral_image: &IntegralImage, keypoint: &KeyPoint, sectors: usize) -> Float {
    assert!(sectors > 0);
    let scale = keypoint.scale;
    let x = keypoint.x.round() as isize;
    let y = keypoint.y.round() as isize;
    let lambda = (2.0*scale).round() as isize;

    let mut sector_x = vec![0.0 as Float; sectors];
    let mut sector_y = vec![0.0 as Float; sectors];

    for i in -ORIENTATION_RADIUS..ORIENTATION_RADIUS+1 {
        for j in -ORIENTATION_RADIUS..ORIENTATION_RADIUS+1 {
            if i*i + j*j > ORIENTATION_RADIUS*ORIENTATION_RADIUS {
                continue;
            }
            let sample_x = x + (i as Float*scale) as isize;
            let sample_y = y + (j as Float*scale) as isize;
            let response_x = integral_image.haar_x(sample_x, sample_y, lambda);
            let response_y = integral_image.haar_y(sample_x, sample_y, lambda);

            let theta = angular_sector(response_y.atan2(response_x), sectors);
            let gauss = gaussian_2_d(i as Float, j as Float, ORIENTATION_SIGMA);

            sector_x[theta] += response_x*gauss;
            sector_y[theta] += response_y*gauss;
        }
    }

    let half_window = (sectors/12) as isize;
    let mut window_x = vec![0.0 as Float; sectors];
    let mut window_y = vec![0.0 as Float; sectors];
    for i in 0..sectors {
        for j in -half_window..half_window+1 {
            let k = (i as isize + j).rem_euclid(sectors as isize) as usize;
            window_x[i] += sector_x[k];
            window_y[i] += sector_y[k];
        }
    }

    let mut best = 0;
    let mut best_norm = window_x[0]*window_x[0] + window_y[0]*window_y[0];
    for i in 1..sectors {
        let norm = window_x[i]*window_x[i] + window_y[i]*window_y[i];
        if best_norm < norm {
            best = i;
            best_norm = norm;
        }
    }

    window_y[best].atan2(window_x[best])
}

/// Returns copies of the keypoints with their orientation filled in, in input order.
pub fn orient_keypoints(integral_image: &IntegralImage, keypoints: &[KeyPoint], sectors: usize) -> Vec<KeyPoint> {
    keypoints.par_iter()
        .map(|kp| kp.with_orientation(orientation(integral_image, kp, sectors)))
        .collect()
}
