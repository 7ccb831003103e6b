extern crate nalgebra as na;

use na::{Matrix2, Vector2};
use crate::{Float,float};

/// Isotropic 2D gaussian density at (x,y).
pub fn gaussian_2_d(x: Float, y: Float, sigma: Float) -> Float {
    let variance = sigma*sigma;
    1.0/(2.0*float::consts::PI*variance)*(-(x*x + y*y)/(2.0*variance)).exp()
}

pub fn rotation_matrix_2d_from_orientation(orientation: Float) -> Matrix2<Float> {

    Matrix2::new(orientation.cos(), -orientation.sin(),
                orientation.sin(), orientation.cos())

}

/// Rotates a local offset by `orientation`, scales it and moves it to `origin`.
pub fn rotate_scale_translate(origin: &Vector2<Float>, offset: &Vector2<Float>, orientation: Float, scale: Float) -> Vector2<Float> {
    origin + scale*(rotation_matrix_2d_from_orientation(orientation)*offset)
}

/// Index of the angular sector `angle` falls into. The quotient is truncated towards zero before wrapping.
pub fn angular_sector(angle: Float, sectors: usize) -> usize {
    let theta = (angle*(sectors as Float)/(2.0*float::consts::PI)) as isize;
    let wrapped = match theta {
        t if t < 0 => t + sectors as isize,
        t => t
    };
    (wrapped as usize).min(sectors-1)
}
