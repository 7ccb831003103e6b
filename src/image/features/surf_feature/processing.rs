extern crate nalgebra as na;

use na::{Matrix3, Vector3};

use crate::Float;
use crate::image::pyramid::surf::surf_octave::SurfOctave;
use super::{Extremum, KeyPoint};

/// Gradient and Hessian of the response in (x, y, interval) by central differences.
pub fn scale_space_derivatives(octave: &SurfOctave, extremum: &Extremum) -> (Vector3<Float>, Matrix3<Float>) {
    let (x, y, i) = (extremum.x, extremum.y, extremum.interval);
    let current = &octave.levels[i];
    let previous = &octave.levels[i-1];
    let next = &octave.levels[i+1];

    let center = current.response(x, y);

    let dx = (current.response(x+1, y) - current.response(x-1, y))/2.0;
    let dy = (current.response(x, y+1) - current.response(x, y-1))/2.0;
    let di = (next.response(x, y) - previous.response(x, y))/2.0;

    let dxx = current.response(x+1, y) + current.response(x-1, y) - 2.0*center;
    let dyy = current.response(x, y+1) + current.response(x, y-1) - 2.0*center;
    let dii = previous.response(x, y) + next.response(x, y) - 2.0*center;

    let dxy = (current.response(x+1, y+1) - current.response(x+1, y-1)
        - current.response(x-1, y+1) + current.response(x-1, y-1))/4.0;
    let dxi = (next.response(x+1, y) - next.response(x-1, y)
        - previous.response(x+1, y) + previous.response(x-1, y))/4.0;
    let dyi = (next.response(x, y+1) - next.response(x, y-1)
        - previous.response(x, y+1) + previous.response(x, y-1))/4.0;

    let gradient = Vector3::new(dx, dy, di);
    let hessian = Matrix3::new(dxx, dxy, dxi,
                               dxy, dyy, dyi,
                               dxi, dyi, dii);
    (gradient, hessian)
}

/// Offset (dx, dy, di) solving `H*offset = -gradient`, or None when H is singular.
pub fn interpolation_offset(gradient: &Vector3<Float>, hessian: &Matrix3<Float>) -> Option<Vector3<Float>> {
    match hessian.determinant() {
        det if det == 0.0 => None,
        _ => hessian.try_inverse().map(|inverse| -(inverse*gradient))
    }
}

/// A single Newton step on the response. Candidates too close to the level border,
/// with a singular system or with any offset component of magnitude 1 or more are dropped.
pub fn refine_extremum(octave: &SurfOctave, extremum: &Extremum) -> Option<KeyPoint> {
    let (x, y, i) = (extremum.x, extremum.y, extremum.interval);
    if x == 0 || y == 0 || x + 2 >= octave.width || y + 2 >= octave.height {
        log::trace!("octave {}: ({},{},{}) rejected at border", octave.octave, x, y, i);
        return None;
    }

    let (gradient, hessian) = scale_space_derivatives(octave, extremum);
    let offset = match interpolation_offset(&gradient, &hessian) {
        Some(offset) => offset,
        None => {
            log::trace!("octave {}: ({},{},{}) rejected, singular system", octave.octave, x, y, i);
            return None;
        }
    };

    if offset.iter().any(|v| !(v.abs() < 1.0)) {
        log::trace!("octave {}: ({},{},{}) rejected, unstable offset {:?}", octave.octave, x, y, i, offset.as_slice());
        return None;
    }

    let sample = octave.sample as Float;
    let step = octave.step as Float;
    let x_refined = sample*(x as Float + offset[0]) + 0.5;
    let y_refined = sample*(y as Float + offset[1]) + 0.5;
    let scale = 0.4*(1.0 + step*(i as Float + offset[2] + 1.0));

    Some(KeyPoint::new(x_refined, y_refined, scale, octave.levels[i].laplacian_sign(x, y)))
}
