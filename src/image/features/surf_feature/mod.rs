use serde::{Serialize, Deserialize};
use rayon::prelude::*;
use std::fmt;

use crate::Float;
use crate::image::features::{Feature, Oriented, Scaled};
use crate::image::pyramid::Pyramid;
use crate::image::pyramid::surf::surf_octave::SurfOctave;

pub mod processing;
pub mod orientation;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct KeyPoint {
    pub x: Float,
    pub y: Float,
    pub scale: Float,
    /// Radians, zero until estimated
    pub orientation: Float,
    pub sign_laplacian: bool
}

impl KeyPoint {
    pub fn new(x: Float, y: Float, scale: Float, sign_laplacian: bool) -> KeyPoint {
        KeyPoint { x, y, scale, orientation: 0.0, sign_laplacian }
    }

    pub fn with_orientation(&self, orientation: Float) -> KeyPoint {
        KeyPoint { orientation, ..*self }
    }
}

impl Feature for KeyPoint {
    fn get_x_image_float(&self) -> Float { self.x }
    fn get_y_image_float(&self) -> Float { self.y }
}

impl Oriented for KeyPoint {
    fn get_orientation(&self) -> Float { self.orientation }
}

impl Scaled for KeyPoint {
    fn get_scale(&self) -> Float { self.scale }
}

impl fmt::Display for KeyPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x: {}, y: {}, s: {}, o: {}, l: {}", self.x, self.y, self.scale, self.orientation, self.sign_laplacian as u8)
    }
}

/// Integer level coordinates of an extremum before refinement.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct Extremum {
    pub x: usize,
    pub y: usize,
    pub interval: usize
}

/// Strict local maxima above `threshold` of level `interval` within its 3x3x3 neighbourhood.
/// Border pixels and the first and last interval are never candidates.
pub fn find_extrema(octave: &SurfOctave, interval: usize, threshold: Float) -> Vec<Extremum> {
    let mut extrema = Vec::<Extremum>::new();
    if interval == 0 || interval + 1 >= octave.interval_count() || octave.width < 3 || octave.height < 3 {
        return extrema;
    }

    for y in 1..octave.height-1 {
        for x in 1..octave.width-1 {
            if is_maximum(octave, x, y, interval, threshold) {
                extrema.push(Extremum { x, y, interval });
            }
        }
    }

    extrema
}

/// Any neighbour meeting or exceeding the candidate disqualifies it.
pub fn is_maximum(octave: &SurfOctave, x: usize, y: usize, interval: usize, threshold: Float) -> bool {
    let current = &octave.levels[interval];
    let previous = &octave.levels[interval-1];
    let next = &octave.levels[interval+1];

    let candidate = current.response(x, y);
    if !(candidate > threshold) {
        return false;
    }

    for j in y-1..y+2 {
        for i in x-1..x+2 {
            if previous.response(i, j) >= candidate || next.response(i, j) >= candidate {
                return false;
            }
            if (i != x || j != y) && current.response(i, j) >= candidate {
                return false;
            }
        }
    }

    true
}

/// Keypoints of one octave in interval, row, column order. Orientation is left at zero.
pub fn keypoints_from_octave(octave: &SurfOctave, threshold: Float) -> Vec<KeyPoint> {
    let interval_count = octave.interval_count();
    if interval_count < 3 {
        return Vec::new();
    }

    let per_interval = (1..interval_count-1)
        .into_par_iter()
        .map(|interval| {
            let extrema = find_extrema(octave, interval, threshold);
            let keypoints = extrema.iter().filter_map(|e| processing::refine_extremum(octave, e)).collect::<Vec<KeyPoint>>();
            log::debug!("octave {} interval {}: {} extrema, {} kept after refinement", octave.octave, interval, extrema.len(), keypoints.len());
            keypoints
        })
        .collect::<Vec<Vec<KeyPoint>>>();

    per_interval.into_iter().flatten().collect()
}

pub fn keypoints_from_pyramid(pyramid: &Pyramid<SurfOctave>, threshold: Float) -> Vec<KeyPoint> {
    pyramid.octaves.par_iter()
        .map(|octave| keypoints_from_octave(octave, threshold))
        .collect::<Vec<Vec<KeyPoint>>>()
        .into_iter()
        .flatten()
        .collect()
}
