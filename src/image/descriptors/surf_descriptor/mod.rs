extern crate nalgebra as na;

use na::{DVector, Vector2};
use serde::{Serialize, Deserialize};
use rayon::prelude::*;

use crate::Float;
use crate::image::integral_image::IntegralImage;
use crate::image::features::{Feature, Oriented, Scaled, surf_feature::KeyPoint};
use crate::image::pyramid::surf::surf_runtime_parameters::DESCRIPTOR_SUB_SAMPLES;
use crate::numerics::{gaussian_2_d, rotate_scale_translate};

pub mod vector_cell;

pub use self::vector_cell::VectorCell;

pub const DESCRIPTOR_SIGMA: Float = 3.3;

/// A keypoint with its grid of cells. Cells are stored row by row and compared index by index.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SurfDescriptor {
    pub key_point: KeyPoint,
    pub cells: Vec<VectorCell>
}

impl Feature for SurfDescriptor {
    fn get_x_image_float(&self) -> Float { self.key_point.x }
    fn get_y_image_float(&self) -> Float { self.key_point.y }
}

impl Oriented for SurfDescriptor {
    fn get_orientation(&self) -> Float { self.key_point.orientation }
}

impl Scaled for SurfDescriptor {
    fn get_scale(&self) -> Float { self.key_point.scale }
}

impl SurfDescriptor {

    pub fn from_cells(key_point: KeyPoint, cells: Vec<VectorCell>) -> SurfDescriptor {
        SurfDescriptor { key_point, cells }
    }

    /// Samples a rotated `grid_size` x `grid_size` grid of 5x5 sub regions around the oriented keypoint.
    ///
    /// Sample positions carry a 0.5 bias and are truncated to integer pixels before the integral image
    /// is queried; nothing is interpolated. The result has unit L2 norm unless every response vanished,
    /// in which case the zero vector is kept as is.
    pub fn new(integral_image: &IntegralImage, key_point: &KeyPoint, grid_size: usize) -> SurfDescriptor {
        let scale = key_point.scale;
        let lambda = scale.round() as isize;
        let orientation = key_point.orientation;
        let cos_p = orientation.cos();
        let sin_p = orientation.sin();
        let origin = Vector2::new(key_point.x, key_point.y);
        let half_grid = grid_size as Float/2.0;
        let sub_samples = DESCRIPTOR_SUB_SAMPLES as Float;

        let mut cells = Vec::<VectorCell>::with_capacity(grid_size*grid_size);
        for i in 0..grid_size {
            for j in 0..grid_size {
                let mut cell = VectorCell::default();
                for k in 0..DESCRIPTOR_SUB_SAMPLES {
                    for l in 0..DESCRIPTOR_SUB_SAMPLES {
                        let offset = Vector2::new(
                            (i as Float - half_grid)*sub_samples + k as Float + 0.5,
                            (j as Float - half_grid)*sub_samples + l as Float + 0.5);
                        let sample = rotate_scale_translate(&origin, &offset, orientation, scale);
                        let u = sample[0] as isize;
                        let v = sample[1] as isize;

                        let response_x = integral_image.haar_x(u, v, lambda);
                        let response_y = integral_image.haar_y(u, v, lambda);
                        let gauss = gaussian_2_d(offset[0], offset[1], DESCRIPTOR_SIGMA);

                        let response_u = gauss*(response_x*cos_p + response_y*sin_p);
                        let response_v = gauss*(-response_x*sin_p + response_y*cos_p);
                        cell.accumulate(response_u, response_v);
                    }
                }
                cells.push(cell);
            }
        }

        let norm = cells.iter().map(|c| c.squared_magnitude()).sum::<Float>().sqrt();
        let cells = match norm {
            n if n != 0.0 => cells.iter().map(|c| c.scaled(1.0/n)).collect(),
            _ => cells
        };

        SurfDescriptor { key_point: *key_point, cells }
    }

    pub fn len(&self) -> usize {
        4*self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flattened as (sum dx, sum dy, sum |dx|, sum |dy|) per cell.
    pub fn as_vector(&self) -> DVector<Float> {
        DVector::<Float>::from_iterator(self.len(), self.cells.iter().flat_map(|c| c.as_array().to_vec()))
    }

    pub fn squared_norm(&self) -> Float {
        self.cells.iter().map(|c| c.squared_magnitude()).sum()
    }

    pub fn squared_distance_to(&self, other: &SurfDescriptor) -> Float {
        debug_assert_eq!(self.cells.len(), other.cells.len());
        self.cells.iter().zip(other.cells.iter()).map(|(a,b)| a.squared_distance_to(b)).sum()
    }
}

/// One descriptor per oriented keypoint, in keypoint order.
pub fn descriptors_for_keypoints(integral_image: &IntegralImage, key_points: &[KeyPoint], grid_size: usize) -> Vec<SurfDescriptor> {
    key_points.par_iter()
        .map(|kp| SurfDescriptor::new(integral_image, kp, grid_size))
        .collect()
}
