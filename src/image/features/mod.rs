use nalgebra as na;

use na::Vector2;
use crate::Float;

pub mod surf_feature;
pub mod matches;


pub trait Feature {
    fn get_x_image_float(&self) -> Float;
    fn get_y_image_float(&self) -> Float;
    /// Truncated, never rounded
    fn get_x_image(&self) -> usize { self.get_x_image_float().trunc() as usize }
    fn get_y_image(&self) -> usize { self.get_y_image_float().trunc() as usize }
    fn get_as_2d_point(&self) -> Vector2<Float> {
        Vector2::<Float>::new(self.get_x_image_float(), self.get_y_image_float())
    }
}

pub trait Oriented {
    fn get_orientation(&self) -> Float;
}

pub trait Scaled {
    fn get_scale(&self) -> Float;
}
