use serde::{Serialize, Deserialize};
use crate::Float;

/// Accumulated haar responses of one descriptor cell, in the keypoint frame.
#[derive(Debug,Clone,Copy,Default,PartialEq,Serialize,Deserialize)]
pub struct VectorCell {
    pub sum_dx: Float,
    pub sum_dy: Float,
    pub sum_abs_dx: Float,
    pub sum_abs_dy: Float
}

impl VectorCell {
    pub fn new(sum_dx: Float, sum_dy: Float, sum_abs_dx: Float, sum_abs_dy: Float) -> VectorCell {
        VectorCell { sum_dx, sum_dy, sum_abs_dx, sum_abs_dy }
    }

    pub fn accumulate(&mut self, response_u: Float, response_v: Float) {
        self.sum_dx += response_u;
        self.sum_dy += response_v;
        self.sum_abs_dx += response_u.abs();
        self.sum_abs_dy += response_v.abs();
    }

    pub fn squared_magnitude(&self) -> Float {
        self.sum_dx*self.sum_dx + self.sum_dy*self.sum_dy + self.sum_abs_dx*self.sum_abs_dx + self.sum_abs_dy*self.sum_abs_dy
    }

    pub fn scaled(&self, factor: Float) -> VectorCell {
        VectorCell::new(self.sum_dx*factor, self.sum_dy*factor, self.sum_abs_dx*factor, self.sum_abs_dy*factor)
    }

    pub fn squared_distance_to(&self, other: &VectorCell) -> Float {
        (self.sum_dx - other.sum_dx).powi(2)
            + (self.sum_dy - other.sum_dy).powi(2)
            + (self.sum_abs_dx - other.sum_abs_dx).powi(2)
            + (self.sum_abs_dy - other.sum_abs_dy).powi(2)
    }

    pub fn as_array(&self) -> [Float; 4] {
        [self.sum_dx, self.sum_dy, self.sum_abs_dx, self.sum_abs_dy]
    }
}
