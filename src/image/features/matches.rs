use serde::{Serialize, Deserialize};
use crate::image::features::Feature;
use std::marker::{Send,Sync};

/// `feature_one` comes from the queried set, `feature_two` from the searched one.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Match<T : Feature + Send + Sync> {
    feature_one: T,
    feature_two: T
}

impl<T: Feature + Send + Sync> Match<T> {
    pub fn new(feature_one: T, feature_two: T) -> Match<T> {
        Match {feature_one, feature_two}
    }
    pub fn get_feature_one(&self) -> &T {&self.feature_one}
    pub fn get_feature_two(&self) -> &T {&self.feature_two}
    /// Integer pixel of the first feature, by truncation.
    pub fn get_pixel_one(&self) -> (usize, usize) {
        (self.feature_one.get_x_image(), self.feature_one.get_y_image())
    }
}

impl<T: Feature + PartialEq + Send + Sync> PartialEq for Match<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.feature_one == other.feature_one) && (self.feature_two == other.feature_two)
    }
}
