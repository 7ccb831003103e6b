extern crate image as image_rs;
extern crate nalgebra as na;

pub mod error;
pub mod image;
pub mod numerics;
pub mod io;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

pub use self::error::{SurfError, Result};
pub use self::image::Image;
pub use self::image::pyramid::surf::{surf_descriptors, surf_keypoints, surf_runtime_parameters::SurfRuntimeParameters};
pub use self::image::features::{matches::Match, surf_feature::KeyPoint};
pub use self::image::descriptors::surf_descriptor::{SurfDescriptor, VectorCell};
pub use self::image::matching::surf_matcher::match_descriptors;
