use rayon::prelude::*;

use crate::error::Result;
use crate::image::Image;
use crate::image::integral_image::IntegralImage;
use crate::image::pyramid::Pyramid;
use crate::image::features::surf_feature::{KeyPoint, keypoints_from_pyramid, orientation::orient_keypoints};
use crate::image::descriptors::surf_descriptor::{SurfDescriptor, descriptors_for_keypoints};
use self::{surf_octave::SurfOctave, surf_runtime_parameters::SurfRuntimeParameters};

pub mod surf_octave;
pub mod surf_runtime_parameters;

/// Validates the parameters, optionally rescales the image to [0,255] and integrates it
/// with the padding the parameters require.
pub fn build_integral_image(image: &Image, runtime_parameters: &SurfRuntimeParameters) -> Result<IntegralImage> {
    runtime_parameters.validate()?;
    let padding = runtime_parameters.integral_padding();
    let integral_image = match runtime_parameters.normalize_input {
        true => IntegralImage::new(&image.normalized_to_gray_range(), padding),
        false => IntegralImage::new(image, padding)
    };
    Ok(integral_image)
}

pub fn build_surf_pyramid(integral_image: &IntegralImage, runtime_parameters: &SurfRuntimeParameters) -> Pyramid<SurfOctave> {
    let octaves = (0..runtime_parameters.octave_count)
        .into_par_iter()
        .map(|octave| SurfOctave::build_octave(integral_image, octave, runtime_parameters))
        .collect::<Vec<SurfOctave>>();

    for octave in octaves.iter() {
        log::debug!("octave {}: {}x{} levels sampled every {} pixels", octave.octave, octave.width, octave.height, octave.sample);
    }

    Pyramid {octaves}
}

/// Oriented keypoints in discovery order: octave, interval, row, column.
pub fn keypoints_from_integral_image(integral_image: &IntegralImage, runtime_parameters: &SurfRuntimeParameters) -> Vec<KeyPoint> {
    let pyramid = build_surf_pyramid(integral_image, runtime_parameters);
    let keypoints = keypoints_from_pyramid(&pyramid, runtime_parameters.hessian_threshold);
    orient_keypoints(integral_image, &keypoints, runtime_parameters.angular_sectors)
}

pub fn surf_keypoints(image: &Image, runtime_parameters: &SurfRuntimeParameters) -> Result<Vec<KeyPoint>> {
    let integral_image = build_integral_image(image, runtime_parameters)?;
    let keypoints = keypoints_from_integral_image(&integral_image, runtime_parameters);
    log::info!("{} keypoints in {}x{} image", keypoints.len(), image.width(), image.height());
    Ok(keypoints)
}

/// Full detection: pyramid, localisation, orientation and descriptors. Scale space state is dropped on return.
pub fn surf_descriptors(image: &Image, runtime_parameters: &SurfRuntimeParameters) -> Result<Vec<SurfDescriptor>> {
    let integral_image = build_integral_image(image, runtime_parameters)?;
    let keypoints = keypoints_from_integral_image(&integral_image, runtime_parameters);
    let descriptors = descriptors_for_keypoints(&integral_image, &keypoints, runtime_parameters.descriptor_grid_size);
    log::info!("{} descriptors in {}x{} image", descriptors.len(), image.width(), image.height());
    Ok(descriptors)
}
