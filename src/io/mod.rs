extern crate image as image_rs;

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::image::Image;
use crate::image::pyramid::surf::surf_runtime_parameters::SurfRuntimeParameters;

/// Loads a single channel image file. Colour files are rejected, not converted.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Image> {
    let dynamic_image = image_rs::open(path)?;
    Image::from_dynamic_image(&dynamic_image)
}

/// Loads any image file and converts it to 8 bit luma first.
pub fn load_image_as_gray<P: AsRef<Path>>(path: P) -> Result<Image> {
    let gray_image = image_rs::open(path)?.to_luma8();
    Image::from_gray_image(&gray_image)
}

/// Fields missing from the file keep their defaults. The result is validated.
pub fn load_runtime_parameters<P: AsRef<Path>>(path: P) -> Result<SurfRuntimeParameters> {
    let contents = fs::read_to_string(path)?;
    let runtime_parameters = parse_runtime_parameters(&contents)?;
    Ok(runtime_parameters)
}

pub fn parse_runtime_parameters(yaml: &str) -> Result<SurfRuntimeParameters> {
    let runtime_parameters: SurfRuntimeParameters = serde_yaml::from_str(yaml)?;
    runtime_parameters.validate()?;
    Ok(runtime_parameters)
}

pub fn serialize_runtime_parameters(runtime_parameters: &SurfRuntimeParameters) -> Result<String> {
    Ok(serde_yaml::to_string(runtime_parameters)?)
}
