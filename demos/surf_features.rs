extern crate surf;

use color_eyre::eyre::{eyre, Result};
use std::env;

use surf::{SurfRuntimeParameters, surf_descriptors};
use surf::io::{load_image_as_gray, load_runtime_parameters};

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args = env::args().collect::<Vec<String>>();
    let image_path = args.get(1).ok_or_else(|| eyre!("usage: surf_features <image> [parameters.yaml]"))?;
    let runtime_parameters = match args.get(2) {
        Some(path) => load_runtime_parameters(path)?,
        None => SurfRuntimeParameters::default()
    };

    let image = load_image_as_gray(image_path)?;
    let descriptors = surf_descriptors(&image, &runtime_parameters)?;

    println!("{} descriptors in {}", descriptors.len(), image_path);
    for descriptor in descriptors.iter() {
        println!("{}", descriptor.key_point);
    }

    Ok(())
}
