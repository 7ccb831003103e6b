extern crate surf;

use color_eyre::eyre::{eyre, Result};
use std::env;

use surf::{SurfRuntimeParameters, surf_descriptors, match_descriptors};
use surf::io::{load_image_as_gray, load_runtime_parameters};

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args = env::args().collect::<Vec<String>>();
    if args.len() < 3 {
        return Err(eyre!("usage: surf_match <image_a> <image_b> [parameters.yaml]"));
    }
    let runtime_parameters = match args.get(3) {
        Some(path) => load_runtime_parameters(path)?,
        None => SurfRuntimeParameters::default()
    };

    let image_a = load_image_as_gray(&args[1])?;
    let image_b = load_image_as_gray(&args[2])?;
    let descriptors_a = surf_descriptors(&image_a, &runtime_parameters)?;
    let descriptors_b = surf_descriptors(&image_b, &runtime_parameters)?;

    let matches = match_descriptors(&descriptors_a, &descriptors_b, &runtime_parameters);
    println!("{} / {} descriptors, {} matches", descriptors_a.len(), descriptors_b.len(), matches.len());
    for (i, m) in matches.iter().enumerate() {
        let a = &m.get_feature_one().key_point;
        let b = &m.get_feature_two().key_point;
        println!("{}: ({:.2},{:.2}) -> ({:.2},{:.2})", i + 1, a.x, a.y, b.x, b.y);
    }

    Ok(())
}
