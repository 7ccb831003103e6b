use rand::{Rng, SeedableRng, rngs::SmallRng};
use std::fs;

use surf::{Float, Image, SurfError, SurfRuntimeParameters, surf_descriptors, surf_keypoints, match_descriptors};
use surf::io::{load_image, load_runtime_parameters, parse_runtime_parameters, serialize_runtime_parameters};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use nalgebra::DMatrix;
use surf::image::integral_image::IntegralImage;

fn blob(size: usize, center: Float, sigma: Float) -> Image {
    Image::from_fn(size, size, |x, y| {
        let dx = x as Float - center;
        let dy = y as Float - center;
        255.0*(-(dx*dx + dy*dy)/(2.0*sigma*sigma)).exp()
    }).unwrap()
}

fn random_image(seed: u64, width: usize, height: usize) -> Image {
    let mut rng = SmallRng::seed_from_u64(seed);
    let buffer = (0..width*height).map(|_| rng.gen_range(0.0..255.0)).collect::<Vec<Float>>();
    Image::new(width, height, buffer).unwrap()
}

#[test]
fn test_image_construction_errors() {
    assert!(matches!(Image::new(0, 4, vec![]), Err(SurfError::EmptyImage)));
    assert!(matches!(Image::new(3, 0, vec![]), Err(SurfError::EmptyImage)));
    assert!(matches!(Image::new(3, 4, vec![0.0; 11]), Err(SurfError::DimensionMismatch { expected: 12, actual: 11 })));
    assert!(Image::new(3, 4, vec![0.0; 12]).is_ok());
}

#[test]
fn test_colour_images_are_rejected() {
    let colour = DynamicImage::new_rgb8(8, 8);
    assert!(matches!(Image::from_dynamic_image(&colour), Err(SurfError::NotSingleChannel(_))));

    let gray = DynamicImage::ImageLuma8(GrayImage::from_fn(5, 3, |x, y| Luma([(x + 10*y) as u8])));
    let image = Image::from_dynamic_image(&gray).unwrap();
    assert_eq!((image.width(), image.height()), (5, 3));
    assert_eq!(image.get(4, 2), 24.0);

    let deep = DynamicImage::ImageLuma16(ImageBuffer::<Luma<u16>, Vec<u16>>::from_fn(4, 2, |x, y| Luma([(1000*x + 300*y) as u16])));
    let image = Image::from_dynamic_image(&deep).unwrap();
    assert_eq!((image.width(), image.height()), (4, 2));
    assert_eq!(image.get(3, 1), 3300.0);

    let float_colour = DynamicImage::new_rgb32f(4, 4);
    assert!(matches!(Image::from_dynamic_image(&float_colour), Err(SurfError::NotSingleChannel(_))));
}

#[test]
fn test_image_from_matrix_and_sampling() {
    let matrix = DMatrix::<Float>::from_fn(3, 5, |r, c| (10*r + c) as Float);
    let image = Image::from_matrix(&matrix).unwrap();
    assert_eq!((image.width(), image.height()), (5, 3));
    assert_eq!(image.get(4, 2), 24.0);
    assert_eq!(image.get(0, 1), 10.0);

    assert_eq!(image.sample_size(1), (5, 3));
    assert_eq!(image.sample_size(2), (2, 1));
    assert!(matches!(Image::from_matrix(&DMatrix::<Float>::zeros(0, 4)), Err(SurfError::EmptyImage)));

    let integral_image = IntegralImage::new(&image, 2);
    assert_eq!(integral_image.sample_size(2), image.sample_size(2));
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let image = random_image(1, 32, 32);
    let runtime_parameters = SurfRuntimeParameters { interval_count: 2, ..SurfRuntimeParameters::default() };
    assert!(matches!(surf_keypoints(&image, &runtime_parameters), Err(SurfError::InvalidParameter(_))));

    let runtime_parameters = SurfRuntimeParameters { match_ratio: 0.0, ..SurfRuntimeParameters::default() };
    assert!(matches!(surf_descriptors(&image, &runtime_parameters), Err(SurfError::InvalidParameter(_))));

    assert!(matches!(parse_runtime_parameters("octave_count: 0"), Err(SurfError::InvalidParameter(_))));
    assert!(matches!(parse_runtime_parameters("octave_count: 12"), Err(SurfError::InvalidParameter(_))));
    assert!(matches!(parse_runtime_parameters("interval_count: 1000000"), Err(SurfError::InvalidParameter(_))));
    assert!(matches!(parse_runtime_parameters("descriptor_grid_size: 400"), Err(SurfError::InvalidParameter(_))));
    assert!(matches!(parse_runtime_parameters("octave_count: [1, 2]"), Err(SurfError::Config(_))));
}

#[test]
fn test_runtime_parameters_yaml() {
    let runtime_parameters = SurfRuntimeParameters { hessian_threshold: 250.0, angular_sectors: 24, ..SurfRuntimeParameters::default() };
    let yaml = serialize_runtime_parameters(&runtime_parameters).unwrap();
    assert_eq!(parse_runtime_parameters(&yaml).unwrap(), runtime_parameters);

    let partial = parse_runtime_parameters("octave_count: 3\nmatch_ratio: 0.7\n").unwrap();
    assert_eq!(partial.octave_count, 3);
    assert_eq!(partial.match_ratio, 0.7);
    assert_eq!(partial.interval_count, 4);
    assert_eq!(partial.hessian_threshold, 1000.0);

    let path = std::env::temp_dir().join("surf_runtime_parameters_test.yaml");
    fs::write(&path, "hessian_threshold: 12.5\n").unwrap();
    let loaded = load_runtime_parameters(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(loaded.hessian_threshold, 12.5);
    assert_eq!(loaded.sampling, 2);

    assert!(matches!(load_runtime_parameters(std::env::temp_dir().join("surf_no_such_file.yaml")), Err(SurfError::Io(_))));
    assert!(load_image(std::env::temp_dir().join("surf_no_such_image.png")).is_err());
}

#[test]
fn test_blob_is_detected_at_its_center() {
    let image = blob(64, 32.0, 4.0);
    let runtime_parameters = SurfRuntimeParameters { hessian_threshold: 10.0, ..SurfRuntimeParameters::default() };
    let keypoints = surf_keypoints(&image, &runtime_parameters).unwrap();

    let centered = keypoints.iter().filter(|kp| {
        let dx = kp.x - 32.0;
        let dy = kp.y - 32.0;
        (dx*dx + dy*dy).sqrt() < 2.0
    }).collect::<Vec<_>>();
    assert!(!centered.is_empty(), "no keypoint near the blob among {:?}", keypoints);
    // bright blob, negative trace
    assert!(centered.iter().all(|kp| !kp.sign_laplacian));
    assert!(keypoints.iter().all(|kp| kp.scale > 0.0 && kp.scale <= runtime_parameters.max_scale()));
}

#[test]
fn test_flat_image_has_no_keypoints() {
    let image = Image::from_element(64, 48, 100.0).unwrap();
    let runtime_parameters = SurfRuntimeParameters { hessian_threshold: 0.0, ..SurfRuntimeParameters::default() };
    assert!(surf_keypoints(&image, &runtime_parameters).unwrap().is_empty());
    assert!(surf_descriptors(&image, &runtime_parameters).unwrap().is_empty());
}

#[test]
fn test_pipeline_is_deterministic() {
    let image = random_image(11, 96, 80);
    let runtime_parameters = SurfRuntimeParameters { hessian_threshold: 100.0, ..SurfRuntimeParameters::default() };

    let first = surf_descriptors(&image, &runtime_parameters).unwrap();
    let second = surf_descriptors(&image, &runtime_parameters).unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);

    let keypoints = surf_keypoints(&image, &runtime_parameters).unwrap();
    assert_eq!(keypoints.len(), first.len());
    for (kp, d) in keypoints.iter().zip(first.iter()) {
        assert_eq!(*kp, d.key_point);
        assert!(kp.orientation > -std::f64::consts::PI - 1e-12 && kp.orientation <= std::f64::consts::PI + 1e-12);
    }
}

#[test]
fn test_image_matches_itself() {
    let image = random_image(23, 96, 96);
    let runtime_parameters = SurfRuntimeParameters { hessian_threshold: 100.0, ..SurfRuntimeParameters::default() };
    let descriptors = surf_descriptors(&image, &runtime_parameters).unwrap();
    let matches = match_descriptors(&descriptors, &descriptors, &runtime_parameters);

    assert!(!matches.is_empty());
    assert!(matches.len() <= descriptors.len());
    for m in matches.iter() {
        assert_eq!(m.get_feature_one().key_point.sign_laplacian, m.get_feature_two().key_point.sign_laplacian);
        assert_eq!(m.get_feature_one().squared_distance_to(m.get_feature_two()), 0.0);
    }
}
