use rayon::prelude::*;

use crate::Float;
use crate::image::integral_image::IntegralImage;
use crate::image::filter::box_hessian_kernel::BoxHessianKernel;
use super::surf_runtime_parameters::SurfRuntimeParameters;

/// Hessian determinant and laplacian sign of one (octave, interval) pair, sampled every `sample` pixels.
#[derive(Debug,Clone)]
pub struct ScaleSpaceLevel {
    pub octave: usize,
    pub interval: usize,
    pub width: usize,
    pub height: usize,
    pub sample: usize,
    hessian_response: Vec<Float>,
    laplacian_sign: Vec<bool>
}

impl ScaleSpaceLevel {

    pub fn new(octave: usize, interval: usize, width: usize, height: usize, sample: usize, hessian_response: Vec<Float>, laplacian_sign: Vec<bool>) -> ScaleSpaceLevel {
        assert_eq!(hessian_response.len(), width*height);
        assert_eq!(laplacian_sign.len(), width*height);
        ScaleSpaceLevel { octave, interval, width, height, sample, hessian_response, laplacian_sign }
    }

    pub fn build_level(integral_image: &IntegralImage, octave: usize, interval: usize, width: usize, height: usize, sample: usize) -> ScaleSpaceLevel {
        let kernel = BoxHessianKernel::new(SurfRuntimeParameters::filter_size(octave, interval));
        let size = width*height;
        let mut hessian_response = Vec::<Float>::with_capacity(size);
        let mut laplacian_sign = Vec::<bool>::with_capacity(size);

        for y in 0..height {
            for x in 0..width {
                let x_image = (x*sample) as isize;
                let y_image = (y*sample) as isize;
                let (determinant, sign) = kernel.determinant_and_sign(integral_image, x_image, y_image);
                hessian_response.push(determinant);
                laplacian_sign.push(sign);
            }
        }

        ScaleSpaceLevel::new(octave, interval, width, height, sample, hessian_response, laplacian_sign)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({},{}) outside of level {}x{}", x, y, self.width, self.height);
        x + y*self.width
    }

    #[inline]
    pub fn response(&self, x: usize, y: usize) -> Float {
        self.hessian_response[self.index(x,y)]
    }

    #[inline]
    pub fn laplacian_sign(&self, x: usize, y: usize) -> bool {
        self.laplacian_sign[self.index(x,y)]
    }

    pub fn set_response(&mut self, x: usize, y: usize, value: Float) {
        let idx = self.index(x,y);
        self.hessian_response[idx] = value;
    }
}

#[derive(Debug,Clone)]
pub struct SurfOctave {
    pub octave: usize,
    /// 2^(octave+1)
    pub step: usize,
    pub sample: usize,
    pub width: usize,
    pub height: usize,
    pub levels: Vec<ScaleSpaceLevel>
}

impl SurfOctave {

    pub fn new(octave: usize, sample: usize, levels: Vec<ScaleSpaceLevel>) -> SurfOctave {
        assert!(!levels.is_empty());
        let width = levels[0].width;
        let height = levels[0].height;
        assert!(levels.iter().all(|l| l.width == width && l.height == height && l.sample == sample));
        SurfOctave { octave, step: SurfRuntimeParameters::octave_step(octave), sample, width, height, levels }
    }

    /// Levels are independent of each other and only read the integral image.
    pub fn build_octave(integral_image: &IntegralImage, octave: usize, runtime_parameters: &SurfRuntimeParameters) -> SurfOctave {
        let sample = runtime_parameters.octave_sample(octave);
        let (width, height) = integral_image.sample_size(sample);

        let levels = (0..runtime_parameters.interval_count)
            .into_par_iter()
            .map(|interval| ScaleSpaceLevel::build_level(integral_image, octave, interval, width, height, sample))
            .collect::<Vec<ScaleSpaceLevel>>();

        SurfOctave::new(octave, sample, levels)
    }

    pub fn interval_count(&self) -> usize {
        self.levels.len()
    }
}
