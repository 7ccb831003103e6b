extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::{GrayImage, DynamicImage, Pixel};
use image_rs::flat::NormalForm;
use na::DMatrix;

use crate::Float;
use crate::error::{SurfError, Result};

pub mod integral_image;
pub mod filter;
pub mod features;
pub mod descriptors;
pub mod pyramid;
pub mod matching;

/// Row-major single channel buffer. The value at (x,y) lives at `x + y*width`.
#[derive(Debug,Clone,PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    buffer: Vec<Float>
}

impl Image {

    pub fn new(width: usize, height: usize, buffer: Vec<Float>) -> Result<Image> {
        if width == 0 || height == 0 {
            return Err(SurfError::EmptyImage);
        }
        let expected = width*height;
        match buffer.len() {
            actual if actual != expected => Err(SurfError::DimensionMismatch { expected, actual }),
            _ => Ok(Image { width, height, buffer })
        }
    }

    pub fn from_element(width: usize, height: usize, value: Float) -> Result<Image> {
        Image::new(width, height, vec![value; width*height])
    }

    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Result<Image> where F: Fn(usize, usize) -> Float {
        let mut buffer = Vec::<Float>::with_capacity(width*height);
        for y in 0..height {
            for x in 0..width {
                buffer.push(f(x,y));
            }
        }
        Image::new(width, height, buffer)
    }

    /// Rows of the matrix become image rows.
    pub fn from_matrix(matrix: &DMatrix<Float>) -> Result<Image> {
        let (rows, cols) = matrix.shape();
        Image::from_fn(cols, rows, |x,y| matrix[(y,x)])
    }

    pub fn from_gray_image(gray_image: &GrayImage) -> Result<Image> {
        debug_assert!(gray_image.sample_layout().is_normal(NormalForm::RowMajorPacked));

        let (width, height) = gray_image.dimensions();
        let buffer = gray_image.pixels().map(|pixel| pixel.channels()[0] as Float).collect::<Vec<Float>>();
        Image::new(width as usize, height as usize, buffer)
    }

    /// Only 8 and 16 bit luma inputs are accepted. Converting colour images is left to the caller.
    pub fn from_dynamic_image(dynamic_image: &DynamicImage) -> Result<Image> {
        match dynamic_image {
            DynamicImage::ImageLuma8(gray_image) => Image::from_gray_image(gray_image),
            DynamicImage::ImageLuma16(gray_image) => {
                let (width, height) = gray_image.dimensions();
                let buffer = gray_image.pixels().map(|pixel| pixel.channels()[0] as Float).collect::<Vec<Float>>();
                Image::new(width as usize, height as usize, buffer)
            },
            other => Err(SurfError::NotSingleChannel(format!("{:?}", other.color())))
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn data(&self) -> &[Float] {
        &self.buffer
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({},{}) outside of {}x{}", x, y, self.width, self.height);
        x + y*self.width
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Float {
        self.buffer[self.index(x,y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: Float) {
        let idx = self.index(x,y);
        self.buffer[idx] = value;
    }

    /// Grid size of a level sampled every `sample` pixels.
    pub fn sample_size(&self, sample: usize) -> (usize, usize) {
        (self.width/sample, self.height/sample)
    }

    /// Linear rescale into [0,255]. A constant image is returned unchanged.
    pub fn normalized_to_gray_range(&self) -> Image {
        let min = self.buffer.iter().cloned().fold(Float::INFINITY, Float::min);
        let max = self.buffer.iter().cloned().fold(Float::NEG_INFINITY, Float::max);
        let range = max - min;
        let buffer = match range {
            r if r > 0.0 => self.buffer.iter().map(|v| 255.0*((v - min)/r)).collect::<Vec<Float>>(),
            _ => self.buffer.clone()
        };
        Image { width: self.width, height: self.height, buffer }
    }

    /// Extends the image by `padding` on every side, mirroring at the borders.
    pub fn pad(&self, padding: usize) -> Image {
        let padded_width = self.width + 2*padding;
        let padded_height = self.height + 2*padding;
        let mut buffer = Vec::<Float>::with_capacity(padded_width*padded_height);

        for y in 0..padded_height {
            let source_y = mirror_index(y as isize - padding as isize, self.height);
            for x in 0..padded_width {
                let source_x = mirror_index(x as isize - padding as isize, self.width);
                buffer.push(self.get(source_x, source_y));
            }
        }

        Image { width: padded_width, height: padded_height, buffer }
    }

}

/// Folds a coordinate back into `[0,extent)`: absolute value, periodize over `2*extent`, then reflect.
/// A coordinate `-k` maps to `k`, and `extent + k` maps to `extent - 1 - k`.
pub fn mirror_index(coordinate: isize, extent: usize) -> usize {
    let extent = extent as isize;
    let folded = coordinate.abs() % (2*extent);
    let reflected = match folded {
        c if c >= extent => 2*extent - c - 1,
        c => c
    };
    reflected as usize
}
