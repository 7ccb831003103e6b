use crate::Float;
use crate::image::Image;

/// Prefix sums over a mirror padded copy of an image.
///
/// Queries take image coordinates. Any coordinate within `padding` of the image is addressable;
/// staying inside that band is the caller's precondition and is only checked in debug builds.
/// Coordinates are integers: callers truncate floating positions before querying.
#[derive(Debug,Clone)]
pub struct IntegralImage {
    width: usize,
    height: usize,
    padding: usize,
    padded_width: usize,
    data: Vec<Float>
}

impl IntegralImage {

    pub fn new(image: &Image, padding: usize) -> IntegralImage {
        let padded = image.pad(padding);
        let padded_width = padded.width();
        let padded_height = padded.height();
        let source = padded.data();
        let mut data = vec![0.0 as Float; padded_width*padded_height];

        data[0] = source[0];
        for x in 1..padded_width {
            data[x] = data[x-1] + source[x];
        }

        for y in 1..padded_height {
            let mut row_sum = 0.0;
            for x in 0..padded_width {
                let idx = x + y*padded_width;
                row_sum += source[idx];
                data[idx] = data[idx - padded_width] + row_sum;
            }
        }

        IntegralImage { width: image.width(), height: image.height(), padding, padded_width, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Grid size of the source image sampled every `sample` pixels.
    pub fn sample_size(&self, sample: usize) -> (usize, usize) {
        (self.width/sample, self.height/sample)
    }

    /// Sum of all padded samples up to and including (x,y).
    #[inline]
    pub fn value(&self, x: isize, y: isize) -> Float {
        let px = x + self.padding as isize;
        let py = y + self.padding as isize;
        debug_assert!(px >= 0 && py >= 0 && (px as usize) < self.padded_width && (py as usize) < self.data.len()/self.padded_width,
            "({},{}) outside of padded integral image", x, y);
        self.data[px as usize + py as usize*self.padded_width]
    }

    /// Box sum spanning `(x-a-c, x-a] x (y-b-d, y-b]`. Negative extents flip the sign of the result.
    /// No normalisation is applied.
    #[inline]
    pub fn box_sum(&self, a: isize, b: isize, c: isize, d: isize, x: isize, y: isize) -> Float {
        let a1 = x - a;
        let a2 = y - b;
        let b1 = a1 - c;
        let b2 = a2 - d;
        self.value(b1, b2) + self.value(a1, a2) - self.value(b1, a2) - self.value(a1, b2)
    }

    /// Signed +1/-1 step response along x with half width `lambda`.
    #[inline]
    pub fn haar_x(&self, x: isize, y: isize, lambda: isize) -> Float {
        -(self.box_sum(1, -lambda - 1, -lambda - 1, 2*lambda + 1, x, y)
            + self.box_sum(0, -lambda - 1, lambda + 1, 2*lambda + 1, x, y))
    }

    /// Signed +1/-1 step response along y with half width `lambda`.
    #[inline]
    pub fn haar_y(&self, x: isize, y: isize, lambda: isize) -> Float {
        -(self.box_sum(-lambda - 1, 1, 2*lambda + 1, -lambda - 1, x, y)
            + self.box_sum(-lambda - 1, 0, 2*lambda + 1, lambda + 1, x, y))
    }
}
