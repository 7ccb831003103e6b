use crate::Float;
use crate::image::integral_image::IntegralImage;
use super::HESSIAN_XY_WEIGHT;

/// Box approximation of the three second order gaussian derivatives for a filter of size `L`.
/// The offsets are the lobe positions of the xx/yy filters, precomputed once per interval.
#[derive(Debug,Clone,Copy)]
pub struct BoxHessianKernel {
    size: isize,
    lp1: isize,
    l3: isize,
    lp1d2: isize,
    mlp1p2: isize,
    l2p1: isize,
    norm_xx: Float,
    norm_xy: Float
}

impl BoxHessianKernel {

    pub fn new(size: usize) -> BoxHessianKernel {
        assert!(size > 0);
        let l = size as isize;
        let lp1 = -l + 1;
        let lp1d2 = (-l + 1)/2;
        BoxHessianKernel {
            size: l,
            lp1,
            l3: 3*l,
            lp1d2,
            mlp1p2: lp1d2 - l,
            l2p1: 2*l - 1,
            // Frobenius norms of the xx/yy and xy filters
            norm_xx: ((6*l*(2*l - 1)) as Float).sqrt(),
            norm_xy: (2*l) as Float
        }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Furthest pixel distance any lobe reaches from the center.
    pub fn reach(&self) -> usize {
        (3*self.size/2 + 1) as usize
    }

    /// Normalised (Dxx, Dyy, Dxy) at image position (x,y).
    #[inline]
    pub fn responses(&self, integral_image: &IntegralImage, x: isize, y: isize) -> (Float, Float, Float) {
        let l = self.size;

        let dxx = integral_image.box_sum(self.lp1, self.mlp1p2, self.l2p1, self.l3, x, y)
            - 3.0*integral_image.box_sum(self.lp1, self.lp1d2, self.l2p1, l, x, y);

        let dyy = integral_image.box_sum(self.mlp1p2, self.lp1, self.l3, self.l2p1, x, y)
            - 3.0*integral_image.box_sum(self.lp1d2, self.lp1, l, self.l2p1, x, y);

        let dxy = integral_image.box_sum(1, 1, l, l, x, y)
            + integral_image.box_sum(0, 0, -l, -l, x, y)
            + integral_image.box_sum(1, 0, l, -l, x, y)
            + integral_image.box_sum(0, 1, -l, l, x, y);

        (dxx/self.norm_xx, dyy/self.norm_xx, dxy/self.norm_xy)
    }

    /// Approximated Hessian determinant and the sign of the laplacian (true when positive).
    #[inline]
    pub fn determinant_and_sign(&self, integral_image: &IntegralImage, x: isize, y: isize) -> (Float, bool) {
        let (dxx, dyy, dxy) = self.responses(integral_image, x, y);
        (dxx*dyy - HESSIAN_XY_WEIGHT*dxy*dxy, dxx + dyy > 0.0)
    }
}
