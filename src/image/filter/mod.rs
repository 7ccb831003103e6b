pub mod box_hessian_kernel;

/// Weight of the mixed derivative in the box filter approximation of the Hessian determinant.
pub const HESSIAN_XY_WEIGHT: crate::Float = 0.8317;
