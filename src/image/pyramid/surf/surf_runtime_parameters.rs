use serde::{Serialize, Deserialize};
use crate::Float;
use crate::error::{SurfError, Result};

/// Sub samples per descriptor cell along each axis.
pub const DESCRIPTOR_SUB_SAMPLES: usize = 5;
pub const MAX_OCTAVE_COUNT: usize = 6;
pub const MAX_INTERVAL_COUNT: usize = 32;
/// Largest integral image border `validate` accepts.
pub const MAX_INTEGRAL_PADDING: usize = 2048;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfRuntimeParameters {
    pub octave_count: usize,
    pub interval_count: usize,
    /// Stride multiplier per octave
    pub sampling: usize,
    pub angular_sectors: usize,
    /// Cells per side of the descriptor grid
    pub descriptor_grid_size: usize,
    pub match_ratio: Float,
    pub hessian_threshold: Float,
    /// Rescale the input into [0,255] before integrating
    pub normalize_input: bool,
    /// Initial best and second best squared distance of the matcher
    pub max_match_distance_squared: Float
}

impl Default for SurfRuntimeParameters {
    fn default() -> SurfRuntimeParameters {
        SurfRuntimeParameters {
            octave_count: 4,
            interval_count: 4,
            sampling: 2,
            angular_sectors: 20,
            descriptor_grid_size: 4,
            match_ratio: 0.6,
            hessian_threshold: 1000.0,
            normalize_input: true,
            max_match_distance_squared: 3.0
        }
    }
}

impl SurfRuntimeParameters {

    pub fn validate(&self) -> Result<()> {
        match self {
            p if p.octave_count == 0 => Err(SurfError::InvalidParameter("octave_count must be positive".to_string())),
            p if p.octave_count > MAX_OCTAVE_COUNT => Err(SurfError::InvalidParameter(format!("octave_count of {} exceeds {}", p.octave_count, MAX_OCTAVE_COUNT))),
            p if p.interval_count < 3 => Err(SurfError::InvalidParameter(format!("interval_count must be at least 3, got {}", p.interval_count))),
            p if p.interval_count > MAX_INTERVAL_COUNT => Err(SurfError::InvalidParameter(format!("interval_count of {} exceeds {}", p.interval_count, MAX_INTERVAL_COUNT))),
            p if p.sampling == 0 => Err(SurfError::InvalidParameter("sampling must be positive".to_string())),
            p if p.angular_sectors == 0 => Err(SurfError::InvalidParameter("angular_sectors must be positive".to_string())),
            p if p.descriptor_grid_size == 0 => Err(SurfError::InvalidParameter("descriptor_grid_size must be positive".to_string())),
            p if !(p.match_ratio > 0.0 && p.match_ratio <= 1.0) => Err(SurfError::InvalidParameter(format!("match_ratio must lie in (0,1], got {}", p.match_ratio))),
            p if !p.hessian_threshold.is_finite() => Err(SurfError::InvalidParameter("hessian_threshold must be finite".to_string())),
            p if !(p.max_match_distance_squared > 0.0) => Err(SurfError::InvalidParameter("max_match_distance_squared must be positive".to_string())),
            p if p.integral_padding() > MAX_INTEGRAL_PADDING => Err(SurfError::InvalidParameter(format!("integral padding of {} exceeds {}", p.integral_padding(), MAX_INTEGRAL_PADDING))),
            _ => Ok(())
        }
    }

    /// 2^(octave+1), the filter size step within an octave.
    pub fn octave_step(octave: usize) -> usize {
        1 << (octave + 1)
    }

    /// Pixel stride of the levels of an octave.
    pub fn octave_sample(&self, octave: usize) -> usize {
        self.sampling.pow(octave as u32)
    }

    pub fn filter_size(octave: usize, interval: usize) -> usize {
        SurfRuntimeParameters::octave_step(octave)*(interval + 1) + 1
    }

    /// Upper bound on any keypoint scale the detector can emit.
    pub fn max_scale(&self) -> Float {
        let step = SurfRuntimeParameters::octave_step(self.octave_count - 1) as Float;
        0.4*(1.0 + step*(self.interval_count as Float))
    }

    /// Padding of the integral image such that no Hessian, orientation or descriptor query leaves it.
    /// Depends only on the parameters, never on the image size.
    pub fn integral_padding(&self) -> usize {
        let max_filter_size = SurfRuntimeParameters::filter_size(self.octave_count - 1, self.interval_count - 1) as Float;
        let max_scale = self.max_scale();

        let hessian_reach = 1.5*max_filter_size + 1.0;
        // 6 scale units of disk plus a haar response of half width 2*scale
        let orientation_reach = 8.0*max_scale + 1.0;
        let half_window = (DESCRIPTOR_SUB_SAMPLES*self.descriptor_grid_size) as Float/2.0;
        let descriptor_reach = (2.0 as Float).sqrt()*half_window*max_scale + max_scale + 1.0;

        hessian_reach.max(orientation_reach).max(descriptor_reach).ceil() as usize + 4
    }
}
