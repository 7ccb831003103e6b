use image_rs::ImageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfError {
    #[error("image has no pixels")]
    EmptyImage,

    #[error("image buffer holds {actual} values but {expected} were expected")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("image must be single channel, got {0}")]
    NotSingleChannel(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("image loading failed: {0}")]
    ImageLoad(#[from] ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SurfError>;
