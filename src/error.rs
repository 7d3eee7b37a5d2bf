//! Error type shared by the generation pipeline.

use thiserror::Error;

/// Everything that can go wrong between input text and PNG bytes.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The input text was rejected before encoding.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The payload does not fit the largest symbol at the fixed
    /// error-correction level.
    #[error("payload needs {required} data codewords but version 40 holds {available}")]
    CapacityExceeded { required: usize, available: usize },

    /// Logo bytes were not a decodable raster image.
    #[error("logo image format not recognized")]
    UnsupportedFormat,

    /// PNG serialization failed.
    #[error("png encoding failed: {0}")]
    PngEncode(#[from] image::ImageError),
}
