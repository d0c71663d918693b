use std::path::PathBuf;

use thiserror::Error;

/// Library error type for image-mage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The file extension is not recognised, or its decoder is not implemented.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The file does not exist or could not be decoded.
    #[error("unable to read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Normalization was asked to map an empty or inverted value window.
    #[error("degenerate display range: low {low} must be below high {high}")]
    DegenerateRange { low: f64, high: f64 },

    /// The histogram bin entry did not hold an integer in `1..=MAX_BIN_COUNT`.
    #[error("invalid bin count {0:?}")]
    InvalidBinCount(String),

    /// A sample array whose length disagrees with its declared shape.
    #[error("{len} samples do not fill a {width}x{height}x{depth} image")]
    ShapeMismatch {
        width: u32,
        height: u32,
        depth: u32,
        len: usize,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
