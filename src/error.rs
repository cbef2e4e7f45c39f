//! Custom error types for photonorm.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the photonorm library.
///
/// Only failures that make an upload unstorable show up here. An unrecognized
/// format or missing orientation metadata is a routing decision, not an error.
#[derive(Error, Debug)]
pub enum Error {
    /// The upload was classified as photographic but its pixels could not be decoded.
    #[error("failed to decode {format:?} upload: {reason}")]
    Decode {
        format: image::ImageFormat,
        reason: String,
    },

    /// Re-encoding the normalized buffer failed.
    #[error("failed to encode normalized image: {source}")]
    Encode {
        #[source]
        source: image::ImageError,
    },

    /// Image dimensions are not supported.
    #[error("unsupported image dimensions {width}x{height}: {reason}")]
    UnsupportedDimensions {
        width: u32,
        height: u32,
        reason: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Failed to read an upload from disk.
    #[error("failed to read upload from {path}: {source}")]
    ReadUpload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write normalized bytes to disk.
    #[error("failed to write image to {path}: {source}")]
    WriteImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for photonorm operations.
pub type Result<T> = std::result::Result<T, Error>;
