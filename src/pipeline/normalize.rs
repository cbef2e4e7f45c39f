//! Upload normalization pipeline.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::image::{
    self, Format, Orientation, CANONICAL_CONTENT_TYPE, DEFAULT_JPEG_QUALITY, DEFAULT_MAX_DIMENSION,
};
use crate::serve;

use super::scale::{fit_within, resample};

/// Configuration for the normalization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum stored width in pixels.
    pub max_width: u32,

    /// Maximum stored height in pixels.
    pub max_height: u32,

    /// JPEG quality (1-100) for re-encoded photos.
    pub quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 {
            return Err(Error::InvalidParameter {
                name: "max_width".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.max_height == 0 {
            return Err(Error::InvalidParameter {
                name: "max_height".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if !(1..=100).contains(&self.quality) {
            return Err(Error::InvalidParameter {
                name: "quality".to_string(),
                reason: "must be between 1 and 100".to_string(),
            });
        }

        Ok(())
    }
}

/// Bytes ready for storage, tagged with how they were produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// A photo that was oriented, fitted and re-encoded as JPEG.
    Reencoded {
        bytes: Vec<u8>,
        width: u32,
        height: u32,
        orientation: Orientation,
    },
    /// Any other upload, byte-identical to what was received.
    PassThrough { bytes: Vec<u8>, format: Format },
}

impl Normalized {
    /// The bytes to store.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Reencoded { bytes, .. } | Self::PassThrough { bytes, .. } => bytes,
        }
    }

    /// Consume and return the bytes to store.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Reencoded { bytes, .. } | Self::PassThrough { bytes, .. } => bytes,
        }
    }

    /// Whether the pipeline rewrote the upload.
    #[must_use]
    pub const fn is_reencoded(&self) -> bool {
        matches!(self, Self::Reencoded { .. })
    }

    /// Content type to serve these bytes with.
    ///
    /// Re-encoded photos are known to be JPEG; pass-through bytes are sniffed.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Reencoded { .. } => CANONICAL_CONTENT_TYPE,
            Self::PassThrough { bytes, .. } => serve::content_type(bytes),
        }
    }
}

/// Normalizes uploaded photos for storage.
///
/// Holds nothing but its configuration; every call owns its buffers, so a
/// single instance can be shared across request handlers.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: Config,
}

impl Normalizer {
    /// Create a new normalizer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tracing::debug!("Initializing normalizer with config: {config:?}");

        Ok(Self { config })
    }

    /// The configuration this normalizer was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Normalize an upload.
    ///
    /// JPEG uploads are rotated upright according to their EXIF orientation,
    /// fitted inside the configured box without upscaling, and re-encoded.
    /// Everything else, including bytes that are not a recognizable image, is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if a JPEG upload cannot be decoded or re-encoded. There
    /// is no partial result: the upload should be rejected.
    pub fn normalize(&self, upload: &[u8]) -> Result<Normalized> {
        let format = image::sniff_format(upload);
        tracing::debug!("Format detected: {format} ({} bytes)", upload.len());

        if !format.is_photographic() {
            tracing::info!("Storing {format} upload unchanged");
            return Ok(Normalized::PassThrough {
                bytes: upload.to_vec(),
                format,
            });
        }

        let orientation = image::read_orientation(upload);
        tracing::debug!("Orientation resolved: {orientation:?}");

        let decoded = image::decode_photo(upload)?;
        let oriented = orientation.apply(decoded);

        let (width, height) = oriented.dimensions();
        let (dst_width, dst_height) =
            fit_within(width, height, self.config.max_width, self.config.max_height);
        let scaled = resample(oriented, dst_width, dst_height)?;
        tracing::debug!("Scaled {width}x{height} -> {dst_width}x{dst_height}");

        let bytes = image::encode_jpeg(&scaled, self.config.quality)?;
        tracing::info!(
            "Re-encoded photo at {dst_width}x{dst_height}, quality {} ({} -> {} bytes)",
            self.config.quality,
            upload.len(),
            bytes.len()
        );

        Ok(Normalized::Reencoded {
            bytes,
            width: dst_width,
            height: dst_height,
            orientation,
        })
    }

    /// Normalize the upload at `input_path` and write the result to `output_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be accessed or normalization fails.
    /// Nothing is written when normalization fails.
    pub fn normalize_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<Normalized> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        tracing::info!("Processing upload: {}", input_path.display());

        let upload = fs::read(input_path).map_err(|source| Error::ReadUpload {
            path: input_path.to_path_buf(),
            source,
        })?;

        let normalized = self.normalize(&upload)?;

        fs::write(output_path, normalized.bytes()).map_err(|source| Error::WriteImage {
            path: output_path.to_path_buf(),
            source,
        })?;

        Ok(normalized)
    }
}
