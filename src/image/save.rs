//! Image saving utilities.

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use crate::error::{Error, Result};

/// Encode an RGB buffer as JPEG at the given quality (1-100).
///
/// # Errors
///
/// Returns [`Error::UnsupportedDimensions`] for an empty buffer and
/// [`Error::Encode`] if the encoder fails.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::UnsupportedDimensions {
            width,
            height,
            reason: "cannot encode an empty image".to_string(),
        });
    }

    let mut output = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut output, quality);
    img.write_with_encoder(encoder)
        .map_err(|source| Error::Encode { source })?;

    Ok(output)
}
