//! Image loading utilities.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{ImageFormat, RgbImage};
use zune_jpeg::zune_core::bytestream::ZCursor;
use zune_jpeg::zune_core::colorspace::ColorSpace;
use zune_jpeg::zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

use crate::error::{Error, Result};

use super::Orientation;

/// Resolve the EXIF orientation of a photographic upload.
///
/// Missing or corrupt metadata, a missing tag, and values outside `1..=8` all
/// resolve to [`Orientation::Identity`]. None of these is an error.
#[must_use]
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(err) => {
            tracing::debug!("no usable EXIF data, assuming identity orientation: {err}");
            return Orientation::Identity;
        }
    };

    let code = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0));

    match code.and_then(Orientation::from_exif) {
        Some(orientation) => orientation,
        None => {
            tracing::debug!("orientation tag absent or out of range ({code:?}), assuming identity");
            Orientation::Identity
        }
    }
}

/// Decode a photographic upload into an RGB working buffer.
///
/// The decoded pixels are in stored order; EXIF orientation is not applied
/// here. The decoder runs in strict mode: truncated or corrupt scan data is an
/// error instead of being padded out.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the pixel data cannot be decoded.
pub fn decode_photo(bytes: &[u8]) -> Result<RgbImage> {
    let decode_error = |reason: String| Error::Decode {
        format: ImageFormat::Jpeg,
        reason,
    };

    let options = DecoderOptions::default()
        .set_strict_mode(true)
        .jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(ZCursor::new(bytes), options);

    let pixels = decoder.decode().map_err(|err| decode_error(err.to_string()))?;
    let (width, height) = decoder
        .dimensions()
        .ok_or_else(|| decode_error("no frame header".to_string()))?;

    let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(decode_error(format!("{width}x{height} does not fit in u32")));
    };

    RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| decode_error(format!("pixel data does not match {width}x{height} RGB")))
}
