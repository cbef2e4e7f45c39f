//! Header-based format detection.

use std::fmt;
use std::io::Cursor;

use image::{ImageFormat, ImageReader};

/// Format class of an upload, as far as the normalizer cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JPEG. Eligible for orientation correction and re-encoding.
    Photographic,
    /// Any other format whose header could be parsed. Stored as-is.
    OtherKnown(ImageFormat),
    /// No recognizable image header. Stored as-is.
    Unknown,
}

impl Format {
    /// Whether uploads of this format go through the normalization branch.
    #[must_use]
    pub const fn is_photographic(self) -> bool {
        matches!(self, Self::Photographic)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Photographic => f.write_str("photographic (jpeg)"),
            Self::OtherKnown(format) => write!(f, "{}", format_name(*format)),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

fn format_name(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("other")
}

/// Classify raw upload bytes by their header.
///
/// The magic bytes pick a candidate format and the header must then parse far
/// enough to report dimensions. Anything short of that is [`Format::Unknown`].
/// This never fails: an unknown format just means the upload skips
/// normalization.
#[must_use]
pub fn sniff_format(bytes: &[u8]) -> Format {
    let Ok(format) = image::guess_format(bytes) else {
        return Format::Unknown;
    };

    if let Err(err) = ImageReader::with_format(Cursor::new(bytes), format).into_dimensions() {
        tracing::debug!("{format:?} magic bytes matched but header did not parse: {err}");
        return Format::Unknown;
    }

    if format == ImageFormat::Jpeg {
        Format::Photographic
    } else {
        Format::OtherKnown(format)
    }
}

/// Read pixel dimensions from the header without decoding pixel data.
///
/// These are the stored dimensions, before any EXIF orientation is applied.
#[must_use]
pub fn header_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}
