//! Response metadata for serving stored photos.

use crate::image::CANONICAL_CONTENT_TYPE;

/// Cache directive for stored photos. Photo bytes never change once stored.
pub const CACHE_CONTROL: &str = "public, max-age=86400";

/// Content type for bytes nothing recognizes.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// How much of the stored bytes the sniffer looks at.
const SNIFF_LEN: usize = 512;

/// Headers to send alongside stored photo bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServeHeaders {
    pub content_type: &'static str,
    pub cache_control: &'static str,
}

/// Guess a content type from the leading bytes of a stored photo.
#[must_use]
pub fn content_type(stored: &[u8]) -> &'static str {
    let prefix = &stored[..stored.len().min(SNIFF_LEN)];
    infer::get(prefix).map_or(FALLBACK_CONTENT_TYPE, |kind| kind.mime_type())
}

/// Build response headers for stored bytes.
///
/// Pass `reencoded = true` when the bytes are known to come out of the
/// re-encoder; the canonical type is trusted and nothing is sniffed.
#[must_use]
pub fn headers(stored: &[u8], reencoded: bool) -> ServeHeaders {
    let content_type = if reencoded {
        CANONICAL_CONTENT_TYPE
    } else {
        content_type(stored)
    };

    ServeHeaders {
        content_type,
        cache_control: CACHE_CONTROL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::fixtures;

    #[test]
    fn test_sniffs_known_formats() {
        let img = fixtures::gradient(8, 8);
        assert_eq!(content_type(&fixtures::jpeg_bytes(&img)), "image/jpeg");
        assert_eq!(content_type(&fixtures::png_bytes(&img)), "image/png");
    }

    #[test]
    fn test_unknown_falls_back() {
        assert_eq!(content_type(b"plain words"), FALLBACK_CONTENT_TYPE);
        assert_eq!(content_type(&[]), FALLBACK_CONTENT_TYPE);
    }

    #[test]
    fn test_headers() {
        let sniffed = headers(b"plain words", false);
        assert_eq!(sniffed.content_type, FALLBACK_CONTENT_TYPE);
        assert_eq!(sniffed.cache_control, "public, max-age=86400");

        // Trusted even though these bytes would sniff as nothing.
        assert_eq!(headers(b"plain words", true).content_type, "image/jpeg");
    }
}
