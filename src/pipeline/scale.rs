//! Fit-within downscaling.

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::error::{Error, Result};

/// Compute the dimensions of `width` x `height` fitted inside `max_width` x `max_height`.
///
/// A single uniform scale `min(max_width / width, max_height / height)` is
/// applied to both axes and the results are truncated. Images that already fit
/// are returned unchanged: this never upscales.
///
/// A zero source dimension is malformed input; the bounding box is returned
/// as-is rather than failing.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (max_width, max_height);
    }

    let (w, h) = (f64::from(width), f64::from(height));
    let scale = (f64::from(max_width) / w).min(f64::from(max_height) / h);

    if scale >= 1.0 {
        return (width, height);
    }

    // Safe: scale < 1, so both products stay below the u32 source dimensions.
    ((w * scale) as u32, (h * scale) as u32)
}

/// Resample `img` to exactly `width` x `height` with a bilinear filter.
///
/// Returns the buffer untouched when the size already matches.
///
/// # Errors
///
/// Returns [`Error::UnsupportedDimensions`] if either target dimension is zero,
/// which happens when an extreme aspect ratio truncates one side away.
pub fn resample(img: RgbImage, width: u32, height: u32) -> Result<RgbImage> {
    if width == 0 || height == 0 {
        let (src_width, src_height) = img.dimensions();
        return Err(Error::UnsupportedDimensions {
            width: src_width,
            height: src_height,
            reason: format!("fitting into the bounding box leaves a {width}x{height} image"),
        });
    }

    if img.dimensions() == (width, height) {
        return Ok(img);
    }

    Ok(imageops::resize(&img, width, height, FilterType::Triangle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::fixtures;

    const SIZES: [u32; 9] = [1, 2, 7, 100, 299, 512, 513, 1024, 4000];

    #[test]
    fn test_never_upscales() {
        for &w in &SIZES {
            for &h in &SIZES {
                for &(max_w, max_h) in &[(512, 512), (4000, 4000), (640, 480)] {
                    if w <= max_w && h <= max_h {
                        assert_eq!(fit_within(w, h, max_w, max_h), (w, h), "{w}x{h} in {max_w}x{max_h}");
                    }
                }
            }
        }
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn test_downscale_fits_and_keeps_aspect() {
        for &w in &SIZES {
            for &h in &SIZES {
                for &(max_w, max_h) in &[(512, 512), (100, 300), (640, 480)] {
                    if w <= max_w && h <= max_h {
                        continue;
                    }
                    let (dw, dh) = fit_within(w, h, max_w, max_h);
                    assert!(dw <= max_w && dh <= max_h, "{w}x{h} -> {dw}x{dh}");
                    assert!(dw <= w && dh <= h);

                    // Truncation moves each side by less than one pixel.
                    let scale = (f64::from(max_w) / f64::from(w)).min(f64::from(max_h) / f64::from(h));
                    assert!((f64::from(w) * scale - f64::from(dw)).abs() < 1.0);
                    assert!((f64::from(h) * scale - f64::from(dh)).abs() < 1.0);
                }
            }
        }
    }

    #[test]
    fn test_known_fits() {
        assert_eq!(fit_within(4000, 3000, 512, 512), (512, 384));
        assert_eq!(fit_within(3000, 4000, 512, 512), (384, 512));
        assert_eq!(fit_within(768, 1024, 512, 512), (384, 512));
        assert_eq!(fit_within(300, 200, 512, 512), (300, 200));
        assert_eq!(fit_within(512, 512, 512, 512), (512, 512));
    }

    #[test]
    fn test_zero_dimensions_return_bounding_box() {
        assert_eq!(fit_within(0, 100, 512, 256), (512, 256));
        assert_eq!(fit_within(100, 0, 512, 256), (512, 256));
        assert_eq!(fit_within(0, 0, 64, 32), (64, 32));
    }

    #[test]
    fn test_extreme_aspect_truncates_to_zero() {
        assert_eq!(fit_within(10_000, 1, 512, 512), (512, 0));
    }

    #[test]
    fn test_resample_sizes() {
        let img = fixtures::gradient(40, 30);
        assert_eq!(resample(img.clone(), 20, 15).unwrap().dimensions(), (20, 15));
        assert_eq!(resample(img.clone(), 40, 30).unwrap(), img);
    }

    #[test]
    fn test_resample_rejects_zero_target() {
        let err = resample(fixtures::gradient(40, 30), 0, 15).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDimensions { width: 40, height: 30, .. }));
    }
}
