//! Image decoding, orientation, and encoding utilities.

mod format;
mod load;
mod orientation;
mod save;

#[cfg(test)]
pub(crate) mod fixtures;

pub use format::{header_dimensions, sniff_format, Format};
pub use load::{decode_photo, read_orientation};
pub use orientation::{mirror_horizontal, rotate_clockwise, Orientation};
pub use save::encode_jpeg;

use image::{ImageBuffer, Pixel};

/// Owned pixel buffer the orientation primitives operate on.
pub type PixelBuffer<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Default bounding box edge for stored photos.
pub const DEFAULT_MAX_DIMENSION: u32 = 512;

/// Default JPEG quality for re-encoded photos.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// MIME type of the canonical output format.
pub const CANONICAL_CONTENT_TYPE: &str = "image/jpeg";
