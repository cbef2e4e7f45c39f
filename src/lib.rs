//! # photonorm
//!
//! Normalization of uploaded portrait photos before they are stored.
//!
//! JPEG uploads are turned upright according to their EXIF orientation,
//! fitted inside a bounding box without ever upscaling, and re-encoded as JPEG.
//! Anything else, including bytes that are not a recognizable image, is stored
//! exactly as uploaded. The [`serve`] module decides how stored bytes are
//! labelled when they are handed back out.
//!
//! ## Example
//!
//! ```no_run
//! use photonorm::{Config, Normalizer};
//!
//! # fn main() -> photonorm::Result<()> {
//! let normalizer = Normalizer::new(Config::default())?;
//!
//! let upload = std::fs::read("portrait.jpg").expect("readable upload");
//! let normalized = normalizer.normalize(&upload)?;
//! println!("storing {} bytes as {}", normalized.bytes().len(), normalized.content_type());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod pipeline;
pub mod serve;

pub use error::{Error, Result};
pub use pipeline::{Config, Normalized, Normalizer};
