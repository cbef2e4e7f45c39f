//! Upload normalization pipeline.

mod normalize;
mod scale;

pub use normalize::{Config, Normalized, Normalizer};
pub use scale::{fit_within, resample};
