//! Image normalization stages.
//!
//! - **decode**: Turn uploaded bytes into an in-memory image
//! - **encode**: Downscale and encode the image as a base64 PNG payload

pub mod decode;
pub mod encode;

// Re-exports for convenient access
pub use decode::ImageDecoder;
pub use encode::{EncodedPayload, ImagePreprocessor};
