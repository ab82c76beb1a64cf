//! Normalization of an input image into a bounded base64 PNG payload.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

use crate::config::PreprocessConfig;
use crate::error::EncodingError;

/// Base64-encoded PNG ready to embed in a chat-completion message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    /// Base64 body (standard alphabet, padded)
    pub data: String,
    /// Width of the transmitted image
    pub width: u32,
    /// Height of the transmitted image
    pub height: u32,
}

impl EncodedPayload {
    pub const MEDIA_TYPE: &'static str = "image/png";

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", Self::MEDIA_TYPE, self.data)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Downscales and encodes images for transmission.
#[derive(Debug, Clone, Default)]
pub struct ImagePreprocessor {
    config: PreprocessConfig,
}

impl ImagePreprocessor {
    /// Create a preprocessor with the given configuration.
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Fit the image within the configured bounds and encode it as base64 PNG.
    ///
    /// Images already within bounds are left at their original size. Larger
    /// images are resized with Lanczos3 so the longer edge equals the bound.
    pub fn encode(&self, image: DynamicImage) -> Result<EncodedPayload, EncodingError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(EncodingError::EmptyImage { width, height });
        }

        let image = self.fit(image);
        let (width, height) = image.dimensions();

        let mut buffer = Cursor::new(Vec::new());
        png_compatible(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| EncodingError::Encode(e.to_string()))?;
        let bytes = buffer.into_inner();

        tracing::debug!("Encoded {width}x{height} PNG ({} bytes)", bytes.len());

        Ok(EncodedPayload {
            data: BASE64.encode(bytes),
            width,
            height,
        })
    }

    fn fit(&self, image: DynamicImage) -> DynamicImage {
        let max = self.config.max_dimension;
        let (width, height) = image.dimensions();
        if width <= max && height <= max {
            return image;
        }
        tracing::debug!("Downscaling {width}x{height} to fit {max}x{max}");
        image.resize(max, max, FilterType::Lanczos3)
    }
}

/// The PNG encoder has no floating-point color types.
fn png_compatible(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            DynamicImage::ImageRgba8(image.to_rgba8())
        }
        other => other,
    }
}
