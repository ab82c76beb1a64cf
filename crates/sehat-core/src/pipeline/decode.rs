//! Upload decoding with size limits and content-sniffed format detection.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

use crate::error::EncodingError;

/// Decodes uploaded bytes into an in-memory image.
#[derive(Debug, Clone)]
pub struct ImageDecoder {
    max_bytes: u64,
}

impl ImageDecoder {
    /// Create a decoder that rejects uploads larger than `max_bytes`.
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Decode an optional upload.
    ///
    /// A missing or zero-length upload is treated as "no image" rather than
    /// a failure, so the caller can show guidance instead of an error.
    pub async fn decode_upload(
        &self,
        bytes: Option<Vec<u8>>,
    ) -> Result<Option<DynamicImage>, EncodingError> {
        match bytes {
            Some(bytes) if !bytes.is_empty() => self.decode(bytes).await.map(Some),
            _ => Ok(None),
        }
    }

    /// Decode bytes on the blocking pool.
    pub async fn decode(&self, bytes: Vec<u8>) -> Result<DynamicImage, EncodingError> {
        let decoder = self.clone();
        tokio::task::spawn_blocking(move || decoder.decode_sync(&bytes))
            .await
            .map_err(|e| EncodingError::Decode(format!("Task join error: {e}")))?
    }

    /// Synchronous decode with validation.
    pub fn decode_sync(&self, bytes: &[u8]) -> Result<DynamicImage, EncodingError> {
        let size = bytes.len() as u64;
        if size > self.max_bytes {
            return Err(EncodingError::TooLarge {
                size_mb: size / (1024 * 1024),
                max_mb: self.max_bytes / (1024 * 1024),
            });
        }

        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| EncodingError::Decode(format!("Cannot detect image format: {e}")))?;
        let format = reader
            .format()
            .ok_or_else(|| EncodingError::Decode("Unrecognized image format".to_string()))?;
        let image = reader
            .decode()
            .map_err(|e| EncodingError::Decode(e.to_string()))?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(EncodingError::EmptyImage { width, height });
        }

        tracing::debug!(
            "Decoded {} upload: {width}x{height}, {size} bytes",
            format_to_string(format)
        );
        Ok(image)
    }
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::WebP => "webp",
        ImageFormat::Gif => "gif",
        ImageFormat::Tiff => "tiff",
        ImageFormat::Bmp => "bmp",
        _ => "other",
    }
}
