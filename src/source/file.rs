//! Image file loading.
//!
//! Files are decoded with the `image` crate and flattened to 8-bit RGB.
//! Alpha channels are dropped and 16-bit samples are narrowed, so every
//! supported format reaches the decoder in the same shape.

use super::{RgbFrame, SourceError};
use image::GenericImageView;
use std::path::Path;

/// Loads an image file and converts it to an [`RgbFrame`].
pub fn load_frame(path: impl AsRef<Path>) -> Result<RgbFrame, SourceError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    let img = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(ref io) if io.kind() == std::io::ErrorKind::NotFound => {
            SourceError::NotFound(path.to_path_buf())
        }
        other => SourceError::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    let (width, height) = img.dimensions();
    tracing::debug!(
        path = %path.display(),
        width,
        height,
        color = ?img.color(),
        "Loaded image"
    );

    Ok(RgbFrame::from(img.to_rgb8()))
}
