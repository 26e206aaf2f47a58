//! Still-image input for pose estimation.
//!
//! Decodes encoded images into the 8-bit `[height, width, 3]` RGB frames the
//! pose estimators take. Every pixel format the `image` crate understands is
//! converted to RGB8; alpha is dropped. Frames can be written back out for
//! inspecting overlays.

pub mod error;

pub use error::ImageError;

use crates_image::DynamicImage;
use log::debug;
use pose_base::Tensor;
use std::path::Path;

/// Decodes an image from raw bytes into an RGB frame.
///
/// The format is auto-detected.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub fn decode_frame(data: &[u8]) -> Result<Tensor<u8>, ImageError> {
    let img = crates_image::load_from_memory(data)?;
    let frame = to_frame(img)?;
    debug!("decoded {} bytes into frame {:?}", data.len(), frame.shape);
    Ok(frame)
}

/// Reads and decodes an image file into an RGB frame.
pub fn load_frame(path: impl AsRef<Path>) -> Result<Tensor<u8>, ImageError> {
    let data = std::fs::read(path.as_ref())?;
    decode_frame(&data)
}

/// Writes an RGB frame as an image file, format chosen by the extension.
pub fn save_frame(path: impl AsRef<Path>, frame: &Tensor<u8>) -> Result<(), ImageError> {
    let &[height, width, 3] = frame.shape.as_slice() else {
        return Err(ImageError::Encode(format!(
            "expected [H, W, 3] frame, got {:?}",
            frame.shape
        )));
    };
    let rgb = crates_image::RgbImage::from_raw(width as u32, height as u32, frame.data.clone())
        .ok_or_else(|| ImageError::Encode("frame data does not match its shape".to_string()))?;
    rgb.save(path.as_ref())
        .map_err(|err| ImageError::Encode(err.to_string()))
}

/// Converts a decoded image of any pixel type to an RGB8 frame.
pub fn to_frame(img: DynamicImage) -> Result<Tensor<u8>, ImageError> {
    let rgb = match img {
        DynamicImage::ImageRgb8(buf) => buf,
        other => other.to_rgb8(),
    };
    let (width, height) = rgb.dimensions();
    let shape = vec![height as usize, width as usize, 3];
    Ok(Tensor::new(shape, rgb.into_raw())?)
}
