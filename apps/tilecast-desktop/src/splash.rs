use image::imageops::FilterType;
use tilecast_render::{FrameBuffer, PresentError};

/// Decode an image file and scale it to exactly `width x height`.
pub fn load_splash_frame(path: &str, width: u32, height: u32) -> Result<FrameBuffer, PresentError> {
    let img = image::open(path).map_err(|e| PresentError::Backend(format!("splash {path}: {e}")))?;
    let rgba = image::imageops::resize(&img.to_rgba8(), width, height, FilterType::Triangle);
    FrameBuffer::from_rgba(width, height, rgba.into_raw())
        .map_err(|e| PresentError::Backend(format!("splash {path}: {e}")))
}
