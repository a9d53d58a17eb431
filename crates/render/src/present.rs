use crate::FrameBuffer;

/// Errors from handing a frame to the presentation surface.
#[derive(Debug, thiserror::Error)]
pub enum PresentError {
    #[error("presentation surface lost")]
    SurfaceLost,
    #[error("frame is {found} bytes but the surface expects {expected}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("presentation backend error: {0}")]
    Backend(String),
}

/// Copies a raw pixel view onto a visible surface.
///
/// `pixels` is only valid for the duration of the call; implementations must
/// copy what they need before returning.
pub trait Presenter {
    fn present(&mut self, pixels: &[u8], row_bytes: usize) -> Result<(), PresentError>;
}

impl FrameBuffer {
    /// Hand this frame's raw view to a presenter for one call.
    pub fn present_to<P: Presenter + ?Sized>(&self, presenter: &mut P) -> Result<(), PresentError> {
        presenter.present(self.as_bytes(), self.row_bytes())
    }
}
