use tilecast_input::InputSource;
use tilecast_render::{PresentError, Presenter};
use tilecast_world::Splash;

/// A platform window: an input source that can also show frames.
pub trait Window: InputSource + Presenter {
    /// Show one splash image for its display time.
    ///
    /// Implementations keep dispatching input while the image is up so a
    /// quit request is not lost. The default shows nothing.
    fn flash_image(&mut self, splash: &Splash) -> Result<(), PresentError> {
        tracing::debug!(path = %splash.img_path, "splash skipped, window has no image support");
        Ok(())
    }
}
