use tilecast_input::{InputError, InputSource, MouseDelta, ScriptedInput, Subject};
use tilecast_render::{PresentError, Presenter};
use tilecast_world::Splash;

use crate::Window;

/// Off-screen window driven by a [`ScriptedInput`].
///
/// Presented frames are checked against the expected size and the last one
/// is kept. Each splash polls one scripted input frame, standing in for the
/// event pumping a real window does while the image is shown.
pub struct HeadlessWindow {
    input: ScriptedInput,
    width: u32,
    height: u32,
    presented: usize,
    last_frame: Option<Vec<u8>>,
    splashes: Vec<Splash>,
    failing_presents: usize,
}

impl HeadlessWindow {
    pub fn new(width: u32, height: u32, input: ScriptedInput) -> Self {
        Self {
            input,
            width,
            height,
            presented: 0,
            last_frame: None,
            splashes: Vec::new(),
            failing_presents: 0,
        }
    }

    pub fn input(&self) -> &ScriptedInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut ScriptedInput {
        &mut self.input
    }

    /// Number of frames accepted by `present`.
    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&[u8]> {
        self.last_frame.as_deref()
    }

    /// Splashes shown so far, in order.
    pub fn splashes(&self) -> &[Splash] {
        &self.splashes
    }

    /// Make the next `n` presents fail with a lost surface.
    pub fn fail_next_presents(&mut self, n: usize) {
        self.failing_presents = n;
    }
}

impl InputSource for HeadlessWindow {
    fn init(&mut self) -> Result<(), InputError> {
        self.input.init()?;
        tracing::info!(width = self.width, height = self.height, "headless window ready");
        Ok(())
    }

    fn subject_mut(&mut self) -> &mut Subject {
        self.input.subject_mut()
    }

    fn poll_events(&mut self) -> usize {
        self.input.poll_events()
    }

    fn mouse_delta(&mut self) -> MouseDelta {
        self.input.mouse_delta()
    }

    fn cleanup(&mut self) {
        self.input.cleanup();
        tracing::debug!(presented = self.presented, "headless window closed");
    }
}

impl Presenter for HeadlessWindow {
    fn present(&mut self, pixels: &[u8], row_bytes: usize) -> Result<(), PresentError> {
        if self.failing_presents > 0 {
            self.failing_presents -= 1;
            return Err(PresentError::SurfaceLost);
        }
        let expected = self.width as usize * self.height as usize * 4;
        if pixels.len() != expected || row_bytes != self.width as usize * 4 {
            return Err(PresentError::SizeMismatch {
                expected,
                found: pixels.len(),
            });
        }
        self.last_frame = Some(pixels.to_vec());
        self.presented += 1;
        Ok(())
    }
}

impl Window for HeadlessWindow {
    fn flash_image(&mut self, splash: &Splash) -> Result<(), PresentError> {
        self.splashes.push(splash.clone());
        self.input.poll_events();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilecast_render::FrameBuffer;

    #[test]
    fn accepts_matching_frames_only() {
        let mut window = HeadlessWindow::new(4, 2, ScriptedInput::new());
        FrameBuffer::new(4, 2).present_to(&mut window).unwrap();
        assert_eq!(window.presented(), 1);
        assert_eq!(window.last_frame().map(<[u8]>::len), Some(32));

        let err = FrameBuffer::new(3, 2).present_to(&mut window).unwrap_err();
        assert!(matches!(err, PresentError::SizeMismatch { expected: 32, found: 24 }));
        assert_eq!(window.presented(), 1);
    }

    #[test]
    fn injected_failures_are_consumed() {
        let mut window = HeadlessWindow::new(2, 2, ScriptedInput::new());
        window.fail_next_presents(1);
        let fb = FrameBuffer::new(2, 2);
        assert!(matches!(fb.present_to(&mut window), Err(PresentError::SurfaceLost)));
        fb.present_to(&mut window).unwrap();
        assert_eq!(window.presented(), 1);
    }

    #[test]
    fn splash_is_recorded_and_polls_input() {
        let mut input = ScriptedInput::new();
        input.push_mouse(0.0, 0.0);
        let mut window = HeadlessWindow::new(2, 2, input);
        window.flash_image(&Splash::new("intro.png", 3000)).unwrap();
        assert_eq!(window.splashes().len(), 1);
        assert_eq!(window.input().polls(), 1);
        assert_eq!(window.input().remaining(), 0);
    }
}
