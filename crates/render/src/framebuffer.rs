use tilecast_common::Rgba;

use crate::RenderError;

/// Bytes per pixel. The format is fixed: R, G, B, A.
pub const BYTES_PER_PIXEL: usize = 4;

/// Owned RGBA pixel surface with fixed dimensions.
///
/// Read access is public; writes are limited to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    w: u32,
    h: u32,
    img: Vec<u8>,
}

impl FrameBuffer {
    /// Black, opaque surface of `w` x `h` pixels.
    pub fn new(w: u32, h: u32) -> Self {
        let mut img = vec![0; w as usize * h as usize * BYTES_PER_PIXEL];
        for px in img.chunks_exact_mut(BYTES_PER_PIXEL) {
            px[3] = 255;
        }
        Self { w, h, img }
    }

    /// Wrap already decoded RGBA bytes, e.g. a splash image.
    pub fn from_rgba(w: u32, h: u32, img: Vec<u8>) -> Result<Self, RenderError> {
        let expected = w as usize * h as usize * BYTES_PER_PIXEL;
        if img.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                found: img.len(),
            });
        }
        Ok(Self { w, h, img })
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    /// Raw pixel bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.img
    }

    /// Byte stride between consecutive rows.
    pub fn row_bytes(&self) -> usize {
        self.w as usize * BYTES_PER_PIXEL
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let i = self.index(x, y)?;
        let px = &self.img[i..i + BYTES_PER_PIXEL];
        Some(Rgba::from_bytes([px[0], px[1], px[2], px[3]]))
    }

    /// All pixels of one column, top to bottom.
    pub fn column(&self, x: u32) -> Vec<Rgba> {
        (0..self.h).filter_map(|y| self.pixel(x, y)).collect()
    }

    #[inline(always)]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.w || y >= self.h {
            return None;
        }
        Some((y as usize * self.w as usize + x as usize) * BYTES_PER_PIXEL)
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.img[i..i + BYTES_PER_PIXEL].copy_from_slice(&color.to_bytes());
        }
    }

    /// Paint rows `[y0, y1)` of column `x`. Out-of-range rows are ignored.
    pub(crate) fn fill_column(&mut self, x: u32, y0: u32, y1: u32, color: Rgba) {
        for y in y0..y1.min(self.h) {
            self.set(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_opaque_black() {
        let fb = FrameBuffer::new(3, 2);
        assert_eq!(fb.as_bytes().len(), 3 * 2 * 4);
        assert_eq!(fb.row_bytes(), 12);
        assert_eq!(fb.pixel(2, 1), Some(Rgba::BLACK));
        assert_eq!(fb.pixel(3, 0), None);
    }

    #[test]
    fn writes_land_at_row_major_offsets() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.set(1, 2, Rgba::rgb(9, 8, 7));
        let i = (2 * 4 + 1) * 4;
        assert_eq!(&fb.as_bytes()[i..i + 4], &[9, 8, 7, 255]);
        fb.set(10, 10, Rgba::WHITE);
    }

    #[test]
    fn fill_column_clips_to_height() {
        let mut fb = FrameBuffer::new(2, 3);
        fb.fill_column(1, 1, 99, Rgba::WHITE);
        assert_eq!(
            fb.column(1),
            vec![Rgba::BLACK, Rgba::WHITE, Rgba::WHITE]
        );
        assert_eq!(fb.column(0), vec![Rgba::BLACK; 3]);
    }

    #[test]
    fn from_rgba_checks_length() {
        assert!(FrameBuffer::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            FrameBuffer::from_rgba(2, 2, vec![0; 15]),
            Err(RenderError::BufferSize {
                expected: 16,
                found: 15
            })
        ));
    }
}
