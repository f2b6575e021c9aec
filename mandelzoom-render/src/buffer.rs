/// Color of pixels the rasterizer never writes (points inside the set).
pub const BACKGROUND: [u8; 3] = [0, 0, 0];

/// An RGB pixel buffer: 3 bytes per pixel, row-major, top-left origin.
///
/// The dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbBuffer {
    /// Create a buffer filled with [`BACKGROUND`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 3],
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.pixels[i..i + 3].copy_from_slice(&rgb);
    }

    /// Write one column of pixels top to bottom. `None` entries keep the
    /// current value.
    pub fn blit_column(&mut self, x: u32, column: &[Option<[u8; 3]>]) {
        debug_assert_eq!(column.len(), self.height as usize);
        for (y, rgb) in column.iter().enumerate() {
            if let Some(rgb) = rgb {
                self.set_pixel(x, y as u32, *rgb);
            }
        }
    }

    /// `true` if every pixel still holds the background color.
    pub fn is_blank(&self) -> bool {
        self.pixels
            .chunks_exact(3)
            .all(|px| px == BACKGROUND.as_slice())
    }
}
