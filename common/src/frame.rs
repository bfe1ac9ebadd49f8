use image::{GrayImage, ImageReader};
use std::io::Cursor;

/// A decoded frame reduced to the single channel read as brightness.
///
/// Live frames and the base frame both come off the wire as encoded image
/// bytes (JPEG/PNG, format auto-detected); decoding collapses them to luma8
/// so detection only ever sees one brightness sample per pixel.
#[derive(Debug, Clone)]
pub struct Frame {
    pixels: GrayImage,
}

impl Frame {
    /// Decode encoded image bytes into a frame.
    pub fn decode(data: &[u8]) -> Result<Self, FrameError> {
        let img = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(FrameError::Probe)?
            .decode()
            .map_err(FrameError::Decode)?;
        Ok(Self {
            pixels: img.to_luma8(),
        })
    }

    /// Wrap an already-decoded luma grid.
    pub fn from_luma(pixels: GrayImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Bounds-checked brightness lookup. `None` when (x, y) lies outside the
    /// frame, which happens when a base frame is smaller than the live frame.
    pub fn brightness(&self, x: u32, y: u32) -> Option<u8> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0[0])
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("failed to probe image format: {0}")]
    Probe(std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
}
