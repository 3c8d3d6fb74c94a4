//! Pixel output.

use std::path::Path;

use image::{Rgb, RgbImage};
use lumen_math::Color;

use crate::RenderError;

/// Destination of rendered pixels.
///
/// Colors arrive unclamped; a sink maps them to its own range when written.
pub trait PixelSink {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Store the color of pixel `(x, y)`, `y` growing downwards.
    fn write_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// In-memory 8-bit RGB image.
///
/// Colors are clamped per channel to `[0, 1]` and quantized when written.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy into an `image` crate buffer for encoding.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| Rgb(self.get(x, y)))
    }

    /// Encode to `path`; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.to_image().save(path)?;
        Ok(())
    }
}

impl PixelSink for ImageBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let index = self.index(x, y);
        self.pixels[index] = color.to_rgb8();
    }
}

/// Paint every `interval`-th row and column with `color`.
///
/// Handy for checking the view plane layout before a full render.
pub fn draw_grid<S: PixelSink + ?Sized>(sink: &mut S, interval: u32, color: Color) {
    if interval == 0 {
        return;
    }
    for y in 0..sink.height() {
        for x in 0..sink.width() {
            if x % interval == 0 || y % interval == 0 {
                sink.write_pixel(x, y, color);
            }
        }
    }
}
