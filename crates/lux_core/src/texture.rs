//! Fixed-size color grid used as the render target and for decoded images.

use lux_math::{clamp_color, Color};

/// A 2-D grid of linear colors, stored row-major with row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    /// Texture width in pixels
    width: u32,

    /// Texture height in pixels
    height: u32,

    /// Pixel data, `width * height` entries, row-major
    pixels: Vec<Color>,
}

impl Texture {
    /// Create a texture filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::ZERO)
    }

    /// Create a texture filled with one color.
    pub fn filled(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Create a texture from existing pixel data.
    ///
    /// Returns `None` if the pixel count does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} texture",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y). Panics when out of bounds.
    pub fn at(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Mutable access to the pixel at (x, y). Panics when out of bounds.
    pub fn at_mut(&mut self, x: u32, y: u32) -> &mut Color {
        let idx = self.index(x, y);
        &mut self.pixels[idx]
    }

    /// Set the pixel at (x, y). Panics when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        *self.at_mut(x, y) = color;
    }

    /// Nearest-pixel lookup at UV coordinates.
    ///
    /// UVs wrap around, with (0, 0) at the top-left pixel. An empty texture
    /// samples as black.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.pixels.is_empty() {
            return Color::ZERO;
        }

        let u = u - u.floor();
        let v = v - v.floor();

        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);

        self.at(x, y)
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Average over all pixels. Black for an empty texture.
    pub fn mean_color(&self) -> Color {
        if self.pixels.is_empty() {
            return Color::ZERO;
        }
        self.pixels.iter().copied().sum::<Color>() / self.pixels.len() as f32
    }

    /// Quantize to packed 8-bit RGB, top row first.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Convert a linear color to 8-bit channels, clamping first.
#[inline]
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let c = clamp_color(color) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8]
}
