mod font;

use hex_color::HexColor;

pub use font::{text_width, GLYPH_ADVANCE, GLYPH_HEIGHT};

/// Width (in pixels) of the canvas.
pub const CANVAS_WIDTH: usize = 200;
/// Height (in pixels) of the canvas.
pub const CANVAS_HEIGHT: usize = 120;

/// Axis aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// If the pixel lies inside the rectangle.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Low resolution RGBA drawing surface.
///
/// Everything is drawn here first and copied to the window framebuffer in one
/// go by [`Canvas::draw`].
pub struct Canvas {
    width: usize,
    height: usize,
    vram: Vec<HexColor>,
}

impl Canvas {
    /// Create a new canvas.
    ///
    /// # Arguments
    ///
    /// * `width` - The width of the canvas in pixels.
    /// * `height` - The height of the canvas in pixels.
    /// * `background` - The initial color of every pixel.
    pub fn new(width: usize, height: usize, background: HexColor) -> Self {
        Self {
            width,
            height,
            vram: vec![background; width * height],
        }
    }

    /// Color of a single pixel, or `None` outside the canvas.
    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<HexColor> {
        if x < self.width && y < self.height {
            Some(self.vram[x + y * self.width])
        } else {
            None
        }
    }

    /// Paint every pixel with the same color.
    pub fn fill(&mut self, color: HexColor) {
        self.vram.iter_mut().for_each(|pixel| *pixel = color);
    }

    /// Set a single pixel. Pixels outside the canvas are ignored.
    pub fn set(&mut self, x: usize, y: usize, color: HexColor) {
        if x < self.width && y < self.height {
            self.vram[x + y * self.width] = color;
        }
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: Rect, color: HexColor) {
        self.fill_rounded_rect(rect, 0, color);
    }

    /// Fill a rectangle with its corners cut off.
    ///
    /// # Arguments
    ///
    /// * `rect` - The area to fill.
    /// * `radius` - How many pixels to cut diagonally off each corner.
    /// * `color` - The fill color.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: usize, color: HexColor) {
        for dy in 0..rect.height {
            let edge_y = dy.min(rect.height - 1 - dy);

            for dx in 0..rect.width {
                let edge_x = dx.min(rect.width - 1 - dx);

                if edge_x < radius && edge_y < radius && edge_x + edge_y < radius {
                    continue;
                }
                self.set(rect.x + dx, rect.y + dy, color);
            }
        }
    }

    /// Draw a line of text with its top left corner at `x`, `y`.
    ///
    /// Every font pixel becomes a `scale` by `scale` block. Characters
    /// without a glyph leave a gap.
    pub fn text(&mut self, x: usize, y: usize, scale: usize, text: &str, color: HexColor) {
        for (i, c) in text.chars().enumerate() {
            let rows = match font::glyph(c) {
                Some(rows) => rows,
                None => continue,
            };
            let origin_x = x + i * GLYPH_ADVANCE * scale;

            for (y_line, row) in rows.iter().enumerate() {
                for x_line in 0..8 {
                    if (0b1000_0000 >> x_line) & row == 0 {
                        continue;
                    }
                    let block = Rect::new(
                        origin_x + x_line * scale,
                        y + y_line * scale,
                        scale,
                        scale,
                    );
                    self.fill_rect(block, color);
                }
            }
        }
    }

    /// Draw a line of text horizontally centered inside `rect`.
    pub fn text_centered(&mut self, rect: Rect, scale: usize, text: &str, color: HexColor) {
        let width = text_width(text) * scale;
        let height = GLYPH_HEIGHT * scale;

        let x = rect.x + rect.width.saturating_sub(width) / 2;
        let y = rect.y + rect.height.saturating_sub(height) / 2;
        self.text(x, y, scale, text, color);
    }

    /// Copy the canvas to a framebuffer.
    ///
    /// # Arguments
    ///
    /// * `target` - The frame of a [`pixels::Pixels`] of the same size as
    ///   the canvas.
    pub fn draw(&self, target: &mut [u8]) {
        for (pix, color) in target.chunks_exact_mut(4).zip(self.vram.iter()) {
            pix.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: HexColor = HexColor::BLACK;
    const FG: HexColor = HexColor::WHITE;

    #[test]
    fn test_new_canvas() {
        let canvas = Canvas::new(8, 4, BG);

        assert_eq!(canvas.vram.len(), 32);
        assert_eq!(canvas.pixel(7, 3), Some(BG));
        assert_eq!(canvas.pixel(8, 0), None);
        assert_eq!(canvas.pixel(0, 4), None);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(2, 3, 4, 2);

        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 4));
        assert!(!rect.contains(6, 4));
        assert!(!rect.contains(5, 5));
        assert!(!rect.contains(1, 3));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut canvas = Canvas::new(4, 4, BG);

        canvas.fill_rect(Rect::new(2, 2, 10, 10), FG);
        assert_eq!(canvas.pixel(1, 1), Some(BG));
        assert_eq!(canvas.pixel(2, 2), Some(FG));
        assert_eq!(canvas.pixel(3, 3), Some(FG));
    }

    #[test]
    fn test_rounded_corners() {
        let mut canvas = Canvas::new(10, 10, BG);

        canvas.fill_rounded_rect(Rect::new(0, 0, 10, 10), 2, FG);

        // Cut corners
        for (x, y) in [(0, 0), (1, 0), (0, 1), (9, 9), (8, 9), (9, 8), (9, 0), (0, 9)] {
            assert_eq!(canvas.pixel(x, y), Some(BG), "({}, {})", x, y);
        }
        // Kept pixels
        for (x, y) in [(1, 1), (2, 0), (0, 2), (8, 8), (5, 5)] {
            assert_eq!(canvas.pixel(x, y), Some(FG), "({}, {})", x, y);
        }
    }

    #[test]
    fn test_text() {
        let mut canvas = Canvas::new(10, 6, BG);

        canvas.text(0, 0, 1, "1", FG);

        // Second row of '1' is 0x60: .XX.
        assert_eq!(canvas.pixel(0, 1), Some(BG));
        assert_eq!(canvas.pixel(1, 1), Some(FG));
        assert_eq!(canvas.pixel(2, 1), Some(FG));
        assert_eq!(canvas.pixel(3, 1), Some(BG));
    }

    #[test]
    fn test_scaled_text() {
        let mut canvas = Canvas::new(20, 20, BG);

        canvas.text(0, 0, 2, "0", FG);

        // Top bar of '0' is four pixels wide, eight when doubled
        for x in 0..8 {
            assert_eq!(canvas.pixel(x, 0), Some(FG));
            assert_eq!(canvas.pixel(x, 1), Some(FG));
        }
        assert_eq!(canvas.pixel(8, 0), Some(BG));
        // Hollow middle
        assert_eq!(canvas.pixel(3, 4), Some(BG));
    }

    #[test]
    fn test_draw() {
        let mut canvas = Canvas::new(2, 1, BG);
        canvas.set(1, 0, FG);

        let mut frame = [0u8; 8];
        canvas.draw(&mut frame);

        assert_eq!(frame[..4], [BG.r, BG.g, BG.b, BG.a]);
        assert_eq!(frame[4..], [FG.r, FG.g, FG.b, FG.a]);
    }
}
