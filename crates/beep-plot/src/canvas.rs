use std::path::Path;

use beep_core::error::{BeepError, Result};
use image::{Rgb, RgbImage};

use crate::font::{glyph, is_lit, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};

/// RGB raster with clipped primitive drawing.
///
/// Coordinates are signed so callers can draw partly off-canvas.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> i64 {
        i64::from(self.image.width())
    }

    pub fn height(&self) -> i64 {
        i64::from(self.image.height())
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && x < self.width() && y < self.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width());
        let y1 = (y + h).min(self.height());
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.image.put_pixel(xx as u32, yy as u32, color);
            }
        }
    }

    /// Horizontal line from `x0` to `x1` inclusive, centred on `y`.
    pub fn hline(&mut self, x0: i64, x1: i64, y: i64, thickness: i64, color: Rgb<u8>) {
        let (a, b) = (x0.min(x1), x0.max(x1));
        let half = thickness / 2;
        self.fill_rect(a - half, y - half, b - a + thickness, thickness, color);
    }

    /// Vertical line from `y0` to `y1` inclusive, centred on `x`.
    pub fn vline(&mut self, x: i64, y0: i64, y1: i64, thickness: i64, color: Rgb<u8>) {
        let (a, b) = (y0.min(y1), y0.max(y1));
        let half = thickness / 2;
        self.fill_rect(x - half, a - half, thickness, b - a + thickness, color);
    }

    pub fn outline(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>) {
        self.hline(x, x + w, y, 1, color);
        self.hline(x, x + w, y + h, 1, color);
        self.vline(x, y, y + h, 1, color);
        self.vline(x + w, y, y + h, 1, color);
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    pub fn text(&mut self, x: i64, y: i64, text: &str, scale: i64, color: Rgb<u8>) {
        for (i, c) in text.chars().enumerate() {
            let g = glyph(c);
            let gx = x + i as i64 * GLYPH_ADVANCE * scale;
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if is_lit(&g, col, row) {
                        self.fill_rect(gx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
        }
    }

    /// Draw `text` rotated a quarter turn anticlockwise, reading upwards from
    /// (`x`, `y`).
    pub fn text_up(&mut self, x: i64, y: i64, text: &str, scale: i64, color: Rgb<u8>) {
        for (i, c) in text.chars().enumerate() {
            let g = glyph(c);
            let base = i as i64 * GLYPH_ADVANCE;
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if is_lit(&g, col, row) {
                        self.fill_rect(
                            x + row * scale,
                            y - (base + col + 1) * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
    }

    /// Encode as PNG at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| BeepError::Render {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};

    fn count(canvas: &Canvas, color: Rgb<u8>) -> usize {
        canvas.image().pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        canvas.fill_rect(-5, -5, 8, 8, BLACK);
        assert_eq!(count(&canvas, BLACK), 9);
    }

    #[test]
    fn test_lines_are_inclusive() {
        let mut canvas = Canvas::new(20, 20, WHITE);
        canvas.hline(2, 6, 10, 1, BLACK);
        assert_eq!(count(&canvas, BLACK), 5);

        let mut canvas = Canvas::new(20, 20, WHITE);
        canvas.vline(3, 8, 4, 2, BLACK);
        assert_eq!(count(&canvas, BLACK), 2 * 6);
    }

    #[test]
    fn test_text_draws_glyph_pixels() {
        let mut canvas = Canvas::new(20, 20, WHITE);
        canvas.text(0, 0, "I", 1, BLACK);
        // 3 + 1 + 1 + 1 + 1 + 1 + 3 lit pixels
        assert_eq!(count(&canvas, BLACK), 11);
        assert_eq!(*canvas.image().get_pixel(1, 0), BLACK);
    }

    #[test]
    fn test_text_up_matches_pixel_count() {
        let mut flat = Canvas::new(40, 40, WHITE);
        flat.text(0, 0, "AB", 1, BLACK);
        let mut up = Canvas::new(40, 40, WHITE);
        up.text_up(0, 39, "AB", 1, BLACK);
        assert_eq!(count(&flat, BLACK), count(&up, BLACK));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("blank.png");
        Canvas::new(4, 4, WHITE).save(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (4, 4));
    }

    #[test]
    fn test_save_to_missing_dir_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nope").join("blank.png");
        let err = Canvas::new(4, 4, WHITE).save(&path).unwrap_err();
        assert!(matches!(err, BeepError::Render { .. }));
    }
}
