//! Pixel raster the animations draw into.
//!
//! A terminal cell shows two vertically stacked pixels using the upper half
//! block: the foreground colors the top pixel and the background colors the
//! bottom one.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::color::Rgb;

/// One surface pixel. `alpha` of zero means nothing was drawn there.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pixel {
    pub color: Rgb,
    pub alpha: f32,
}

impl Pixel {
    pub const CLEAR: Pixel = Pixel {
        color: Rgb::BLACK,
        alpha: 0.0,
    };
}

/// RGBA pixel buffer.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u16,
    height: u16,
    pixels: Vec<Pixel>,
    /// Color transparent pixels are composited over when shown.
    base: Rgb,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::CLEAR; width as usize * height as usize],
            base: Rgb::BLACK,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn set_base(&mut self, base: Rgb) {
        self.base = base;
    }

    /// Resize and clear.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Pixel::CLEAR; width as usize * height as usize];
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(Pixel::CLEAR);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite a pixel. Out-of-bounds writes are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = Pixel {
                color,
                alpha: alpha.clamp(0.0, 1.0),
            };
        }
    }

    /// Composite `color` at `alpha` over the existing pixel.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let Some(i) = self.index(x, y) else {
            return;
        };

        let dst = self.pixels[i];
        let out_alpha = alpha + dst.alpha * (1.0 - alpha);
        let keep = dst.alpha * (1.0 - alpha) / out_alpha;
        self.pixels[i] = Pixel {
            color: color.scale(alpha / out_alpha).add(dst.color.scale(keep)),
            alpha: out_alpha,
        };
    }

    /// Draw an anti-aliased filled circle centered at `(cx, cy)`.
    ///
    /// Pixel `(x, y)` covers `[x, x + 1) x [y, y + 1)`; coverage falls off
    /// over one pixel at the rim so sub-pixel radii still leave a faint dot.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }

        let reach = radius + 0.5;
        let x0 = (cx - reach).floor() as i32;
        let x1 = (cx + reach).ceil() as i32;
        let y0 = (cy - reach).floor() as i32;
        let y1 = (cy + reach).ceil() as i32;

        for y in y0.max(0)..=y1.min(self.height as i32 - 1) {
            for x in x0.max(0)..=x1.min(self.width as i32 - 1) {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let coverage = (reach - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, alpha * coverage);
                }
            }
        }
    }

    /// Fill every pixel with an opaque color.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(Pixel { color, alpha: 1.0 });
    }

    /// Number of pixels with any coverage.
    pub fn painted_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.alpha > 0.0).count()
    }

    fn shown(&self, pixel: Pixel) -> Rgb {
        self.base.lerp(pixel.color, pixel.alpha)
    }
}

impl Widget for &Surface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.height.div_ceil(2).min(area.height);
        let columns = self.width.min(area.width);

        for row in 0..rows {
            for column in 0..columns {
                let top = self.pixel(column as i32, row as i32 * 2).unwrap_or_default();
                let bottom = self
                    .pixel(column as i32, row as i32 * 2 + 1)
                    .unwrap_or_default();
                if top.alpha <= 0.0 && bottom.alpha <= 0.0 {
                    continue;
                }

                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_char('▀')
                        .set_fg(self.shown(top).to_color())
                        .set_bg(self.shown(bottom).to_color());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_out_of_bounds_access_is_ignored() {
        let mut surface = Surface::new(4, 4);
        surface.set_pixel(-1, 0, Rgb::WHITE, 1.0);
        surface.blend_pixel(4, 4, Rgb::WHITE, 1.0);
        assert_eq!(surface.pixel(4, 0), None);
        assert_eq!(surface.painted_count(), 0);
    }

    #[test]
    fn test_blend_over_transparent_keeps_color() {
        let mut surface = Surface::new(1, 1);
        surface.blend_pixel(0, 0, Rgb::WHITE, 0.5);
        let pixel = surface.pixel(0, 0).unwrap();
        assert_eq!(pixel.color, Rgb::WHITE);
        assert!((pixel.alpha - 0.5).abs() < 1e-6);

        surface.blend_pixel(0, 0, Rgb::WHITE, 0.5);
        assert!((surface.pixel(0, 0).unwrap().alpha - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_small_circle_still_draws() {
        let mut surface = Surface::new(10, 10);
        surface.fill_circle(5.5, 5.5, 0.5, Rgb::WHITE, 1.0);
        assert!(surface.pixel(5, 5).unwrap().alpha > 0.99);
        assert!(surface.painted_count() >= 1);
    }

    #[test]
    fn test_circle_is_clipped_at_edges() {
        let mut surface = Surface::new(4, 4);
        surface.fill_circle(0.0, 0.0, 3.0, Rgb::WHITE, 1.0);
        assert!(surface.pixel(0, 0).unwrap().alpha > 0.0);
        surface.fill_circle(f32::NAN, 1.0, 3.0, Rgb::WHITE, 1.0);
    }

    #[test]
    fn test_widget_uses_half_blocks() {
        let mut surface = Surface::new(2, 4);
        surface.set_pixel(0, 0, Rgb::WHITE, 1.0);
        surface.set_pixel(0, 1, Rgb::new(1.0, 0.0, 0.0), 1.0);

        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        (&surface).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 255, 255));
        assert_eq!(cell.bg, Color::Rgb(255, 0, 0));
        // Untouched cells keep whatever was there.
        assert_eq!(buf[(1, 1)].symbol(), " ");
    }
}
