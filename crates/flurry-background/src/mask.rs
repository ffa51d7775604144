//! Offscreen rasterization of the label, used as a collision lookup table.

use flurry_core::ViewportTier;
use flurry_fonts::{GLYPH_HEIGHT, build_label_art};
use tracing::debug;

use crate::color::Rgb;
use crate::surface::Surface;

/// Alpha above which a mask pixel counts as part of a letter.
pub const ALPHA_THRESHOLD: u8 = 100;

/// Pixel rows per glyph line at scale 1. Terminal cells are twice as tall as
/// they are wide and a surface pixel is half a cell.
const ROWS_PER_LINE: usize = 2;

/// Alpha buffer holding a single rendering of the label.
#[derive(Debug, Clone)]
pub struct TextMask {
    width: u16,
    height: u16,
    label: String,
    tier: ViewportTier,
    alpha: Vec<u8>,
}

impl TextMask {
    /// Create and immediately rasterize a mask.
    pub fn new(width: u16, height: u16, label: &str, tier: ViewportTier) -> Self {
        let mut mask = Self {
            width: 0,
            height: 0,
            label: String::new(),
            tier,
            alpha: Vec::new(),
        };
        mask.rebuild(width, height, label, tier);
        mask
    }

    /// Clear the buffer and re-rasterize `label` centered in `width` x `height`.
    ///
    /// The tier picks the glyph scale. Glyph pixels falling outside the
    /// buffer are clipped.
    pub fn rebuild(&mut self, width: u16, height: u16, label: &str, tier: ViewportTier) {
        self.width = width;
        self.height = height;
        self.label = label.to_string();
        self.tier = tier;
        self.alpha = vec![0; width as usize * height as usize];

        let art = build_label_art(label);
        let Some(first) = art.first() else {
            return;
        };

        let scale = tier.glyph_scale();
        let cell_w = scale;
        let cell_h = scale * ROWS_PER_LINE;
        let art_w = (first.chars().count() * cell_w) as i32;
        let art_h = (GLYPH_HEIGHT * cell_h) as i32;

        // Centered, nudged down a pixel so the baseline sits just below middle.
        let left = (width as i32 - art_w) / 2;
        let top = (height as i32 - art_h) / 2 + 1;

        for (line_idx, line) in art.iter().enumerate() {
            for (col_idx, ch) in line.chars().enumerate() {
                let alpha = glyph_alpha(ch);
                if alpha == 0 {
                    continue;
                }
                let x0 = left + (col_idx * cell_w) as i32;
                let y0 = top + (line_idx * cell_h) as i32;
                for dy in 0..cell_h as i32 {
                    for dx in 0..cell_w as i32 {
                        self.put(x0 + dx, y0 + dy, alpha);
                    }
                }
            }
        }

        debug!(
            width,
            height,
            label,
            scale,
            opaque = self.opaque_count(),
            "rebuilt text mask"
        );
    }

    fn put(&mut self, x: i32, y: i32, alpha: u8) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let i = y as usize * self.width as usize + x as usize;
        self.alpha[i] = self.alpha[i].max(alpha);
    }

    /// Stored alpha, or 0 outside the buffer.
    pub fn alpha_at(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.alpha[y as usize * self.width as usize + x as usize]
    }

    /// Whether `(x, y)` is inside a letter. Out-of-bounds is never opaque.
    pub fn is_opaque_at(&self, x: i32, y: i32) -> bool {
        self.alpha_at(x, y) > ALPHA_THRESHOLD
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tier(&self) -> ViewportTier {
        self.tier
    }

    /// Number of opaque pixels.
    pub fn opaque_count(&self) -> usize {
        self.alpha.iter().filter(|&&a| a > ALPHA_THRESHOLD).count()
    }

    /// Paint the label onto `surface` with `color`, scaled by `strength`.
    pub fn paint(&self, surface: &mut Surface, color: Rgb, strength: f32) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let alpha = self.alpha_at(x, y);
                if alpha > 0 {
                    surface.blend_pixel(x, y, color, alpha as f32 / 255.0 * strength);
                }
            }
        }
    }
}

/// Coverage of a block character.
fn glyph_alpha(ch: char) -> u8 {
    match ch {
        '█' => 255,
        '▓' => 192,
        '▒' => 128,
        '░' => 64,
        _ => 0,
    }
}
