//! Responsive sizing of the draw surface.

use serde::{Deserialize, Serialize};

/// Terminal width (in columns) separating compact from wide viewports.
pub const BREAKPOINT_COLUMNS: u16 = 100;

/// Responsive tier derived from the terminal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportTier {
    Compact,
    Wide,
}

impl ViewportTier {
    /// Pick the tier for a terminal `columns` wide.
    pub fn for_columns(columns: u16) -> Self {
        if columns < BREAKPOINT_COLUMNS {
            ViewportTier::Compact
        } else {
            ViewportTier::Wide
        }
    }

    /// Pixel size of the logo surface for this tier.
    pub fn logo_size(self) -> (u16, u16) {
        match self {
            ViewportTier::Compact => (60, 22),
            ViewportTier::Wide => (100, 30),
        }
    }

    /// Integer scale applied to label glyphs when rasterizing the mask.
    pub fn glyph_scale(self) -> usize {
        match self {
            ViewportTier::Compact => 1,
            ViewportTier::Wide => 2,
        }
    }
}

/// Which region of the terminal the snow surface covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceLayout {
    /// The whole terminal.
    #[default]
    Viewport,
    /// A small centered region around the label.
    Logo,
}

impl SurfaceLayout {
    /// Pixel dimensions of the surface for a terminal of `columns` x `rows`.
    ///
    /// Pixels are half a cell tall, so the viewport layout has twice as many
    /// pixel rows as the terminal has text rows. The logo layout never
    /// exceeds the viewport.
    pub fn surface_size(self, columns: u16, rows: u16) -> (u16, u16) {
        let full = (columns, rows.saturating_mul(2));
        match self {
            SurfaceLayout::Viewport => full,
            SurfaceLayout::Logo => {
                let (w, h) = ViewportTier::for_columns(columns).logo_size();
                (w.min(full.0), h.min(full.1))
            }
        }
    }
}
