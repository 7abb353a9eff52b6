//! Theme and Colors
//!
//! The list palette. Rows use a muted green body and a bright accent bar;
//! a settled row flashes the sepia highlight before fading back.

use ratatui::style::Color;
use reflow_core::Rgb;

// ============================================================================
// List Palette
// ============================================================================

/// Row text - muted green
pub const GREEN_3: Rgb = Rgb::from_u32(0x5f9e6e);

/// Accent bar - yellow
pub const YELLOW_2: Rgb = Rgb::from_u32(0xe8c547);

/// Accent bar - green
pub const GREEN_2: Rgb = Rgb::from_u32(0x7ccf6a);

/// Accent bar - orange
pub const ORANGE_2: Rgb = Rgb::from_u32(0xf08a3c);

/// Accents a row can draw
pub const ACCENTS: [Rgb; 3] = [YELLOW_2, GREEN_2, ORANGE_2];

/// Settle highlight - pale sepia
pub const SEPIA_9: Rgb = reflow_core::config::DEFAULT_HIGHLIGHT;

/// Background behind every glyph
pub const BACKGROUND: Rgb = Rgb::BLACK;

// ============================================================================
// UI Colors
// ============================================================================

/// Status bar text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Status bar while animations run
pub const BUSY_AMBER: Color = Color::Rgb(230, 180, 80);

/// Convert an engine color to a terminal color
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
