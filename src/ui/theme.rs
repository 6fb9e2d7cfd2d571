//! Color constants for the board UI.
//!
//! Minimal dark palette; everything else derives from these.

use ratatui::style::Color;

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Highlights and the active nav section
pub const COLOR_ACCENT: Color = Color::White;

/// Dim text for metadata and hints
pub const COLOR_DIM: Color = Color::DarkGray;

/// Selected row marker
pub const COLOR_SELECTED: Color = Color::Cyan;

/// Completed todos and success notices
pub const COLOR_DONE: Color = Color::Green;

/// Destructive actions and error text
pub const COLOR_DANGER: Color = Color::Red;

/// Admin-only affordances
pub const COLOR_ADMIN: Color = Color::Yellow;

/// Tombstones and disabled controls
pub const COLOR_MUTED: Color = Color::Gray;

/// Background for dialog boxes
pub const COLOR_DIALOG_BG: Color = Color::Rgb(15, 15, 25);

/// Background for focused input fields
pub const COLOR_INPUT_BG: Color = Color::Rgb(20, 20, 30);
