//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw.rs` - Pane layout and widgets
//! - `theme.rs` - Color themes and presets

mod draw;
pub mod theme;

pub use draw::draw;
pub use theme::Theme;
