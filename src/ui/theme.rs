//! Color themes.
//!
//! A theme is picked by preset name in the config; the accent can be
//! overridden with a hex color.

use ratatui::style::Color;
use thiserror::Error;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    /// Background for the selected row / user
    pub selection_bg: Color,
    pub selection_fg: Color,
    /// Borders of the focused pane, titles
    pub accent: Color,
    /// Secondary text, unfocused borders
    pub dimmed: Color,
    /// Search text while it is being edited
    pub search_highlight: Color,
    /// Chart bars
    pub bar: Color,
    /// Status line after a successful action
    pub success: Color,
    /// Status line after a rejected action
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::midnight()
    }
}

impl Theme {
    pub fn midnight() -> Self {
        Self {
            background: Color::Rgb(13, 17, 22),       // #0d1116
            foreground: Color::Rgb(229, 234, 241),    // #e5eaf1
            selection_bg: Color::Rgb(31, 41, 55),     // #1f2937
            selection_fg: Color::Rgb(255, 255, 255),  // #ffffff
            accent: Color::Rgb(54, 162, 235),         // #36a2eb
            dimmed: Color::Rgb(107, 114, 128),        // #6b7280
            search_highlight: Color::Rgb(250, 204, 21), // #facc15
            bar: Color::Rgb(54, 162, 235),            // #36a2eb
            success: Color::Rgb(34, 197, 94),         // #22c55e
            error: Color::Rgb(239, 68, 68),           // #ef4444
        }
    }

    pub fn nord() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),       // #2e3440 (nord0)
            foreground: Color::Rgb(236, 239, 244),    // #eceff4 (nord6)
            selection_bg: Color::Rgb(67, 76, 94),     // #434c5e (nord2)
            selection_fg: Color::Rgb(236, 239, 244),  // #eceff4 (nord6)
            accent: Color::Rgb(136, 192, 208),        // #88c0d0 (nord8)
            dimmed: Color::Rgb(76, 86, 106),          // #4c566a (nord3)
            search_highlight: Color::Rgb(235, 203, 139), // #ebcb8b (nord13)
            bar: Color::Rgb(129, 161, 193),           // #81a1c1 (nord9)
            success: Color::Rgb(163, 190, 140),       // #a3be8c (nord14)
            error: Color::Rgb(191, 97, 106),          // #bf616a (nord11)
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            background: Color::Rgb(40, 40, 40),       // #282828
            foreground: Color::Rgb(235, 219, 178),    // #ebdbb2
            selection_bg: Color::Rgb(60, 56, 54),     // #3c3836
            selection_fg: Color::Rgb(251, 241, 199),  // #fbf1c7
            accent: Color::Rgb(215, 153, 33),         // #d79921
            dimmed: Color::Rgb(146, 131, 116),        // #928374
            search_highlight: Color::Rgb(250, 189, 47), // #fabd2f
            bar: Color::Rgb(131, 165, 152),           // #83a598
            success: Color::Rgb(152, 151, 26),        // #98971a
            error: Color::Rgb(204, 36, 29),           // #cc241d
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "midnight" | "default" => Some(Self::midnight()),
            "nord" => Some(Self::nord()),
            "gruvbox" | "gruvbox-dark" | "gruvbox_dark" => Some(Self::gruvbox()),
            _ => None,
        }
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3 or 6 hex chars)")]
    InvalidLength,
    #[error("invalid hex character")]
    InvalidHex,
}

/// Parse `#rrggbb` / `#rgb` (leading `#` optional)
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return Err(ColorError::InvalidHex);
    }
    let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| ColorError::InvalidHex);

    match s.len() {
        3 => Ok(Color::Rgb(
            channel(&s[0..1])? * 17,
            channel(&s[1..2])? * 17,
            channel(&s[2..3])? * 17,
        )),
        6 => Ok(Color::Rgb(
            channel(&s[0..2])?,
            channel(&s[2..4])?,
            channel(&s[4..6])?,
        )),
        _ => Err(ColorError::InvalidLength),
    }
}
