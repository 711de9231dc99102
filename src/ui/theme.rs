//! # Theme System
//!
//! The [`Theme`] struct defines all colors used by the proofread TUI.
//! Rendering code references theme fields rather than hardcoded colors; the
//! active theme is cycled at runtime with `t` and remembered in the config.
//!
//! ## Built-in Themes
//!
//! - **Catppuccin Mocha** (default)
//! - **Catppuccin Macchiato**
//! - **Dracula**
//! - **Nord**
//! - **Gruvbox Dark**

use ratatui::style::Color;

/// All colors used by the TUI, grouped by semantic role.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,

    pub bg: Color,
    /// Primary text color.
    pub fg: Color,
    /// Hints, footer, unfocused borders.
    pub fg_dim: Color,

    /// Focused borders, selected mode, rule cursor.
    pub accent: Color,
    /// Selected rules and headings.
    pub secondary: Color,

    pub success: Color,
    /// Inline input errors and failure messages.
    pub error: Color,

    /// Background behind highlighted error words.
    pub highlight_bg: Color,
}

impl Theme {
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// The theme after this one in display order, wrapping around.
    pub fn next(&self) -> &'static Theme {
        let pos = BUILT_IN_THEMES
            .iter()
            .position(|t| t.name == self.name)
            .unwrap_or(0);
        &BUILT_IN_THEMES[(pos + 1) % BUILT_IN_THEMES.len()]
    }
}

static BUILT_IN_THEMES: [Theme; 5] = [
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),              // base
        fg: Color::Rgb(205, 214, 244),           // text
        fg_dim: Color::Rgb(108, 112, 134),       // overlay0
        accent: Color::Rgb(137, 180, 250),       // blue
        secondary: Color::Rgb(249, 226, 175),    // yellow
        success: Color::Rgb(166, 227, 161),      // green
        error: Color::Rgb(243, 139, 168),        // red
        highlight_bg: Color::Rgb(88, 91, 112),   // surface2
    },
    Theme {
        name: "Catppuccin Macchiato",
        bg: Color::Rgb(36, 39, 58),              // base
        fg: Color::Rgb(202, 211, 245),           // text
        fg_dim: Color::Rgb(110, 115, 141),       // overlay0
        accent: Color::Rgb(138, 173, 244),       // blue
        secondary: Color::Rgb(238, 212, 159),    // yellow
        success: Color::Rgb(166, 218, 149),      // green
        error: Color::Rgb(237, 135, 150),        // red
        highlight_bg: Color::Rgb(91, 96, 120),   // surface2
    },
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(139, 233, 253),
        secondary: Color::Rgb(241, 250, 140),
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
        highlight_bg: Color::Rgb(68, 71, 90),
    },
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),
        secondary: Color::Rgb(235, 203, 139),
        success: Color::Rgb(163, 190, 140),
        error: Color::Rgb(191, 97, 106),
        highlight_bg: Color::Rgb(67, 76, 94),
    },
    Theme {
        name: "Gruvbox Dark",
        bg: Color::Rgb(40, 40, 40),
        fg: Color::Rgb(235, 219, 178),
        fg_dim: Color::Rgb(146, 131, 116),
        accent: Color::Rgb(131, 165, 152),
        secondary: Color::Rgb(250, 189, 47),
        success: Color::Rgb(184, 187, 38),
        error: Color::Rgb(251, 73, 52),
        highlight_bg: Color::Rgb(80, 73, 69),
    },
];
