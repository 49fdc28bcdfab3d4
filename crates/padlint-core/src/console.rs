//! Terminal console utilities for rich output

use std::env;
use std::io::{self, IsTerminal};

/// Console output handler with color support and terminal width detection
#[derive(Debug, Clone)]
pub struct Console {
    color_enabled: bool,
    max_width: usize,
}

impl Console {
    /// Create a console that colors output only when stdout is a terminal
    /// and `NO_COLOR` is unset
    pub fn new() -> Self {
        Self {
            color_enabled: io::stdout().is_terminal() && env::var("NO_COLOR").is_err(),
            max_width: Self::detect_terminal_width(),
        }
    }

    /// Create a console with colors disabled
    pub fn no_colors() -> Self {
        Self {
            color_enabled: false,
            max_width: Self::detect_terminal_width(),
        }
    }

    /// Detect terminal width, defaulting to 100 if unavailable
    fn detect_terminal_width() -> usize {
        term_size::dimensions().map(|(w, _)| w).unwrap_or(100)
    }

    /// Colorize text with the specified color
    pub fn colorize(&self, text: &str, color: Color) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        let code = match color {
            Color::Red => "31",
            Color::Yellow => "33",
            Color::Blue => "34",
            Color::Green => "32",
            Color::Cyan => "36",
            Color::Dim => "2",
            Color::Bold => "1",
        };
        format!("\x1b[{code}m{text}\x1b[0m")
    }

    /// Columns available for a rendered line
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// Override the detected terminal width
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// ANSI color codes for terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Yellow,
    Blue,
    Green,
    Cyan,
    Dim,
    Bold,
}
