#[allow(unused_imports)] /// Needed for Stylize in this scope
use ratatui::style::{Color, Style, Stylize};

use crate::catalog::ModuleType;

pub const ACCENT: Color = Color::LightBlue;
pub const MUTED: Color = Color::DarkGray;

pub fn dim_unless_focused(is_focused: bool, style: Style) -> Style {
    if is_focused { style.bold() } else { style.dim().italic() }
}

/// Border color for a pane, bright only while it owns the arrow keys.
pub fn focus_border(is_focused: bool) -> Style {
    if is_focused { Style::default().fg(ACCENT) } else { Style::default().fg(MUTED) }
}

/// Theme color for a module. Home shares the accent color.
pub fn module_color(module: ModuleType) -> Color {
    module.descriptor().map(|d| d.color).unwrap_or(ACCENT)
}
