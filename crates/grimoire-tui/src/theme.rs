//! Color palette and style constants for the grimoire TUI.
//!
//! The palette follows the board-game companion look: dark slate background,
//! indigo cards, gold for prices and section headings.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(40, 43, 58);
pub const C_PANEL: Color = Color::Rgb(54, 61, 94);
pub const C_PANEL_DARK: Color = Color::Rgb(46, 52, 64);
pub const C_PRIMARY: Color = Color::Rgb(225, 228, 240);
pub const C_SECONDARY: Color = Color::Rgb(187, 187, 187);
pub const C_MUTED: Color = Color::Rgb(112, 118, 144);
pub const C_GOLD: Color = Color::Rgb(255, 215, 0);
pub const C_WOOD: Color = Color::Rgb(160, 120, 70);
pub const C_ACCENT: Color = Color::Rgb(47, 149, 220);
pub const C_ERROR_BG: Color = Color::Rgb(216, 57, 25);
pub const C_ERROR_FG: Color = Color::Rgb(255, 255, 255);
pub const C_SELECTION_BG: Color = Color::Rgb(54, 61, 94);
pub const C_PANEL_BORDER: Color = Color::Rgb(62, 68, 94);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(47, 149, 220);
pub const C_NUMBER_HINT: Color = Color::Rgb(96, 104, 138);
pub const C_FILTER_BG: Color = Color::Rgb(34, 37, 50);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 80);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MODE_NORMAL: Color = Color::Rgb(140, 146, 170);
pub const C_MODE_FILTER: Color = Color::Rgb(255, 200, 80);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_heading() -> Style {
    Style::default().fg(C_GOLD).add_modifier(Modifier::BOLD)
}

pub fn style_selected() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_error_banner() -> Style {
    Style::default().bg(C_ERROR_BG).fg(C_ERROR_FG)
}

/// Approximate an opacity ramp on a terminal: near-opaque lines keep their
/// styling, mid-fade drops to secondary, early fade to muted.
pub fn fade_line(line: Line<'static>, opacity: f32) -> Line<'static> {
    if opacity >= 0.9 {
        return line;
    }
    let fg = if opacity < 0.55 { C_MUTED } else { C_SECONDARY };
    let spans: Vec<Span<'static>> = line
        .spans
        .into_iter()
        .map(|span| Span::styled(span.content, Style::default().fg(fg)))
        .collect();
    Line::from(spans)
}
