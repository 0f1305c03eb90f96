//! Status bars — keybinding hints and the faction/log line at the bottom.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::action::Screen;
use crate::theme::{C_GOLD, C_MODE_FILTER, C_MODE_NORMAL, C_MUTED, C_SECONDARY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Filter,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Filter => "FILTER",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Filter => C_MODE_FILTER,
        }
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, screen: Screen) {
    let keys = match mode {
        InputMode::Filter => " type to filter  Up/Down move  Enter keep  Esc clear+close",
        InputMode::Normal => match screen {
            Screen::Races => " ↑↓/jk select  Enter choose race  y copy icon url  m menu  ? help  q quit",
            Screen::Lobby => " y copy icon url  Tab next screen  m menu  ? help  q quit",
            Screen::Rules => " ↑↓/jk scroll  Tab next screen  m menu  ? help  q quit",
            _ => " ↑↓/jk select  Enter expand/collapse  / filter  y copy icon url  Tab/1-0 screens  m menu  ? help  q quit",
        },
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the log bar: chosen faction flag plus the last log line.
pub fn draw_log_bar(frame: &mut Frame, area: Rect, last_log: Option<&str>, faction: &str) {
    let faction_label = if faction.trim().is_empty() {
        "—".to_string()
    } else {
        faction.to_string()
    };
    let flag = format!(" ⚑ {faction_label} ");
    let budget = (area.width as usize).saturating_sub(flag.width() + 1);

    let mut log = last_log.unwrap_or("").to_string();
    while log.width() > budget {
        log.pop();
    }

    let line = Line::from(vec![
        Span::styled(flag, Style::default().fg(C_GOLD)),
        Span::styled(log, Style::default().fg(C_SECONDARY)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
