//! Menu — the screen drawer, rendered as a centered popup over the app.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::action::{Action, ComponentId, Screen};
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{C_MUTED, C_PANEL_BORDER, C_PANEL_DARK, C_PRIMARY, C_SELECTION_BG};

pub struct Menu {
    pub visible: bool,
    cursor: usize,
}

impl Menu {
    pub fn new() -> Self {
        Self {
            visible: false,
            cursor: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Open with the cursor on the current screen.
    pub fn open_at(&mut self, screen: Screen) {
        self.visible = true;
        self.cursor = Screen::ALL.iter().position(|s| *s == screen).unwrap_or(0);
    }
}

impl Component for Menu {
    fn id(&self) -> ComponentId {
        ComponentId::Menu
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return Vec::new();
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => {
                self.visible = false;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(Screen::ALL.len() - 1);
            }
            KeyCode::Enter => {
                self.visible = false;
                return vec![Action::SwitchScreen(Screen::ALL[self.cursor])];
            }
            KeyCode::Char(c) => {
                if let Some(screen) = Screen::from_digit(c) {
                    self.visible = false;
                    return vec![Action::SwitchScreen(screen)];
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if !self.visible {
            return;
        }

        let height = Screen::ALL.len() as u16 + 4;
        let popup = centered_rect(40, height, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER))
            .style(Style::default().bg(C_PANEL_DARK))
            .title(Span::styled(
                " menu ",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let items: Vec<ListItem> = Screen::ALL
            .iter()
            .enumerate()
            .map(|(idx, screen)| {
                let digit = screen
                    .digit()
                    .map(|d| format!("{d}  "))
                    .unwrap_or_else(|| "   ".to_string());
                let style = if idx == self.cursor {
                    Style::default()
                        .bg(C_SELECTION_BG)
                        .fg(C_PRIMARY)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(C_PRIMARY)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {digit}"), Style::default().fg(C_MUTED)),
                    Span::raw(screen.label()),
                ]))
                .style(style)
            })
            .collect();
        frame.render_widget(List::new(items), rows[0]);

        let faction = if state.has_faction() {
            format!(" rasa: {}", state.faction)
        } else {
            " rasa: —".to_string()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(faction, Style::default().fg(C_MUTED))),
            rows[1],
        );
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    #[test]
    fn test_enter_switches_to_cursor_screen() {
        let state = AppState::new("http://wbgl.cz/api/v1".into());
        let mut menu = Menu::new();
        menu.open_at(Screen::Heroes);

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        menu.handle_key(down, &state);
        let actions = menu.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &state);
        assert!(matches!(
            actions.as_slice(),
            [Action::SwitchScreen(Screen::Tavern)]
        ));
        assert!(!menu.visible);
    }
}
