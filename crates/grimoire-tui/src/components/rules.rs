//! Rules — static turn-order reference, in the group's Czech wording.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{style_heading, style_secondary};
use crate::widgets::pane_chrome::pane_chrome;

const PHASES: &[(&str, &[&str])] = &[
    ("1. Fáze", &["Pohyb", "Oprava budov"]),
    (
        "2. Fáze",
        &[
            "Těžba",
            "Stavba jednotek / hrdinů",
            "Stavba budov",
            "Útok",
            "Tech",
        ],
    ),
    ("3. Fáze", &["Braní karet", "Použití karty"]),
    ("4. Fáze", &["Koupení předmětu", "Použití předmětu"]),
];

pub struct Rules {
    scroll: u16,
}

impl Rules {
    pub fn new() -> Self {
        Self { scroll: 0 }
    }

    fn max_scroll() -> u16 {
        // Heading + blank per phase, one row per step.
        PHASES
            .iter()
            .map(|(_, steps)| steps.len() as u16 + 2)
            .sum::<u16>()
            + 2
    }
}

impl Component for Rules {
    fn id(&self) -> ComponentId {
        ComponentId::Rules
    }

    fn unmount(&mut self) {
        self.scroll = 0;
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = (self.scroll + 1).min(Self::max_scroll());
            }
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            MouseEventKind::ScrollDown => {
                self.scroll = (self.scroll + 1).min(Self::max_scroll());
            }
            _ => {}
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _state: &AppState) {
        let block = pane_chrome("rules", None, true, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled("  Přehled tahů", style_heading())),
            Line::from(""),
        ];
        for (phase, steps) in PHASES {
            lines.push(Line::from(Span::styled(format!("  {phase}"), style_heading())));
            for step in *steps {
                lines.push(Line::from(Span::styled(
                    format!("    • {step}"),
                    style_secondary(),
                )));
            }
            lines.push(Line::from(""));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            inner,
        );
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
