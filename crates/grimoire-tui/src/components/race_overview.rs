//! RaceOverview — the lobby screen: chosen race with its racial ability.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use grimoire_api::model::Race;

use crate::action::{Action, ComponentId, Screen};
use crate::app_state::AppState;
use crate::component::Component;
use crate::fetch::{CollectionPayload, Fetch, FetchSlot};
use crate::theme::{
    style_error_banner, style_heading, style_muted, C_PRIMARY, C_SECONDARY, C_TOAST_ERROR,
};
use crate::widgets::pane_chrome::{pane_chrome, Badge};

pub struct RaceOverview {
    race: FetchSlot<Race>,
}

impl RaceOverview {
    pub fn new() -> Self {
        Self {
            race: FetchSlot::new(),
        }
    }
}

impl Component for RaceOverview {
    fn id(&self) -> ComponentId {
        ComponentId::RaceOverview
    }

    fn mount(&mut self, state: &AppState) -> Vec<Action> {
        if !state.has_faction() {
            return Vec::new();
        }
        let generation = self.race.begin();
        vec![Action::FetchCollection {
            screen: Screen::Lobby,
            generation,
        }]
    }

    fn unmount(&mut self) {
        self.race.begin();
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        if key.code == KeyCode::Char('y') {
            if let Some(race) = self.race.ready() {
                if !race.icon.is_empty() {
                    return vec![Action::CopyToClipboard(state.asset_url(&race.icon))];
                }
            }
        }
        Vec::new()
    }

    fn on_collection(&mut self, generation: u64, result: Result<CollectionPayload, String>) {
        let mapped = result.and_then(|payload| match payload {
            CollectionPayload::Race(race) => Ok(*race),
            _ => Err("An unknown error occurred.".to_string()),
        });
        self.race.resolve(generation, mapped);
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let badge = matches!(self.race.state(), Fetch::Failed(_)).then_some(Badge {
            text: "ERR",
            color: C_TOAST_ERROR,
        });
        let block = pane_chrome("lobby", Screen::Lobby.digit(), true, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !state.has_faction() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  choose a race first (m → Změnit rasu)",
                    style_muted(),
                )),
                inner,
            );
            return;
        }

        match self.race.state() {
            Fetch::Loading => {
                frame.render_widget(
                    Paragraph::new(Span::styled("  loading…", style_muted())),
                    inner,
                );
            }
            Fetch::Failed(message) => {
                frame.render_widget(
                    Paragraph::new(format!(" {message}"))
                        .style(style_error_banner())
                        .wrap(Wrap { trim: false }),
                    inner,
                );
            }
            Fetch::Ready(race) => {
                let mut lines: Vec<Line> = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("  {}", race.name),
                        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                ];
                match &race.ability {
                    Some(ability) => {
                        lines.push(Line::from(Span::styled(
                            format!("  {}", ability.name.to_uppercase()),
                            style_heading(),
                        )));
                        lines.push(Line::from(Span::styled(
                            format!("  {}", ability.description),
                            Style::default().fg(C_SECONDARY),
                        )));
                    }
                    None => {
                        lines.push(Line::from(Span::styled(
                            "  No abilities available.",
                            style_muted(),
                        )));
                    }
                }
                if race.icon.is_empty() {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled("  Icon not found", style_muted())));
                } else {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        format!("  icon: {}", state.asset_url(&race.icon)),
                        style_muted(),
                    )));
                }
                frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
            }
        }
    }
}

impl Default for RaceOverview {
    fn default() -> Self {
        Self::new()
    }
}
