//! RaceSelect — pick a race; every faction-scoped screen depends on it.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use grimoire_api::model::Race;

use crate::action::{Action, ComponentId, Screen};
use crate::app_state::AppState;
use crate::component::Component;
use crate::fetch::{CollectionPayload, Fetch, FetchSlot};
use crate::theme::{
    style_error_banner, style_muted, style_selected, C_MUTED, C_PRIMARY, C_TOAST_ERROR,
};
use crate::widgets::pane_chrome::{pane_chrome, Badge};
use crate::widgets::scrollable_list::ScrollableList;

pub struct RaceSelect {
    collection: FetchSlot<Vec<Race>>,
    list: ScrollableList<Race>,
    list_state: ListState,
}

impl RaceSelect {
    pub fn new() -> Self {
        Self {
            collection: FetchSlot::new(),
            list: ScrollableList::new(|race: &Race, q: &str| {
                race.name.to_lowercase().contains(&q.to_lowercase())
            }),
            list_state: ListState::default(),
        }
    }

    fn choose_selected(&self) -> Vec<Action> {
        match self.list.selected_item() {
            // The race name doubles as the faction path segment, verbatim.
            Some(race) => vec![Action::ChooseFaction(race.name.clone())],
            None => Vec::new(),
        }
    }
}

impl Component for RaceSelect {
    fn id(&self) -> ComponentId {
        ComponentId::RaceSelect
    }

    fn mount(&mut self, _state: &AppState) -> Vec<Action> {
        let generation = self.collection.begin();
        vec![Action::FetchCollection {
            screen: Screen::Races,
            generation,
        }]
    }

    fn unmount(&mut self) {
        self.collection.begin();
        self.list.set_items(Vec::new());
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(1),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter => return self.choose_selected(),
            KeyCode::Char('y') => {
                if let Some(race) = self.list.selected_item() {
                    if !race.icon.is_empty() {
                        return vec![Action::CopyToClipboard(state.asset_url(&race.icon))];
                    }
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        let rel_row = event.row.saturating_sub(area.y + 1) as usize;
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let before = self.list.selected;
                if self.list.handle_click(rel_row) && self.list.selected == before {
                    return self.choose_selected();
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn on_collection(&mut self, generation: u64, result: Result<CollectionPayload, String>) {
        let mapped = result.and_then(|payload| match payload {
            CollectionPayload::Races(races) => Ok(races),
            _ => Err("An unknown error occurred.".to_string()),
        });
        if self.collection.resolve(generation, mapped) {
            if let Some(races) = self.collection.ready() {
                self.list.set_items(races.clone());
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _state: &AppState) {
        let badge = matches!(self.collection.state(), Fetch::Failed(_)).then_some(Badge {
            text: "ERR",
            color: C_TOAST_ERROR,
        });
        let block = pane_chrome("races", None, true, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.collection.state() {
            Fetch::Loading => {
                frame.render_widget(
                    Paragraph::new(Span::styled("  loading…", style_muted())),
                    inner,
                );
                return;
            }
            Fetch::Failed(message) => {
                frame.render_widget(
                    Paragraph::new(format!(" {message}"))
                        .style(style_error_banner())
                        .wrap(Wrap { trim: false }),
                    inner,
                );
                return;
            }
            Fetch::Ready(_) => {}
        }

        let content_h = inner.height as usize;
        self.list.ensure_visible(content_h);
        let rows: Vec<Race> = self
            .list
            .visible_items(content_h)
            .into_iter()
            .map(|(_, race)| race.clone())
            .collect();
        let sel_in_view = self.list.selected_in_view(content_h);

        let items: Vec<ListItem> = rows
            .iter()
            .enumerate()
            .map(|(view_row, race)| {
                let mut spans = vec![Span::styled(
                    race.name.clone(),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                )];
                if let Some(ability) = &race.ability {
                    spans.push(Span::styled(
                        format!("  {}", ability.name),
                        Style::default().fg(C_MUTED),
                    ));
                }
                let style = if view_row == sel_in_view {
                    style_selected()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(spans)).style(style)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default())
            .highlight_symbol("");
        self.list_state.select(Some(sel_in_view));
        frame.render_stateful_widget(list, inner, &mut self.list_state);
    }
}

impl Default for RaceSelect {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn race(id: u32, name: &str) -> Race {
        Race {
            id,
            name: name.into(),
            icon: format!("{name}.png").to_lowercase(),
            ability: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_enter_chooses_race_by_name() {
        let state = AppState::new("http://wbgl.cz/api/v1".into());
        let mut races = RaceSelect::new();
        let actions = races.mount(&state);
        let generation = match actions.as_slice() {
            [Action::FetchCollection { generation, .. }] => *generation,
            other => panic!("expected FetchCollection, got {other:?}"),
        };
        races.on_collection(
            generation,
            Ok(CollectionPayload::Races(vec![
                race(1, "Orcs"),
                race(2, "Humans"),
            ])),
        );

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        races.handle_key(down, &state);
        let chosen = races.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &state);
        assert!(matches!(
            chosen.as_slice(),
            [Action::ChooseFaction(name)] if name == "Humans"
        ));
    }
}
