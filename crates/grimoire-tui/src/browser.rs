//! EntityBrowser — the generic list/detail screen.
//!
//! One instance per browsable screen, parameterized by a `Catalog`. The
//! browser owns the collection slot, filterable list, exclusive expansion,
//! the detail slot, and the slide/fade animator. Expanding a row narrows the
//! list to that row and (for catalogs with a detail endpoint) starts the
//! secondary fetch.

use std::marker::PhantomData;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use grimoire_api::model::EntityId;

use crate::action::{Action, ComponentId};
use crate::anim::{AnimPhase, RowAnimator};
use crate::app_state::AppState;
use crate::catalog::{heading_line, Catalog};
use crate::component::Component;
use crate::detail::{DetailPhase, DetailSlot};
use crate::fetch::{CollectionPayload, DetailPayload, Fetch, FetchSlot};
use crate::selection::{visible_rows, Selection, Toggle, Visible};
use crate::theme::{
    fade_line, style_error_banner, style_muted, style_selected, C_MUTED, C_SECONDARY,
    C_TOAST_ERROR,
};
use crate::widgets::filter_input::{FilterAction, FilterInput};
use crate::widgets::pane_chrome::{pane_chrome, Badge};
use crate::widgets::scrollable_list::ScrollableList;

pub struct EntityBrowser<C: Catalog> {
    component_id: ComponentId,
    collection: FetchSlot<Vec<C::Entity>>,
    list: ScrollableList<C::Entity>,
    filter_input: FilterInput,
    selection: Selection,
    detail: DetailSlot<C::Detail>,
    animator: RowAnimator,
    list_state: ListState,
    _catalog: PhantomData<C>,
}

impl<C: Catalog> EntityBrowser<C> {
    pub fn new(component_id: ComponentId) -> Self {
        Self {
            component_id,
            collection: FetchSlot::new(),
            list: ScrollableList::new(|entity, query| C::matches(entity, query)),
            filter_input: FilterInput::default(),
            selection: Selection::new(),
            detail: DetailSlot::new(),
            animator: RowAnimator::new(),
            list_state: ListState::default(),
            _catalog: PhantomData,
        }
    }

    #[cfg(test)]
    pub fn collection_state(&self) -> &Fetch<Vec<C::Entity>> {
        self.collection.state()
    }

    #[cfg(test)]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[cfg(test)]
    pub fn detail_phase(&self, id: EntityId) -> Option<&DetailPhase<C::Detail>> {
        self.detail.phase_for(id)
    }

    fn expanded_entity(&self) -> Option<&C::Entity> {
        self.selection.expanded()?;
        let items = self.collection.ready()?;
        visible_rows(items, &self.selection, C::id).into_iter().next()
    }

    fn toggle_selected(&mut self) -> Vec<Action> {
        let Some(entity) = self.list.selected_item() else {
            return Vec::new();
        };
        let entity = entity.clone();
        let id = C::id(&entity);
        match self.selection.toggle(id) {
            Toggle::Expanded(id) => {
                // A new row taking over the expansion restarts from hidden.
                self.animator.reset();
                self.animator.expand();
                if let Some(request) = C::detail_request(&entity) {
                    let generation = self.detail.begin(id);
                    return vec![Action::FetchDetail {
                        screen: C::SCREEN,
                        id,
                        request,
                        generation,
                    }];
                }
                Vec::new()
            }
            Toggle::Collapsed => {
                self.animator.collapse();
                Vec::new()
            }
        }
    }

    fn collapse_expanded(&mut self) {
        if self.selection.expanded().is_some() {
            self.selection.clear();
            self.animator.collapse();
        }
    }

    fn copy_icon_action(&self, state: &AppState) -> Vec<Action> {
        let entity = self.expanded_entity().or_else(|| self.list.selected_item());
        match entity {
            Some(entity) if !C::icon(entity).is_empty() => {
                vec![Action::CopyToClipboard(state.asset_url(C::icon(entity)))]
            }
            _ => Vec::new(),
        }
    }

    fn draw_list(&mut self, frame: &mut Frame, inner: Rect) {
        if self.list.is_empty() && !self.list.filter.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no rows match filter", style_muted())),
                inner,
            );
            return;
        }

        let content_h = inner.height as usize;
        self.list.ensure_visible(content_h);
        let rows: Vec<C::Entity> = self
            .list
            .visible_items(content_h)
            .into_iter()
            .map(|(_, entity)| entity.clone())
            .collect();
        let sel_in_view = self.list.selected_in_view(content_h);

        let items: Vec<ListItem> = rows
            .iter()
            .enumerate()
            .map(|(view_row, entity)| {
                let style = if view_row == sel_in_view {
                    style_selected()
                } else {
                    Style::default()
                };
                ListItem::new(C::row_line(entity)).style(style)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default())
            .highlight_symbol("");
        self.list_state.select(Some(sel_in_view));
        frame.render_stateful_widget(list, inner, &mut self.list_state);

        if self.filter_input.is_active() {
            let filter_area = Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            };
            self.filter_input.draw(frame, filter_area);
        }
    }

    fn detail_block(&self, entity: &C::Entity) -> Vec<Line<'static>> {
        let mut block = vec![heading_line(C::detail_heading())];
        let muted = |text: &'static str| Line::from(Span::styled(text, style_muted()));

        if C::detail_request(entity).is_some() {
            match self.detail.phase_for(C::id(entity)) {
                Some(DetailPhase::Loading) | None => block.push(muted(C::loading_text())),
                Some(DetailPhase::Ready(detail)) => {
                    let body = C::detail_lines(detail);
                    if body.is_empty() {
                        block.push(muted(C::empty_text()));
                    } else {
                        block.extend(body);
                    }
                }
                Some(DetailPhase::Unavailable) => block.push(muted(C::empty_text())),
            }
        } else {
            let body = C::embedded_detail_lines(entity);
            if body.is_empty() {
                block.push(muted(C::empty_text()));
            } else {
                block.extend(body);
            }
        }
        block
    }

    fn draw_expanded(&mut self, frame: &mut Frame, inner: Rect, state: &AppState) {
        let Some(entity) = self.expanded_entity() else {
            return;
        };

        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(C::row_line(entity));
        lines.push(Line::from(""));
        for (label, value) in C::stat_rows(entity) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {label:<9}"), Style::default().fg(C_MUTED)),
                Span::styled(value, Style::default().fg(C_SECONDARY)),
            ]));
        }
        lines.push(Line::from(""));

        let block = self.detail_block(entity);
        let revealed = self.animator.revealed_lines(block.len());
        let opacity = self.animator.opacity();
        for line in block.into_iter().take(revealed) {
            lines.push(fade_line(line, opacity));
        }

        if !C::icon(entity).is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  icon: {}", state.asset_url(C::icon(entity))),
                style_muted(),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

impl<C: Catalog> Component for EntityBrowser<C> {
    fn id(&self) -> ComponentId {
        self.component_id
    }

    fn mount(&mut self, state: &AppState) -> Vec<Action> {
        self.selection.clear();
        self.detail.clear();
        self.animator.reset();
        self.filter_input.clear();
        self.filter_input.deactivate();
        self.list.set_filter("");
        if C::needs_faction() && !state.has_faction() {
            return Vec::new();
        }
        let generation = self.collection.begin();
        vec![Action::FetchCollection {
            screen: C::SCREEN,
            generation,
        }]
    }

    fn unmount(&mut self) {
        // Bump the generation so in-flight responses die on arrival.
        self.collection.begin();
        self.list.set_items(Vec::new());
        self.selection.clear();
        self.detail.clear();
        self.animator.reset();
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }

        if self.filter_input.is_active() {
            match key.code {
                KeyCode::Up => {
                    self.list.select_up(1);
                    return Vec::new();
                }
                KeyCode::Down => {
                    self.list.select_down(1);
                    return Vec::new();
                }
                _ => {}
            }
            return match self.filter_input.handle_key(key) {
                FilterAction::Changed(query) => {
                    self.list.set_filter(&query);
                    Vec::new()
                }
                FilterAction::Confirmed => vec![Action::CloseFilter],
                FilterAction::Cancelled => {
                    self.list.set_filter("");
                    vec![Action::CloseFilter]
                }
            };
        }

        // While a row is expanded only collapse/copy make sense.
        if let Some(id) = self.selection.expanded() {
            match key.code {
                KeyCode::Enter => {
                    self.selection.toggle(id);
                    self.animator.collapse();
                }
                KeyCode::Esc => self.collapse_expanded(),
                KeyCode::Char('y') => return self.copy_icon_action(state),
                _ => {}
            }
            return Vec::new();
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter => return self.toggle_selected(),
            KeyCode::Char('/') => {
                self.filter_input.activate();
                return vec![Action::OpenFilter];
            }
            KeyCode::Char('y') => return self.copy_icon_action(state),
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        if self.selection.expanded().is_some() {
            if let MouseEventKind::Down(MouseButton::Left) = event.kind {
                self.collapse_expanded();
            }
            return Vec::new();
        }
        let rel_row = event.row.saturating_sub(area.y + 1) as usize;
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let before = self.list.selected;
                if self.list.handle_click(rel_row) && self.list.selected == before {
                    // Second click on the selected row expands it.
                    return self.toggle_selected();
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn tick(&mut self, dt_ms: u32, _state: &AppState) -> Vec<Action> {
        let was_collapsing = self.animator.phase() == AnimPhase::Collapsing;
        self.animator.tick(dt_ms);
        if was_collapsing && self.animator.phase() == AnimPhase::Collapsed {
            // Collapse finished: drop the detail payload.
            self.detail.clear();
        }
        Vec::new()
    }

    fn on_collection(&mut self, generation: u64, result: Result<CollectionPayload, String>) {
        let mapped = result.and_then(|payload| {
            C::collection_from(payload).ok_or_else(|| "An unknown error occurred.".to_string())
        });
        if !self.collection.resolve(generation, mapped) {
            return;
        }
        if let Some(items) = self.collection.ready() {
            let items = items.clone();
            let cleared = self.selection.reconcile(items.iter().map(|e| C::id(e)));
            if cleared {
                self.detail.clear();
                self.animator.reset();
            }
            self.list.set_items(items);
        }
    }

    fn on_detail(&mut self, id: EntityId, generation: u64, result: Result<DetailPayload, String>) {
        let mapped = result.and_then(|payload| {
            C::detail_from(payload).ok_or_else(|| "An unknown error occurred.".to_string())
        });
        self.detail.resolve(id, generation, mapped);
    }

    fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let badge = matches!(self.collection.state(), Fetch::Failed(_)).then_some(Badge {
            text: "ERR",
            color: C_TOAST_ERROR,
        });
        let block = pane_chrome(C::SCREEN.title(), C::SCREEN.digit(), true, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if C::needs_faction() && !state.has_faction() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  choose a race first (m → Změnit rasu)",
                    style_muted(),
                )),
                inner,
            );
            return;
        }

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

        match self.selection.visible() {
            Visible::All => self.draw_list(frame, inner),
            Visible::One(_) => self.draw_expanded(frame, inner, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Screen;
    use crate::catalog::HeroesCatalog;
    use grimoire_api::model::{Ability, Hero};

    fn hero(id: EntityId, name: &str) -> Hero {
        Hero {
            id,
            name: name.into(),
            icon: format!("{name}.png").to_lowercase(),
            movement: 3,
            damage: 10,
            health: 100,
            cost: 5,
            attack_type: "melee".into(),
            race_id: Some(1),
            ability: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn ability(name: &str) -> Ability {
        Ability {
            id: 1,
            name: name.into(),
            description: String::new(),
            icon: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn orc_state() -> AppState {
        let mut state = AppState::new("http://wbgl.cz/api/v1".into());
        state.faction = "Orcs".into();
        state
    }

    fn mounted_browser() -> (EntityBrowser<HeroesCatalog>, u64) {
        let mut browser = EntityBrowser::<HeroesCatalog>::new(ComponentId::Heroes);
        let actions = browser.mount(&orc_state());
        let generation = match actions.as_slice() {
            [Action::FetchCollection { screen, generation }] => {
                assert_eq!(*screen, Screen::Heroes);
                *generation
            }
            other => panic!("expected one FetchCollection, got {other:?}"),
        };
        (browser, generation)
    }

    fn press(browser: &mut EntityBrowser<HeroesCatalog>, code: KeyCode) -> Vec<Action> {
        browser.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &orc_state())
    }

    #[test]
    fn test_mount_without_faction_does_not_fetch() {
        let mut browser = EntityBrowser::<HeroesCatalog>::new(ComponentId::Heroes);
        let state = AppState::new("http://wbgl.cz/api/v1".into());
        assert!(browser.mount(&state).is_empty());
    }

    #[test]
    fn test_collection_load_and_expand_narrows() {
        let (mut browser, generation) = mounted_browser();
        browser.on_collection(
            generation,
            Ok(CollectionPayload::Heroes(vec![
                hero(1, "Thrall"),
                hero(2, "Grom"),
            ])),
        );
        assert!(matches!(browser.collection_state(), Fetch::Ready(_)));

        let actions = press(&mut browser, KeyCode::Enter);
        assert_eq!(browser.selection().visible(), Visible::One(1));
        assert!(matches!(
            actions.as_slice(),
            [Action::FetchDetail { id: 1, .. }]
        ));

        // Enter again collapses back to the full list (animation pending).
        press(&mut browser, KeyCode::Enter);
        assert_eq!(browser.selection().visible(), Visible::All);
    }

    #[test]
    fn test_collection_failure_keeps_message() {
        let (mut browser, generation) = mounted_browser();
        browser.on_collection(generation, Err("HTTP error! status: 500".into()));
        match browser.collection_state() {
            Fetch::Failed(message) => assert_eq!(message, "HTTP error! status: 500"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_stale_collection_response_dropped() {
        let (mut browser, old_generation) = mounted_browser();
        let state = orc_state();
        browser.unmount();
        let actions = browser.mount(&state);
        browser.on_collection(old_generation, Ok(CollectionPayload::Heroes(vec![hero(9, "Stale")])));
        assert!(matches!(browser.collection_state(), Fetch::Loading));

        if let [Action::FetchCollection { generation, .. }] = actions.as_slice() {
            browser.on_collection(
                *generation,
                Ok(CollectionPayload::Heroes(vec![hero(1, "Fresh")])),
            );
        }
        assert!(matches!(browser.collection_state(), Fetch::Ready(_)));
    }

    #[test]
    fn test_detail_response_for_replaced_expansion_dropped() {
        let (mut browser, generation) = mounted_browser();
        browser.on_collection(
            generation,
            Ok(CollectionPayload::Heroes(vec![
                hero(1, "Thrall"),
                hero(2, "Grom"),
            ])),
        );

        // Expand hero 1, collapse, move down, expand hero 2.
        let first = press(&mut browser, KeyCode::Enter);
        let first_generation = match first.as_slice() {
            [Action::FetchDetail { generation, .. }] => *generation,
            other => panic!("expected FetchDetail, got {other:?}"),
        };
        press(&mut browser, KeyCode::Enter);
        press(&mut browser, KeyCode::Down);
        let second = press(&mut browser, KeyCode::Enter);
        let second_generation = match second.as_slice() {
            [Action::FetchDetail { id: 2, generation, .. }] => *generation,
            other => panic!("expected FetchDetail for hero 2, got {other:?}"),
        };

        // Hero 1's abilities land late: dropped, hero 2 still loading.
        browser.on_detail(
            1,
            first_generation,
            Ok(DetailPayload::Abilities(vec![ability("Chain Lightning")])),
        );
        assert!(browser.detail_phase(1).is_none());
        assert!(matches!(
            browser.detail_phase(2),
            Some(DetailPhase::Loading)
        ));

        browser.on_detail(
            2,
            second_generation,
            Ok(DetailPayload::Abilities(vec![ability("Bladestorm")])),
        );
        assert!(matches!(
            browser.detail_phase(2),
            Some(DetailPhase::Ready(_))
        ));
    }

    #[test]
    fn test_detail_failure_is_non_fatal() {
        let (mut browser, generation) = mounted_browser();
        browser.on_collection(generation, Ok(CollectionPayload::Heroes(vec![hero(1, "Thrall")])));
        let actions = press(&mut browser, KeyCode::Enter);
        if let [Action::FetchDetail { generation, .. }] = actions.as_slice() {
            browser.on_detail(1, *generation, Err("HTTP error! status: 500".into()));
        }
        // Collection survives, detail renders as unavailable.
        assert!(matches!(browser.collection_state(), Fetch::Ready(_)));
        assert!(matches!(
            browser.detail_phase(1),
            Some(DetailPhase::Unavailable)
        ));
    }

    #[test]
    fn test_reload_clears_dead_selection() {
        let (mut browser, generation) = mounted_browser();
        browser.on_collection(
            generation,
            Ok(CollectionPayload::Heroes(vec![
                hero(1, "Thrall"),
                hero(2, "Grom"),
            ])),
        );
        press(&mut browser, KeyCode::Enter);
        assert_eq!(browser.selection().expanded(), Some(1));

        // A fresh payload no longer contains hero 1.
        browser.on_collection(
            generation,
            Ok(CollectionPayload::Heroes(vec![hero(2, "Grom"), hero(3, "Cairne")])),
        );
        assert_eq!(browser.selection().expanded(), None);
        assert_eq!(browser.selection().visible(), Visible::All);
    }

    #[test]
    fn test_collapse_completion_drops_detail() {
        let (mut browser, generation) = mounted_browser();
        browser.on_collection(generation, Ok(CollectionPayload::Heroes(vec![hero(1, "Thrall")])));
        let actions = press(&mut browser, KeyCode::Enter);
        if let [Action::FetchDetail { generation, .. }] = actions.as_slice() {
            browser.on_detail(
                1,
                *generation,
                Ok(DetailPayload::Abilities(vec![ability("Chain Lightning")])),
            );
        }

        press(&mut browser, KeyCode::Esc);
        let state = orc_state();
        for _ in 0..30 {
            browser.tick(40, &state);
        }
        assert!(!browser.is_animating());
        assert!(browser.detail_phase(1).is_none());
    }
}
