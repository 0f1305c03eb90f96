//! Component trait — the interface every screen and overlay implements.
//!
//! Design principles:
//! - Components are self-contained: they own their state and render themselves.
//! - Components receive `AppState` (read-only) for data they don't own.
//! - Components produce `Vec<Action>` — they never mutate shared state directly.
//! - The App event-loop dispatches those actions and routes fetch results back
//!   through `on_collection` / `on_detail`.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use grimoire_api::model::EntityId;

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::fetch::{CollectionPayload, DetailPayload};

pub trait Component {
    fn id(&self) -> ComponentId;

    /// Called when the component's screen becomes active. Returns the fetch
    /// actions needed to populate it.
    fn mount(&mut self, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Called when the component's screen is left. Discards per-visit state
    /// and invalidates in-flight requests.
    fn unmount(&mut self) {}

    /// Handle a key event. Only called while this component's screen is active.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action>;

    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Called on the animation tick with the elapsed milliseconds.
    fn tick(&mut self, _dt_ms: u32, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// A collection response for this component's screen arrived.
    fn on_collection(&mut self, _generation: u64, _result: Result<CollectionPayload, String>) {}

    /// A detail response for this component's screen arrived.
    fn on_detail(
        &mut self,
        _id: EntityId,
        _generation: u64,
        _result: Result<DetailPayload, String>,
    ) {
    }

    /// Does this component currently run an animation that needs redraws?
    fn is_animating(&self) -> bool {
        false
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState);
}
