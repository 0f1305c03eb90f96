//! Three-state fetch results with generation-counted staleness guards.
//!
//! Every screen owns one `FetchSlot` for its primary collection. Issuing a
//! request bumps the slot's generation and the spawned task carries that
//! number back with its result; a response whose generation no longer matches
//! is dropped on the floor. This is what stands in for request cancellation —
//! a superseded request still completes, it just can't write into state.

use grimoire_api::model::{Ability, Building, Card, Creep, Hero, Item, Race, Unit, Upgrade};
use tracing::debug;

/// The lazy result of one collection fetch.
#[derive(Debug, Clone)]
pub enum Fetch<T> {
    Loading,
    Failed(String),
    Ready(T),
}

#[derive(Debug)]
pub struct FetchSlot<T> {
    state: Fetch<T>,
    generation: u64,
}

impl<T> FetchSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Fetch::Loading,
            generation: 0,
        }
    }

    pub fn state(&self) -> &Fetch<T> {
        &self.state
    }

    pub fn ready(&self) -> Option<&T> {
        match &self.state {
            Fetch::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Start a new request cycle: back to `Loading`, previous in-flight
    /// responses invalidated. Returns the generation the new request must
    /// echo back through `resolve`.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = Fetch::Loading;
        self.generation
    }

    /// Attach a response. Returns false (and changes nothing) when the
    /// response belongs to a superseded request.
    pub fn resolve(&mut self, generation: u64, result: Result<T, String>) -> bool {
        if generation != self.generation {
            debug!(
                "dropping stale fetch result (generation {generation}, current {})",
                self.generation
            );
            return false;
        }
        self.state = match result {
            Ok(value) => Fetch::Ready(value),
            Err(message) => Fetch::Failed(message),
        };
        true
    }
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Typed payloads carried over the app message channel ──────────────────────

/// Collection response for one screen. The browser converts this into its
/// own entity type via `Catalog::collection_from`.
#[derive(Debug, Clone)]
pub enum CollectionPayload {
    Races(Vec<Race>),
    Race(Box<Race>),
    Heroes(Vec<Hero>),
    Units(Vec<Unit>),
    Buildings(Vec<Building>),
    Items(Vec<Item>),
    Upgrades(Vec<Upgrade>),
    Cards(Vec<Card>),
    Creeps(Vec<Creep>),
}

/// Secondary (detail) response for one expanded entity.
#[derive(Debug, Clone)]
pub enum DetailPayload {
    Abilities(Vec<Ability>),
    Units(Vec<Unit>),
    Creep(Box<Creep>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_resets_to_loading() {
        let mut slot: FetchSlot<Vec<u32>> = FetchSlot::new();
        let generation = slot.begin();
        assert!(slot.resolve(generation, Ok(vec![1, 2])));
        assert_eq!(slot.ready(), Some(&vec![1, 2]));

        slot.begin();
        assert!(matches!(slot.state(), Fetch::Loading));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut slot: FetchSlot<Vec<u32>> = FetchSlot::new();
        let old = slot.begin();
        let new = slot.begin();

        // The superseded request completes late — must not attach.
        assert!(!slot.resolve(old, Ok(vec![1])));
        assert!(matches!(slot.state(), Fetch::Loading));

        assert!(slot.resolve(new, Ok(vec![2])));
        assert_eq!(slot.ready(), Some(&vec![2]));
    }

    #[test]
    fn test_failure_keeps_message() {
        let mut slot: FetchSlot<Vec<u32>> = FetchSlot::new();
        let generation = slot.begin();
        slot.resolve(generation, Err("HTTP error! status: 500".to_string()));
        match slot.state() {
            Fetch::Failed(message) => assert_eq!(message, "HTTP error! status: 500"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
