//! Secondary fetch for an expanded row's detail payload.
//!
//! Detail requests are keyed by `(entity id, generation)`: a response for a
//! row that is no longer expanded, or from a superseded request for the same
//! row, is discarded. A failed detail fetch is non-fatal — the screen keeps
//! its collection and the detail block renders its empty text.

use grimoire_api::model::EntityId;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub enum DetailPhase<T> {
    Loading,
    Ready(T),
    /// The fetch failed; rendered the same as an empty payload.
    Unavailable,
}

#[derive(Debug)]
pub struct DetailSlot<T> {
    current: Option<(EntityId, DetailPhase<T>)>,
    generation: u64,
}

impl<T> DetailSlot<T> {
    pub fn new() -> Self {
        Self {
            current: None,
            generation: 0,
        }
    }

    /// Start loading detail for `id`, superseding whatever was in flight.
    pub fn begin(&mut self, id: EntityId) -> u64 {
        self.generation += 1;
        self.current = Some((id, DetailPhase::Loading));
        self.generation
    }

    /// Forget everything, invalidating in-flight responses.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    pub fn resolve(&mut self, id: EntityId, generation: u64, result: Result<T, String>) -> bool {
        if generation != self.generation {
            debug!("dropping stale detail result for entity {id}");
            return false;
        }
        match &self.current {
            Some((current_id, _)) if *current_id == id => {}
            _ => {
                debug!("dropping detail result for non-expanded entity {id}");
                return false;
            }
        }
        let phase = match result {
            Ok(value) => DetailPhase::Ready(value),
            Err(message) => {
                warn!("detail fetch for entity {id} failed: {message}");
                DetailPhase::Unavailable
            }
        };
        self.current = Some((id, phase));
        true
    }

    /// Phase for `id`, if it is the entity this slot currently tracks.
    pub fn phase_for(&self, id: EntityId) -> Option<&DetailPhase<T>> {
        match &self.current {
            Some((current_id, phase)) if *current_id == id => Some(phase),
            _ => None,
        }
    }
}

impl<T> Default for DetailSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_attaches_to_expanded_entity() {
        let mut slot: DetailSlot<Vec<&str>> = DetailSlot::new();
        let generation = slot.begin(5);
        assert!(slot.resolve(5, generation, Ok(vec!["Bash"])));
        assert!(matches!(slot.phase_for(5), Some(DetailPhase::Ready(_))));
    }

    #[test]
    fn test_late_response_for_previous_entity_is_dropped() {
        let mut slot: DetailSlot<Vec<&str>> = DetailSlot::new();
        let first = slot.begin(1);
        let second = slot.begin(2);

        // The response for entity 1 lands after 2 took over the expansion.
        assert!(!slot.resolve(1, first, Ok(vec!["Stale"])));
        assert!(matches!(slot.phase_for(2), Some(DetailPhase::Loading)));

        assert!(slot.resolve(2, second, Ok(vec!["Fresh"])));
        match slot.phase_for(2) {
            Some(DetailPhase::Ready(abilities)) => assert_eq!(abilities, &vec!["Fresh"]),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_clear_invalidates_in_flight_request() {
        let mut slot: DetailSlot<Vec<&str>> = DetailSlot::new();
        let generation = slot.begin(3);
        slot.clear();
        assert!(!slot.resolve(3, generation, Ok(vec!["Gone"])));
        assert!(slot.phase_for(3).is_none());
    }

    #[test]
    fn test_failure_is_non_fatal() {
        let mut slot: DetailSlot<Vec<&str>> = DetailSlot::new();
        let generation = slot.begin(9);
        assert!(slot.resolve(9, generation, Err("HTTP error! status: 500".into())));
        assert!(matches!(slot.phase_for(9), Some(DetailPhase::Unavailable)));
    }
}
