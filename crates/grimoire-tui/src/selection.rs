//! Exclusive row expansion for the entity browsers.
//!
//! At most one row is expanded per screen. While a row is expanded the list
//! narrows to that single row; collapsing restores the full list. Selection
//! state never survives a collection reload that no longer contains the
//! expanded id.

use grimoire_api::model::EntityId;

/// What the list should currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visible {
    /// Every (filter-matching) row.
    All,
    /// Only the expanded row.
    One(EntityId),
}

/// Outcome of a toggle press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Expanded(EntityId),
    Collapsed,
}

#[derive(Debug, Default)]
pub struct Selection {
    expanded: Option<EntityId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expanded(&self) -> Option<EntityId> {
        self.expanded
    }

    pub fn is_expanded(&self, id: EntityId) -> bool {
        self.expanded == Some(id)
    }

    /// Same id collapses, any other id takes over the expansion.
    pub fn toggle(&mut self, id: EntityId) -> Toggle {
        if self.expanded == Some(id) {
            self.expanded = None;
            Toggle::Collapsed
        } else {
            self.expanded = Some(id);
            Toggle::Expanded(id)
        }
    }

    pub fn clear(&mut self) {
        self.expanded = None;
    }

    pub fn visible(&self) -> Visible {
        match self.expanded {
            Some(id) => Visible::One(id),
            None => Visible::All,
        }
    }

    /// Drop the expansion when its id vanished from the collection. Returns
    /// true when the selection was cleared.
    pub fn reconcile<I>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = EntityId>,
    {
        let Some(expanded) = self.expanded else {
            return false;
        };
        if ids.into_iter().any(|id| id == expanded) {
            return false;
        }
        self.expanded = None;
        true
    }
}

/// Rows to render given the current expansion, in collection order.
pub fn visible_rows<'a, T>(
    collection: &'a [T],
    selection: &Selection,
    id_of: impl Fn(&T) -> EntityId,
) -> Vec<&'a T> {
    match selection.visible() {
        Visible::All => collection.iter().collect(),
        Visible::One(id) => collection.iter().filter(|e| id_of(e) == id).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_expands_then_collapses() {
        let mut selection = Selection::new();
        assert_eq!(selection.toggle(4), Toggle::Expanded(4));
        assert_eq!(selection.visible(), Visible::One(4));
        assert_eq!(selection.toggle(4), Toggle::Collapsed);
        assert_eq!(selection.visible(), Visible::All);
    }

    #[test]
    fn test_toggle_other_id_replaces_expansion() {
        let mut selection = Selection::new();
        selection.toggle(1);
        assert_eq!(selection.toggle(2), Toggle::Expanded(2));
        assert_eq!(selection.expanded(), Some(2));
    }

    #[test]
    fn test_visible_rows_narrow_to_expanded() {
        let rows = vec![1u32, 2, 3];
        let mut selection = Selection::new();
        selection.toggle(2);
        let visible = visible_rows(&rows, &selection, |n| *n);
        assert_eq!(visible, vec![&2]);
    }

    #[test]
    fn test_visible_rows_empty_when_id_absent() {
        // Transient state between expansion and reconcile.
        let rows = vec![1u32, 3];
        let mut selection = Selection::new();
        selection.toggle(2);
        assert!(visible_rows(&rows, &selection, |n| *n).is_empty());
    }

    #[test]
    fn test_reconcile_clears_dead_selection() {
        let mut selection = Selection::new();
        selection.toggle(7);
        assert!(selection.reconcile([1, 2, 3]));
        assert_eq!(selection.expanded(), None);
        assert_eq!(selection.visible(), Visible::All);
    }

    #[test]
    fn test_reconcile_keeps_live_selection() {
        let mut selection = Selection::new();
        selection.toggle(2);
        assert!(!selection.reconcile([1, 2, 3]));
        assert_eq!(selection.expanded(), Some(2));
    }
}
