use serde::Serialize;

use crate::food::api::RecipeId;

pub const FAVORITES_CAPACITY: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    AtCapacity,
}

/// Session-scoped favorite recipe ids, unique and in insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Favorites {
    ids: Vec<RecipeId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: RecipeId) -> AddOutcome {
        if self.contains(id) {
            return AddOutcome::AlreadyPresent;
        }
        if self.ids.len() >= FAVORITES_CAPACITY {
            return AddOutcome::AtCapacity;
        }
        self.ids.push(id);
        AddOutcome::Added
    }

    pub fn remove(&mut self, id: RecipeId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    pub fn list(&self) -> &[RecipeId] {
        &self.ids
    }

    pub fn contains(&self, id: RecipeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> Favorites {
        let mut favorites = Favorites::new();
        for id in 1..=FAVORITES_CAPACITY as u64 {
            assert_eq!(favorites.add(RecipeId(id)), AddOutcome::Added);
        }
        favorites
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut favorites = Favorites::new();
        assert_eq!(favorites.add(RecipeId(3)), AddOutcome::Added);
        assert_eq!(favorites.add(RecipeId(3)), AddOutcome::AlreadyPresent);
        assert_eq!(favorites.list(), &[RecipeId(3)]);
    }

    #[test]
    fn test_eighth_add_reports_capacity() {
        let mut favorites = full();
        assert_eq!(favorites.add(RecipeId(99)), AddOutcome::AtCapacity);
        assert_eq!(favorites.len(), FAVORITES_CAPACITY);
        assert!(!favorites.contains(RecipeId(99)));
    }

    #[test]
    fn test_re_adding_when_full_is_not_a_capacity_warning() {
        let mut favorites = full();
        assert_eq!(favorites.add(RecipeId(1)), AddOutcome::AlreadyPresent);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut favorites = Favorites::new();
        favorites.add(RecipeId(1));
        assert!(!favorites.remove(RecipeId(2)));
        assert_eq!(favorites.list(), &[RecipeId(1)]);
    }

    #[test]
    fn test_remove_keeps_order_and_frees_a_slot() {
        let mut favorites = full();
        assert!(favorites.remove(RecipeId(4)));
        assert_eq!(
            favorites.list(),
            &[RecipeId(1), RecipeId(2), RecipeId(3), RecipeId(5), RecipeId(6), RecipeId(7)]
        );
        assert_eq!(favorites.add(RecipeId(8)), AddOutcome::Added);
        assert_eq!(favorites.list().last(), Some(&RecipeId(8)));
    }
}
