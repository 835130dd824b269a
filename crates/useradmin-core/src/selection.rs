use serde::Serialize;

use crate::models::{User, UserId};

/// Ids of the checked rows, in the order they were checked.
///
/// Two sets are equal when they hold the same ids; check order is ignored.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: Vec<UserId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present
    pub fn toggle(&mut self, id: UserId) {
        if let Some(pos) = self.ids.iter().position(|x| *x == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[UserId] {
        &self.ids
    }

    /// Drop ids whose user is not in `users`. Returns how many were dropped.
    pub fn retain_existing(&mut self, users: &[User]) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| users.iter().any(|u| u.id == *id));
        before - self.ids.len()
    }
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.ids.iter().all(|id| other.contains(*id))
    }
}

impl Eq for SelectionSet {}

impl FromIterator<UserId> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = UserId>>(iter: T) -> Self {
        let mut set = Self::new();
        for id in iter {
            if !set.contains(id) {
                set.ids.push(id);
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = SelectionSet::new();
        set.toggle(UserId(2));
        set.toggle(UserId(3));
        assert_eq!(set.ids(), &[UserId(2), UserId(3)]);

        set.toggle(UserId(2));
        assert_eq!(set.ids(), &[UserId(3)]);
        assert!(!set.contains(UserId(2)));
    }

    #[test]
    fn clear_empties_the_set() {
        let mut set: SelectionSet = [UserId(1), UserId(2)].into_iter().collect();
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn retain_existing_drops_stale_ids() {
        let mut set: SelectionSet = [UserId(1), UserId(9), UserId(2)].into_iter().collect();
        let users = vec![
            User::new(1, "a", "a@example.com"),
            User::new(2, "b", "b@example.com"),
        ];

        assert_eq!(set.retain_existing(&users), 1);
        assert_eq!(set.ids(), &[UserId(1), UserId(2)]);
    }

    #[test]
    fn collecting_skips_duplicates() {
        let set: SelectionSet = [UserId(4), UserId(4), UserId(5)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn retoggling_a_selected_id_restores_the_set() {
        let mut set: SelectionSet = [UserId(2), UserId(3)].into_iter().collect();
        let original = set.clone();

        set.toggle(UserId(2));
        set.toggle(UserId(2));

        assert_eq!(set.ids(), &[UserId(3), UserId(2)]);
        assert_eq!(set, original);
    }

    #[test]
    fn equality_needs_the_same_members() {
        let a: SelectionSet = [UserId(1), UserId(2)].into_iter().collect();
        let b: SelectionSet = [UserId(1), UserId(3)].into_iter().collect();
        let c: SelectionSet = [UserId(1)].into_iter().collect();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    proptest! {
        #[test]
        fn double_toggle_is_identity(start in prop::collection::vec(0i64..50, 0..10), id in 0i64..50) {
            let mut set: SelectionSet = start.into_iter().map(UserId).collect();
            let original = set.clone();
            set.toggle(UserId(id));
            set.toggle(UserId(id));
            prop_assert_eq!(set, original);
        }
    }
}
