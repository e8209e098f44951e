//! Fixed-capacity entity storage with swap-remove deletion.

/// Dense, bounded collection of entities.
///
/// Entities are addressed by their current index only. Removal moves the
/// last entity into the vacated slot, so indices are never stable across
/// mutations and must not be kept as identities.
#[derive(Clone, Debug)]
pub(crate) struct Roster<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Roster<T> {
    /// Creates an empty roster that holds at most `capacity` entities.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entity, silently dropping it when the roster is full.
    ///
    /// Returns whether the entity was stored.
    pub(crate) fn push(&mut self, item: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes the entity at `index`, filling the gap with the last entity.
    pub(crate) fn swap_remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.swap_remove(index))
        } else {
            None
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }
}
