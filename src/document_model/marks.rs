use std::collections::BTreeMap;

/// Handle to a mark registered with a buffer.
///
/// Ids are never reused, so a handle kept after `delete_mark` cannot alias
/// a newer mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(u64);

/// Live marks of one buffer, keyed by creation order.
///
/// Every edit walks all marks, which is O(live marks). Marks are few at
/// interactive scale; an offset-ordered index would be the upgrade if that
/// stops being true.
#[derive(Debug, Clone, Default)]
pub struct MarkSet {
    locations: BTreeMap<MarkId, usize>,
    next_id: u64,
}

impl MarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mark at `location`. Ids are never handed out twice.
    pub fn create(&mut self, location: usize) -> MarkId {
        let id = MarkId(self.next_id);
        self.next_id += 1;
        self.locations.insert(id, location);
        id
    }

    pub fn location(&self, id: MarkId) -> Option<usize> {
        self.locations.get(&id).copied()
    }

    /// Returns false if the mark no longer exists.
    pub fn set_location(&mut self, id: MarkId, location: usize) -> bool {
        match self.locations.get_mut(&id) {
            Some(slot) => {
                *slot = location;
                true
            }
            None => false,
        }
    }

    /// Unregisters the mark, returning its last location.
    pub fn remove(&mut self, id: MarkId) -> Option<usize> {
        self.locations.remove(&id)
    }

    pub fn contains(&self, id: MarkId) -> bool {
        self.locations.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MarkId, usize)> + '_ {
        self.locations.iter().map(|(id, location)| (*id, *location))
    }

    /// `length` bytes were inserted at `at`. Marks sitting exactly at `at`
    /// stay before the new text.
    pub fn adjust_for_insert(&mut self, at: usize, length: usize) {
        for location in self.locations.values_mut() {
            if *location > at {
                *location += length;
            }
        }
    }

    /// `[start, start + length)` was removed. Marks inside the range clamp
    /// to `start`; marks after it move back by `length`.
    pub fn adjust_for_delete(&mut self, start: usize, length: usize) {
        for location in self.locations.values_mut() {
            if *location > start {
                *location = location.saturating_sub(length).max(start);
            }
        }
    }

    /// Used when the whole content is replaced.
    pub fn reset(&mut self, location: usize) {
        for slot in self.locations.values_mut() {
            *slot = location;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_remove() {
        let mut marks = MarkSet::new();
        let a = marks.create(3);
        let b = marks.create(7);
        assert_ne!(a, b);
        assert_eq!(marks.len(), 2);
        assert_eq!(marks.location(a), Some(3));

        assert_eq!(marks.remove(a), Some(3));
        assert!(!marks.contains(a));
        assert_eq!(marks.location(a), None);
        assert!(!marks.set_location(a, 1));

        // ids are not recycled
        let c = marks.create(0);
        assert_ne!(a, c);
        assert_eq!(marks.iter().collect::<Vec<_>>(), vec![(b, 7), (c, 0)]);
    }

    #[test]
    fn test_insert_shift() {
        let mut marks = MarkSet::new();
        let before = marks.create(2);
        let at = marks.create(5);
        let after = marks.create(9);

        marks.adjust_for_insert(5, 4);

        assert_eq!(marks.location(before), Some(2));
        assert_eq!(marks.location(at), Some(5));
        assert_eq!(marks.location(after), Some(13));
    }

    #[test]
    fn test_delete_shift_clamps_inside_range() {
        let mut marks = MarkSet::new();
        let before = marks.create(1);
        let start = marks.create(4);
        let inside = marks.create(6);
        let end = marks.create(8);
        let after = marks.create(12);

        // remove [4, 8)
        marks.adjust_for_delete(4, 4);

        assert_eq!(marks.location(before), Some(1));
        assert_eq!(marks.location(start), Some(4));
        assert_eq!(marks.location(inside), Some(4));
        assert_eq!(marks.location(end), Some(4));
        assert_eq!(marks.location(after), Some(8));
    }

    #[test]
    fn test_reset() {
        let mut marks = MarkSet::new();
        let a = marks.create(10);
        let b = marks.create(20);
        marks.reset(0);
        assert_eq!(marks.location(a), Some(0));
        assert_eq!(marks.location(b), Some(0));
    }
}
