use super::error::{EditError, EditResult};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub const DEFAULT_KILL_RING_MAX: usize = 30;

/// Kill ring shared by every buffer of a session. Editing is single
/// threaded, so `Rc<RefCell<_>>` is enough; the last write wins.
pub type SharedKillRing = Rc<RefCell<KillRing>>;

/// Bounded history of killed text, most recent last.
#[derive(Debug, Clone)]
pub struct KillRing {
    entries: VecDeque<String>,
    capacity: usize,
}

impl KillRing {
    /// Ring holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// A new ring ready to hand to several buffers.
    pub fn shared(capacity: usize) -> SharedKillRing {
        Rc::new(RefCell::new(Self::new(capacity)))
    }

    /// Store killed text, dropping the oldest entry when full
    pub fn push(&mut self, text: String) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(text);
    }

    /// Most recent entry; reading does not remove it.
    pub fn last(&self) -> EditResult<&str> {
        self.entries
            .back()
            .map(String::as_str)
            .ok_or(EditError::EmptyKillRing)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for KillRing {
    fn default() -> Self {
        Self::new(DEFAULT_KILL_RING_MAX)
    }
}
