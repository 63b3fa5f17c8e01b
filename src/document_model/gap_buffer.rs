//! Byte storage with a movable gap.
//!
//! Layout is `[prefix | gap | suffix]`. Edits at the gap are O(1) amortized;
//! an edit far from the previous one first pays O(distance) to move the gap
//! there. That cost is the accepted trade-off for cursor-local editing.

use super::error::{EditError, EditResult};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Default extra room added whenever the gap has to grow.
pub const DEFAULT_GAP_SLACK: usize = 256;

#[derive(Debug, Clone)]
pub struct GapBuffer {
    data: Vec<u8>,
    gap_start: usize,
    gap_end: usize,
    slack: usize,
}

impl GapBuffer {
    pub fn new() -> Self {
        Self::with_slack(DEFAULT_GAP_SLACK)
    }

    /// Empty buffer whose gap grows by `slack` extra bytes when it fills.
    pub fn with_slack(slack: usize) -> Self {
        Self::from_bytes(&[], slack)
    }

    /// Content goes before the gap, so the first insert at the end is free.
    pub fn from_bytes(bytes: &[u8], slack: usize) -> Self {
        let slack = slack.max(1);
        let mut data = Vec::with_capacity(bytes.len() + slack);
        data.extend_from_slice(bytes);
        data.resize(bytes.len() + slack, 0);
        Self {
            data,
            gap_start: bytes.len(),
            gap_end: bytes.len() + slack,
            slack,
        }
    }

    /// Logical size in bytes.
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Logical offset where the gap currently sits.
    pub fn gap_position(&self) -> usize {
        self.gap_start
    }

    fn physical(&self, offset: usize) -> usize {
        if offset < self.gap_start {
            offset
        } else {
            offset + self.gap_len()
        }
    }

    fn check_range(&self, offset: usize, length: usize) -> EditResult<()> {
        let size = self.len();
        match offset.checked_add(length) {
            Some(end) if end <= size => Ok(()),
            _ => Err(EditError::OutOfRange {
                position: offset.saturating_add(length),
                size,
            }),
        }
    }

    /// The byte at logical `offset`, skipping over the gap.
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        if offset >= self.len() {
            return None;
        }
        Some(self.data[self.physical(offset)])
    }

    /// Bytes of `[offset, offset + length)`. Only allocates when the range
    /// straddles the gap.
    pub fn read(&self, offset: usize, length: usize) -> EditResult<Cow<'_, [u8]>> {
        self.check_range(offset, length)?;
        let end = offset + length;
        if end <= self.gap_start {
            Ok(Cow::Borrowed(&self.data[offset..end]))
        } else if offset >= self.gap_start {
            let gap = self.gap_len();
            Ok(Cow::Borrowed(&self.data[offset + gap..end + gap]))
        } else {
            let mut bytes = Vec::with_capacity(length);
            bytes.extend_from_slice(&self.data[offset..self.gap_start]);
            let rest = end - self.gap_start;
            bytes.extend_from_slice(&self.data[self.gap_end..self.gap_end + rest]);
            Ok(Cow::Owned(bytes))
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(&self.data[..self.gap_start]);
        bytes.extend_from_slice(&self.data[self.gap_end..]);
        bytes
    }

    fn move_gap(&mut self, offset: usize) {
        if offset < self.gap_start {
            let shift = self.gap_start - offset;
            self.data
                .copy_within(offset..self.gap_start, self.gap_end - shift);
            self.gap_start = offset;
            self.gap_end -= shift;
            trace!(offset, shift, "gap moved back");
        } else if offset > self.gap_start {
            let shift = offset - self.gap_start;
            self.data
                .copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
            trace!(offset, shift, "gap moved forward");
        }
    }

    /// Grows the gap in place; `gap_start` does not move.
    fn ensure_gap(&mut self, needed: usize) {
        let available = self.gap_len();
        if available >= needed {
            return;
        }
        let growth = needed - available + self.slack;
        let old_len = self.data.len();
        let suffix_len = old_len - self.gap_end;
        self.data.resize(old_len + growth, 0);
        if suffix_len > 0 {
            self.data
                .copy_within(self.gap_end..old_len, self.gap_end + growth);
        }
        self.gap_end += growth;
        debug!(growth, capacity = self.data.len(), "gap grown");
    }

    /// Copies `bytes` in at `offset`, moving the gap there first.
    pub fn insert(&mut self, offset: usize, bytes: &[u8]) -> EditResult<()> {
        self.check_range(offset, 0)?;
        if bytes.is_empty() {
            return Ok(());
        }
        self.move_gap(offset);
        self.ensure_gap(bytes.len());
        self.data[self.gap_start..self.gap_start + bytes.len()].copy_from_slice(bytes);
        self.gap_start += bytes.len();
        Ok(())
    }

    /// Removes the `length` bytes after `offset`.
    pub fn delete(&mut self, offset: usize, length: usize) -> EditResult<()> {
        self.check_range(offset, length)?;
        self.move_gap(offset);
        self.gap_end += length;
        Ok(())
    }

    /// Removes the `length` bytes before `offset`.
    pub fn delete_before(&mut self, offset: usize, length: usize) -> EditResult<()> {
        self.check_range(offset, 0)?;
        if length > offset {
            return Err(EditError::OutOfRange {
                position: offset,
                size: self.len(),
            });
        }
        self.move_gap(offset);
        self.gap_start -= length;
        Ok(())
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}
