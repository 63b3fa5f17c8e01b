use super::encoding::LineEnding;
use super::error::{EditError, EditResult};
use super::gap_buffer::GapBuffer;
use super::kill_ring::SharedKillRing;
use super::marks::{MarkId, MarkSet};
use super::utf8;
use crate::config::RcConfig;
use encoding_rs::Encoding;
use std::cmp::Ordering;
use std::path::PathBuf;

/// A text buffer: gap-buffer storage, a point, tracked marks and file
/// metadata. Offsets are byte offsets into the UTF-8 content.
pub struct Buffer {
    pub(super) contents: GapBuffer,
    pub(super) point: usize,
    pub(super) marks: MarkSet,
    pub(super) mark: Option<MarkId>,
    // preferred display column for vertical movement
    pub(super) goal_column: Option<usize>,
    pub(super) kill_ring: SharedKillRing,
    pub(super) tab_width: usize,
    pub(super) gap_slack: usize,
    pub(super) encodings: Vec<&'static Encoding>,
    pub(super) file_name: Option<PathBuf>,
    pub(super) file_encoding: &'static Encoding,
    pub(super) line_ending: LineEnding,
    pub(super) modified: bool,
}

impl Buffer {
    /// Empty buffer with default settings, sharing `kill_ring`.
    pub fn new(kill_ring: SharedKillRing) -> Self {
        Self::with_config(kill_ring, &RcConfig::default())
    }

    /// Empty buffer taking tab width, gap slack, encodings and line ending
    /// from `config`.
    pub fn with_config(kill_ring: SharedKillRing, config: &RcConfig) -> Self {
        Self {
            contents: GapBuffer::with_slack(config.gap_slack),
            point: 0,
            marks: MarkSet::new(),
            mark: None,
            goal_column: None,
            kill_ring,
            tab_width: config.tab_width,
            gap_slack: config.gap_slack,
            encodings: config.encodings.clone(),
            file_name: None,
            file_encoding: encoding_rs::UTF_8,
            line_ending: config.line_ending,
            modified: false,
        }
    }

    /// Unmodified buffer holding `text`, point at the start.
    pub fn with_text(kill_ring: SharedKillRing, text: &str) -> Self {
        let mut buffer = Self::new(kill_ring);
        buffer.contents = GapBuffer::from_bytes(text.as_bytes(), buffer.gap_slack);
        buffer
    }

    /// Current byte offset of point.
    pub fn point(&self) -> usize {
        self.point
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// True once content or file format changed since the last load or save.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn kill_ring(&self) -> &SharedKillRing {
        &self.kill_ring
    }

    pub(super) fn check_position(&self, position: usize) -> EditResult<()> {
        if position > self.len() {
            return Err(EditError::OutOfRange {
                position,
                size: self.len(),
            });
        }
        Ok(())
    }

    /// Offset just past the character starting at `pos`.
    pub(super) fn next_char_offset(&self, pos: usize) -> Option<usize> {
        let lead = self.contents.byte_at(pos)?;
        Some((pos + utf8::lead_byte_len(lead)).min(self.len()))
    }

    /// Offset of the lead byte of the character ending at `pos`.
    pub(super) fn prev_char_offset(&self, pos: usize) -> Option<usize> {
        if pos == 0 {
            return None;
        }
        let mut offset = pos - 1;
        while offset > 0
            && self
                .contents
                .byte_at(offset)
                .is_some_and(utf8::is_continuation)
        {
            offset -= 1;
        }
        Some(offset)
    }

    /// Offset `n` characters away from `from`; negative `n` goes backward.
    pub(super) fn offset_by_chars(&self, from: usize, n: isize) -> EditResult<usize> {
        let mut offset = from;
        if n >= 0 {
            for _ in 0..n {
                offset = self
                    .next_char_offset(offset)
                    .ok_or(EditError::EndOfBuffer)?;
            }
        } else {
            for _ in 0..n.unsigned_abs() {
                offset = self
                    .prev_char_offset(offset)
                    .ok_or(EditError::BeginningOfBuffer)?;
            }
        }
        Ok(offset)
    }

    /// Moves point to `position`; fails if it lies past the end.
    pub fn goto_char(&mut self, position: usize) -> EditResult<()> {
        self.check_position(position)?;
        self.point = position;
        self.goal_column = None;
        Ok(())
    }

    /// Moves point to offset 0.
    pub fn beginning_of_buffer(&mut self) {
        self.point = 0;
        self.goal_column = None;
    }

    /// Moves point past the last byte.
    pub fn end_of_buffer(&mut self) {
        self.point = self.len();
        self.goal_column = None;
    }

    pub fn is_beginning_of_buffer(&self) -> bool {
        self.point == 0
    }

    pub fn is_end_of_buffer(&self) -> bool {
        self.point == self.len()
    }

    /// Inserts `text` at point and moves point past it.
    pub fn insert(&mut self, text: &str) -> EditResult<()> {
        let at = self.point;
        self.contents.insert(at, text.as_bytes())?;
        self.point += text.len();
        self.marks.adjust_for_insert(at, text.len());
        self.goal_column = None;
        if !text.is_empty() {
            self.modified = true;
        }
        Ok(())
    }

    /// Moves point `n` characters forward (backward if negative). Point
    /// does not move when the buffer edge would be crossed.
    pub fn forward_char(&mut self, n: isize) -> EditResult<()> {
        let target = self.offset_by_chars(self.point, n)?;
        self.point = target;
        self.goal_column = None;
        Ok(())
    }

    /// Moves point `n` characters backward.
    pub fn backward_char(&mut self, n: isize) -> EditResult<()> {
        self.forward_char(n.saturating_neg())
    }

    /// Deletes `n` characters after point, or `-n` before it.
    pub fn delete_char(&mut self, n: isize) -> EditResult<()> {
        let target = self.offset_by_chars(self.point, n)?;
        match target.cmp(&self.point) {
            Ordering::Greater => {
                let length = target - self.point;
                self.contents.delete(self.point, length)?;
                self.marks.adjust_for_delete(self.point, length);
                self.modified = true;
            }
            Ordering::Less => {
                let length = self.point - target;
                self.contents.delete_before(self.point, length)?;
                self.point = target;
                self.marks.adjust_for_delete(target, length);
                self.modified = true;
            }
            Ordering::Equal => {}
        }
        self.goal_column = None;
        Ok(())
    }

    /// The character starting at `location`, if any.
    pub fn char_after(&self, location: usize) -> Option<char> {
        let lead = self.contents.byte_at(location)?;
        let length = utf8::lead_byte_len(lead).min(self.len() - location);
        let bytes = self.contents.read(location, length).ok()?;
        String::from_utf8_lossy(&bytes).chars().next()
    }

    /// The character ending at `location`, if any.
    pub fn char_before(&self, location: usize) -> Option<char> {
        if location > self.len() {
            return None;
        }
        self.prev_char_offset(location)
            .and_then(|start| self.char_after(start))
    }

    /// Text of `[min(start, end), max(start, end))`.
    pub fn substring(&self, start: usize, end: usize) -> EditResult<String> {
        let (start, end) = (start.min(end), start.max(end));
        let bytes = self.contents.read(start, end - start)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// The whole content.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.contents.to_vec()).into_owned()
    }

    /// Terminal columns `text` occupies, with tabs expanded.
    pub fn display_width(&self, text: &str) -> usize {
        utf8::display_width(text, self.tab_width)
    }

    // Selection mark

    /// Sets the selection mark, creating it on first use.
    pub fn set_mark(&mut self, position: usize) -> EditResult<()> {
        self.check_position(position)?;
        match self.mark.filter(|&id| self.marks.contains(id)) {
            Some(id) => {
                self.marks.set_location(id, position);
            }
            None => self.mark = Some(self.marks.create(position)),
        }
        Ok(())
    }

    /// Location of the selection mark.
    pub fn mark(&self) -> EditResult<usize> {
        self.mark
            .and_then(|id| self.marks.location(id))
            .ok_or(EditError::MarkNotSet)
    }

    pub fn point_at_mark(&self) -> bool {
        self.mark().is_ok_and(|mark| self.point == mark)
    }

    pub fn point_before_mark(&self) -> bool {
        self.mark().is_ok_and(|mark| self.point < mark)
    }

    pub fn point_after_mark(&self) -> bool {
        self.mark().is_ok_and(|mark| self.point > mark)
    }

    /// Swaps point with the selection mark.
    pub fn exchange_point_and_mark(&mut self) -> EditResult<()> {
        let mark = self.mark()?;
        self.set_mark(self.point)?;
        self.point = mark;
        self.goal_column = None;
        Ok(())
    }

    // Tracked marks

    /// Creates a tracked mark at point.
    pub fn new_mark(&mut self) -> MarkId {
        self.marks.create(self.point)
    }

    /// Creates a tracked mark at `location`.
    pub fn new_mark_at(&mut self, location: usize) -> EditResult<MarkId> {
        self.check_position(location)?;
        Ok(self.marks.create(location))
    }

    /// Where a tracked mark currently sits.
    pub fn mark_location(&self, id: MarkId) -> EditResult<usize> {
        self.marks.location(id).ok_or(EditError::UnknownMark(id))
    }

    /// Moves a tracked mark to `location`.
    pub fn set_mark_location(&mut self, id: MarkId, location: usize) -> EditResult<()> {
        self.check_position(location)?;
        if self.marks.set_location(id, location) {
            Ok(())
        } else {
            Err(EditError::UnknownMark(id))
        }
    }

    /// Releases the mark; edits stop adjusting it.
    pub fn delete_mark(&mut self, id: MarkId) -> EditResult<()> {
        self.marks.remove(id).ok_or(EditError::UnknownMark(id))?;
        if self.mark == Some(id) {
            self.mark = None;
        }
        Ok(())
    }

    /// How point relates to the mark: `Less` means point is before it.
    pub fn compare_point(&self, id: MarkId) -> EditResult<Ordering> {
        Ok(self.point.cmp(&self.mark_location(id)?))
    }

    /// Moves point to a tracked mark.
    pub fn goto_mark(&mut self, id: MarkId) -> EditResult<()> {
        let location = self.mark_location(id)?;
        self.goto_char(location)
    }

    /// Live marks in creation order, the selection mark included.
    pub fn marks(&self) -> impl Iterator<Item = (MarkId, usize)> + '_ {
        self.marks.iter()
    }

    /// Runs `f` and puts point and the preferred column back afterwards,
    /// whatever `f` returned. Point follows the text it sat on if `f`
    /// edited around it.
    pub fn save_point<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.marks.create(self.point);
        let goal_column = self.goal_column;
        let result = f(self);
        if let Some(location) = self.marks.remove(saved) {
            self.point = location.min(self.len());
        }
        self.goal_column = goal_column;
        result
    }
}
