use super::buffer::Buffer;
use super::error::{EditError, EditResult};

impl Buffer {
    fn region_bounds(&self, start: usize, end: usize) -> EditResult<(usize, usize)> {
        self.check_position(start)?;
        self.check_position(end)?;
        Ok((start.min(end), start.max(end)))
    }

    /// Pushes the region onto the kill ring, leaving the text alone.
    pub fn copy_region(&mut self, start: usize, end: usize) -> EditResult<()> {
        let (start, end) = self.region_bounds(start, end)?;
        let text = self.substring(start, end)?;
        self.kill_ring.borrow_mut().push(text);
        Ok(())
    }

    /// Removes the region and pushes its text onto the kill ring.
    pub fn kill_region(&mut self, start: usize, end: usize) -> EditResult<()> {
        self.copy_region(start, end)?;
        self.delete_region(start, end)
    }

    /// Removes the region. Point and marks inside it land on its start.
    pub fn delete_region(&mut self, start: usize, end: usize) -> EditResult<()> {
        let (start, end) = self.region_bounds(start, end)?;
        let length = end - start;
        if length == 0 {
            return Ok(());
        }
        self.contents.delete(start, length)?;
        if self.point > start {
            self.point = self.point.saturating_sub(length).max(start);
        }
        self.marks.adjust_for_delete(start, length);
        self.goal_column = None;
        self.modified = true;
        Ok(())
    }

    /// Kills the rest of the line, or the line terminator itself when point
    /// is already at the end of a line.
    pub fn kill_line(&mut self) -> EditResult<()> {
        if self.is_end_of_buffer() {
            return Err(EditError::EndOfBuffer);
        }
        let end = if self.contents.byte_at(self.point) == Some(b'\n') {
            self.point + 1
        } else {
            self.line_end(self.point)
        };
        self.kill_region(self.point, end)
    }

    /// Inserts the most recent kill at point.
    pub fn yank(&mut self) -> EditResult<()> {
        let text = self.kill_ring.borrow().last()?.to_string();
        self.insert(&text)
    }

    /// Breaks the line and repeats the current line's indentation up to
    /// point; whitespace after point moves down with the rest of the line.
    pub fn newline(&mut self) -> EditResult<()> {
        let start = self.line_start(self.point);
        let mut end = start;
        while end < self.point && matches!(self.contents.byte_at(end), Some(b' ' | b'\t')) {
            end += 1;
        }
        let indentation = self.substring(start, end)?;
        self.insert(&format!("\n{indentation}"))
    }
}

#[cfg(test)]
mod tests {
    use crate::document_model::{Buffer, EditError, KillRing};

    fn buffer_with(text: &str) -> Buffer {
        Buffer::with_text(KillRing::shared(8), text)
    }

    #[test]
    fn test_copy_region_leaves_text() {
        let mut buffer = buffer_with("hello world");
        buffer.copy_region(11, 6).unwrap();
        assert_eq!(buffer.text(), "hello world");
        assert_eq!(buffer.kill_ring().borrow().last().unwrap(), "world");
    }

    #[test]
    fn test_kill_region() {
        let mut buffer = buffer_with("hello cruel world");
        buffer.end_of_buffer();
        buffer.kill_region(5, 11).unwrap();
        assert_eq!(buffer.text(), "hello world");
        assert_eq!(buffer.point(), 11);
        assert_eq!(buffer.kill_ring().borrow().last().unwrap(), " cruel");
    }

    #[test]
    fn test_delete_region_clamps_point_and_marks() {
        let mut buffer = buffer_with("0123456789");
        let before = buffer.new_mark_at(1).unwrap();
        let inside = buffer.new_mark_at(5).unwrap();
        let after = buffer.new_mark_at(9).unwrap();
        buffer.goto_char(6).unwrap();

        buffer.delete_region(7, 3).unwrap();

        assert_eq!(buffer.text(), "012789");
        assert_eq!(buffer.point(), 3);
        assert_eq!(buffer.mark_location(before).unwrap(), 1);
        assert_eq!(buffer.mark_location(inside).unwrap(), 3);
        assert_eq!(buffer.mark_location(after).unwrap(), 5);
        assert!(buffer.kill_ring().borrow().is_empty());
    }

    #[test]
    fn test_region_out_of_range() {
        let mut buffer = buffer_with("abc");
        assert!(buffer.delete_region(1, 10).unwrap_err().is_boundary());
        assert!(buffer.copy_region(10, 1).is_err());
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn test_kill_line_to_end_of_line() {
        let mut buffer = buffer_with("abc\ndef");
        buffer.kill_line().unwrap();
        assert_eq!(buffer.text(), "\ndef");
        assert_eq!(buffer.kill_ring().borrow().last().unwrap(), "abc");

        buffer.yank().unwrap();
        assert_eq!(buffer.text(), "abc\ndef");
        assert_eq!(buffer.point(), 3);
    }

    #[test]
    fn test_kill_line_at_line_end_kills_terminator() {
        let mut buffer = buffer_with("abc\ndef");
        buffer.kill_line().unwrap();
        buffer.kill_line().unwrap();
        assert_eq!(buffer.text(), "def");
        assert_eq!(buffer.kill_ring().borrow().last().unwrap(), "\n");
    }

    #[test]
    fn test_kill_line_at_end_of_buffer() {
        let mut buffer = buffer_with("abc");
        buffer.end_of_buffer();
        assert!(matches!(buffer.kill_line(), Err(EditError::EndOfBuffer)));
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn test_yank_empty_ring() {
        let mut buffer = buffer_with("abc");
        assert!(matches!(buffer.yank(), Err(EditError::EmptyKillRing)));
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn test_yank_uses_latest_kill() {
        let mut buffer = buffer_with("one two");
        buffer.copy_region(0, 3).unwrap();
        buffer.copy_region(4, 7).unwrap();
        buffer.end_of_buffer();
        buffer.yank().unwrap();
        buffer.yank().unwrap();
        assert_eq!(buffer.text(), "one twotwotwo");
    }

    #[test]
    fn test_newline_copies_indentation() {
        let mut buffer = buffer_with("    fn main() {");
        buffer.end_of_buffer();
        buffer.newline().unwrap();
        assert_eq!(buffer.text(), "    fn main() {\n    ");
        assert_eq!(buffer.point(), buffer.len());
        assert_eq!(buffer.current_line(), 2);

        let mut plain = buffer_with("abc");
        plain.goto_char(1).unwrap();
        plain.newline().unwrap();
        assert_eq!(plain.text(), "a\nbc");
        assert_eq!(plain.point(), 2);
    }

    #[test]
    fn test_newline_with_tabs() {
        let mut buffer = buffer_with("\t\tx");
        buffer.end_of_buffer();
        buffer.newline().unwrap();
        assert_eq!(buffer.text(), "\t\tx\n\t\t");
    }

    #[test]
    fn test_newline_inside_indentation() {
        let mut buffer = buffer_with("    x");
        buffer.goto_char(2).unwrap();
        buffer.newline().unwrap();
        assert_eq!(buffer.text(), "  \n    x");
        assert_eq!(buffer.point(), 5);

        let mut at_start = buffer_with("    x");
        at_start.newline().unwrap();
        assert_eq!(at_start.text(), "\n    x");
        assert_eq!(at_start.point(), 1);
    }
}
