use super::buffer::Buffer;
use super::error::{EditError, EditResult};
use super::utf8;

impl Buffer {
    /// Start of the line containing `pos`.
    pub(super) fn line_start(&self, pos: usize) -> usize {
        let mut offset = pos;
        while let Some(prev) = self.prev_char_offset(offset) {
            if self.contents.byte_at(prev) == Some(b'\n') {
                break;
            }
            offset = prev;
        }
        offset
    }

    /// Offset of the line terminator after `pos`, or the buffer end.
    pub(super) fn line_end(&self, pos: usize) -> usize {
        let mut offset = pos;
        while let Some(next) = self.next_char_offset(offset) {
            if self.contents.byte_at(offset) == Some(b'\n') {
                break;
            }
            offset = next;
        }
        offset
    }

    /// Display width of `[from, to)`, counted from column 0 at `from`.
    fn width_between(&self, from: usize, to: usize) -> usize {
        let mut column = 0;
        let mut offset = from;
        while offset < to {
            let (Some(ch), Some(next)) = (self.char_after(offset), self.next_char_offset(offset))
            else {
                break;
            };
            column += utf8::char_width(ch, column, self.tab_width);
            offset = next;
        }
        column
    }

    /// First offset on the line starting at `line_start` whose display
    /// column reaches `column`, stopping early at the end of the line.
    fn offset_at_column(&self, line_start: usize, column: usize) -> usize {
        let mut width = 0;
        let mut offset = line_start;
        while width < column {
            match self.char_after(offset) {
                None | Some('\n') => break,
                Some(ch) => {
                    let Some(next) = self.next_char_offset(offset) else {
                        break;
                    };
                    width += utf8::char_width(ch, width, self.tab_width);
                    offset = next;
                }
            }
        }
        offset
    }

    fn preferred_column(&self) -> usize {
        self.goal_column
            .unwrap_or_else(|| self.current_column())
    }

    /// Display column of point within its line.
    pub fn current_column(&self) -> usize {
        self.width_between(self.line_start(self.point), self.point)
    }

    /// Moves point to the start of its line.
    pub fn beginning_of_line(&mut self) {
        self.point = self.line_start(self.point);
        self.goal_column = None;
    }

    /// Moves point to just before the line's `\n`, or to the end of the buffer.
    pub fn end_of_line(&mut self) {
        self.point = self.line_end(self.point);
        self.goal_column = None;
    }

    pub fn is_beginning_of_line(&self) -> bool {
        self.point == 0 || self.contents.byte_at(self.point - 1) == Some(b'\n')
    }

    pub fn is_end_of_line(&self) -> bool {
        matches!(self.contents.byte_at(self.point), None | Some(b'\n'))
    }

    /// Moves to the next line, keeping the display column of the first
    /// vertical move in a row.
    pub fn next_line(&mut self) -> EditResult<()> {
        let end = self.line_end(self.point);
        if end >= self.len() {
            return Err(EditError::EndOfBuffer);
        }
        let column = self.preferred_column();
        self.point = self.offset_at_column(end + 1, column);
        self.goal_column = Some(column);
        Ok(())
    }

    /// Moves to the previous line at the preferred display column.
    pub fn previous_line(&mut self) -> EditResult<()> {
        let start = self.line_start(self.point);
        if start == 0 {
            return Err(EditError::BeginningOfBuffer);
        }
        let column = self.preferred_column();
        let previous_start = self.line_start(start - 1);
        self.point = self.offset_at_column(previous_start, column);
        self.goal_column = Some(column);
        Ok(())
    }

    /// 1-based line number of point.
    pub fn current_line(&self) -> usize {
        self.contents
            .read(0, self.point)
            .map(|bytes| bytes.iter().filter(|&&b| b == b'\n').count() + 1)
            .unwrap_or(1)
    }

    /// Moves to the start of line `line` (1-based), or of the last line if
    /// the buffer is shorter.
    pub fn goto_line(&mut self, line: usize) {
        let mut offset = 0;
        for _ in 1..line {
            let end = self.line_end(offset);
            if end >= self.len() {
                break;
            }
            offset = end + 1;
        }
        self.point = offset;
        self.goal_column = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::document_model::{Buffer, EditError, KillRing};

    fn buffer_with(text: &str) -> Buffer {
        Buffer::with_text(KillRing::shared(8), text)
    }

    #[test]
    fn test_beginning_and_end_of_line() {
        let mut buffer = buffer_with("first\nsecond line\nthird");
        buffer.goto_char(9).unwrap();
        buffer.beginning_of_line();
        assert_eq!(buffer.point(), 6);
        assert!(buffer.is_beginning_of_line());
        buffer.end_of_line();
        assert_eq!(buffer.point(), 17);
        assert!(buffer.is_end_of_line());

        buffer.end_of_buffer();
        buffer.beginning_of_line();
        assert_eq!(buffer.point(), 18);
        buffer.end_of_line();
        assert_eq!(buffer.point(), 23);
    }

    #[test]
    fn test_next_and_previous_line_keep_column() {
        let mut buffer = buffer_with("abcdef\nxy\nuvwxyz");
        buffer.goto_char(4).unwrap();

        buffer.next_line().unwrap();
        // "xy" is shorter, so point stops at its end
        assert_eq!(buffer.point(), 9);
        buffer.next_line().unwrap();
        assert_eq!(buffer.point(), 14);
        buffer.previous_line().unwrap();
        buffer.previous_line().unwrap();
        assert_eq!(buffer.point(), 4);
    }

    #[test]
    fn test_next_then_previous_returns() {
        let mut buffer = buffer_with("hello\nworld\n");
        buffer.goto_char(3).unwrap();
        buffer.next_line().unwrap();
        assert_eq!(buffer.point(), 9);
        buffer.previous_line().unwrap();
        assert_eq!(buffer.point(), 3);
    }

    #[test]
    fn test_vertical_movement_uses_display_width() {
        // "中文" is four columns wide but six bytes long
        let mut buffer = buffer_with("中文x\nabcdef");
        buffer.goto_char(6).unwrap();
        assert_eq!(buffer.current_column(), 4);
        buffer.next_line().unwrap();
        assert_eq!(buffer.point(), 8 + 4);

        buffer.goto_char(10).unwrap();
        buffer.previous_line().unwrap();
        assert_eq!(buffer.point(), 3);
    }

    #[test]
    fn test_tab_counts_to_tab_stop() {
        let mut buffer = buffer_with("\tx\n0123456789");
        buffer.goto_char(1).unwrap();
        assert_eq!(buffer.current_column(), buffer.tab_width());
        buffer.next_line().unwrap();
        assert_eq!(buffer.point(), 3 + buffer.tab_width());
    }

    #[test]
    fn test_edit_resets_preferred_column() {
        let mut buffer = buffer_with("abcdef\nxy\nuvwxyz");
        buffer.goto_char(4).unwrap();
        buffer.next_line().unwrap();
        buffer.insert("!").unwrap();
        buffer.next_line().unwrap();
        // column is recomputed from "xy!" rather than reused
        assert_eq!(buffer.point(), 14);
        buffer.forward_char(1).unwrap();
        buffer.previous_line().unwrap();
        assert_eq!(buffer.point(), 10);
    }

    #[test]
    fn test_vertical_movement_at_edges() {
        let mut buffer = buffer_with("one\ntwo");
        buffer.goto_char(1).unwrap();
        assert!(matches!(
            buffer.previous_line(),
            Err(EditError::BeginningOfBuffer)
        ));
        assert_eq!(buffer.point(), 1);

        buffer.next_line().unwrap();
        assert!(matches!(buffer.next_line(), Err(EditError::EndOfBuffer)));
        assert_eq!(buffer.point(), 5);
    }

    #[test]
    fn test_line_numbers() {
        let mut buffer = buffer_with("a\nb\nc");
        assert_eq!(buffer.current_line(), 1);
        buffer.goto_line(3);
        assert_eq!(buffer.point(), 4);
        assert_eq!(buffer.current_line(), 3);
        buffer.goto_line(2);
        assert_eq!(buffer.point(), 2);
        buffer.goto_line(10);
        assert_eq!(buffer.point(), 4);
        buffer.goto_line(0);
        assert_eq!(buffer.point(), 0);
    }
}
