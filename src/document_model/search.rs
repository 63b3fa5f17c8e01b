use super::buffer::Buffer;
use super::error::{EditError, EditResult};
use regex::bytes::Regex;

impl Buffer {
    /// Moves point to the end of the first match at or after point.
    pub fn re_search_forward(&mut self, pattern: &str) -> EditResult<usize> {
        let regex = Regex::new(pattern)?;
        let found = {
            let haystack = self.contents.read(0, self.len())?;
            regex.find_at(&haystack, self.point).map(|m| m.end())
        };
        let end = found.ok_or_else(|| EditError::SearchFailed(pattern.to_string()))?;
        self.point = end;
        self.goal_column = None;
        Ok(end)
    }

    /// Moves point to the start of the last match that begins before point
    /// and ends at or before it. Anchors and word boundaries see the whole
    /// buffer, not just the text before point.
    pub fn re_search_backward(&mut self, pattern: &str) -> EditResult<usize> {
        let regex = Regex::new(pattern)?;
        let found = {
            let haystack = self.contents.read(0, self.len())?;
            let mut found = None;
            let mut offset = self.point;
            while let Some(start) = self.prev_char_offset(offset) {
                if regex
                    .find_at(&haystack, start)
                    .is_some_and(|m| m.start() == start && m.end() <= self.point)
                {
                    found = Some(start);
                    break;
                }
                offset = start;
            }
            found
        };
        let start = found.ok_or_else(|| EditError::SearchFailed(pattern.to_string()))?;
        self.point = start;
        self.goal_column = None;
        Ok(start)
    }

    /// Whether `pattern` matches starting exactly at point.
    pub fn looking_at(&self, pattern: &str) -> EditResult<bool> {
        let regex = Regex::new(pattern)?;
        let haystack = self.contents.read(0, self.len())?;
        Ok(regex
            .find_at(&haystack, self.point)
            .is_some_and(|m| m.start() == self.point))
    }
}
