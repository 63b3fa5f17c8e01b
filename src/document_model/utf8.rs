//! Byte-level UTF-8 helpers and display width.
//!
//! Stepping over characters never validates: the lead byte alone decides how
//! far forward to move, and stepping back only skips continuation bytes.

use unicode_width::UnicodeWidthChar;

const fn build_lead_byte_table() -> [u8; 256] {
    let mut table = [1u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = match i {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        i += 1;
    }
    table
}

/// Sequence length indexed by lead byte. Stray continuation bytes and
/// invalid leads count as one byte so stepping always makes progress.
static LEAD_BYTE_LEN: [u8; 256] = build_lead_byte_table();

pub fn lead_byte_len(byte: u8) -> usize {
    LEAD_BYTE_LEN[byte as usize] as usize
}

pub fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Columns taken by `ch` when it starts at display column `column`.
pub fn char_width(ch: char, column: usize, tab_width: usize) -> usize {
    match ch {
        '\t' => {
            let tab_width = tab_width.max(1);
            tab_width - column % tab_width
        }
        c => c.width().unwrap_or(1),
    }
}

/// Rendered width of `text` starting at column 0.
pub fn display_width(text: &str, tab_width: usize) -> usize {
    text.chars()
        .fold(0, |column, ch| column + char_width(ch, column, tab_width))
}
