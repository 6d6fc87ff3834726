//! Display-width aware text fitting for fixed-width output.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal columns `text` occupies; wide glyphs count as two.
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Longest prefix of `text` that fits in `columns`.
fn fit(text: &str, columns: usize) -> &str {
    let mut used = 0;
    for (at, ch) in text.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > columns {
            return &text[..at];
        }
    }
    text
}

/// Shorten `text` to `columns`, marking the cut with `…`.
pub fn ellipsize(text: &str, columns: usize) -> String {
    if display_width(text) <= columns {
        return text.to_string();
    }
    match columns {
        0 => String::new(),
        n => format!("{}…", fit(text, n - 1)),
    }
}

/// Fit `text` into exactly `columns`, padding with spaces on the right.
pub fn pad_right(text: &str, columns: usize) -> String {
    let fitted = fit(text, columns);
    let padding = columns - display_width(fitted);
    format!("{fitted}{}", " ".repeat(padding))
}
