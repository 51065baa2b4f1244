//! Text utilities for TUI rendering.

use std::borrow::Cow;

use postdesk_core::validation::unescape_newlines;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds max_width (unicode-aware).
///
/// Uses unicode width for terminal column calculation, so wide characters
/// (CJK, emoji) count as two columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > max_width {
            break;
        }
        used += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Collapses all whitespace runs (including newlines) into single spaces.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turns the `\n` escape sequences stored by the editor back into line
/// breaks and strips control characters that would corrupt the terminal.
pub fn display_content(content: &str) -> Cow<'_, str> {
    if content.contains("\\n") || content.contains('\x1b') || content.contains('\t') {
        Cow::Owned(
            unescape_newlines(content)
                .replace('\x1b', "")
                .replace('\t', "    "),
        )
    } else {
        Cow::Borrowed(content)
    }
}
