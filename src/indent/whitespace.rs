//! Indentation strings and tab-aware column arithmetic.

use crate::config::IndentConfig;

/// Convert a character column to visual column (screen position).
/// Accounts for tab expansion when converting character index to screen position.
pub fn visual_column(text: &str, char_col: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut visual_col = 0;

    for (i, ch) in text.chars().enumerate() {
        if i >= char_col {
            return visual_col;
        }

        if ch == '\t' {
            visual_col += tab_width - (visual_col % tab_width);
        } else {
            visual_col += 1;
        }
    }

    // Columns past the end of the text count as plain spaces
    visual_col + char_col.saturating_sub(text.chars().count())
}

/// Build the leading whitespace for a line indented to `target_column`.
///
/// The reference line is walked from its start: every tab stands for
/// `tab_width` columns, every other character for one, until the target is
/// reached; a short reference is padded with spaces. With `use_tabs` the
/// result is re-packed into as many tabs as fit plus trailing spaces.
pub fn build_indent(config: &IndentConfig, target_column: usize, reference_line: &str) -> String {
    if target_column == 0 {
        return String::new();
    }

    let tab_width = config.effective_tab_width();
    let mut indent = String::with_capacity(target_column);
    for ch in reference_line.chars() {
        if indent.len() >= target_column {
            break;
        }
        let width = if ch == '\t' { tab_width } else { 1 };
        indent.extend(std::iter::repeat(' ').take(width));
    }
    // A tab that overshoots the target is truncated, a short line is padded
    indent.truncate(target_column);
    while indent.len() < target_column {
        indent.push(' ');
    }

    if config.use_tabs {
        pack_tabs(indent.len(), tab_width)
    } else {
        indent
    }
}

fn pack_tabs(width: usize, tab_width: usize) -> String {
    let mut packed = "\t".repeat(width / tab_width);
    packed.push_str(&" ".repeat(width % tab_width));
    packed
}

/// Clamp a signed column computed from offsets to a buildable target
pub(crate) fn clamp_column(column: isize) -> usize {
    usize::try_from(column).unwrap_or(0)
}
