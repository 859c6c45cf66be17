//! Backward scanners over code.
//!
//! All scans walk toward the buffer start and only look at characters the
//! classifier reports as code. A scan that reaches the buffer start without
//! finding its target returns `None`; callers treat that as "this heuristic
//! does not apply".

mod bracket;
mod code;
mod keyword;

pub use bracket::{find_matching_open, find_unclosed_paren, opening_bracket};
pub use code::CodeCharsBackward;
pub use keyword::{
    find_condition_keyword, find_keyword_backward, is_word_char, CONDITION_KEYWORDS,
};
