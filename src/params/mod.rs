//! Column alignment of parameter lists.

mod format;
mod parser;

pub use format::format_parameters;
pub use parser::{parse_parameters, ParameterDescriptor, ParseError};

use crate::edit::Edit;
use crate::indent::typed_char;
use crate::position::{Position, Span};
use crate::scan::find_matching_open;
use crate::source::Source;

/// Align the parameter list closed by the `)` just before `pos`.
///
/// Only lists of two or more parameters that parse cleanly are touched; the
/// cursor stays after the `)`.
pub fn align_parameters(src: &Source<'_>, pos: Position) -> Option<Edit> {
    let close = typed_char(src, pos, ')')?;
    let open = find_matching_open(src, close, ')')?;
    let interior_start = src.next(open)?;
    let interior = src.text_between(interior_start, close);

    let params = match parse_parameters(&interior) {
        Ok(params) => params,
        Err(e) => {
            tracing::trace!(error = %e, "not a parameter list");
            return None;
        }
    };
    if params.len() < 2 {
        return None;
    }

    let prefix: String = src
        .line_text(open.line)
        .chars()
        .take(open.column + 1)
        .map(|c| if c == '\t' { c } else { ' ' })
        .collect();
    let formatted = format_parameters(&params, &prefix);
    if formatted == interior {
        return None;
    }

    tracing::debug!(line = open.line, params = params.len(), "aligned parameter list");
    Some(Edit::replace(Span::new(interior_start, close), formatted).with_cursor_offset(1))
}

/// Align a parameter list given as plain text, with no indentation on
/// continuation lines. A single parameter comes back unchanged.
pub fn format_parameter_list(text: &str) -> Result<String, ParseError> {
    let params = parse_parameters(text)?;
    if params.len() < 2 {
        return Ok(text.to_string());
    }
    Ok(format_parameters(&params, ""))
}
