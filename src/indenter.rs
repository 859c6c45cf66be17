//! The capability a host editor talks to.

use crate::buffer::TextBuffer;
use crate::config::IndentConfig;
use crate::edit::Edit;
use crate::indent;
use crate::params;
use crate::position::Position;
use crate::source::Source;
use crate::syntax::SyntaxClassifier;
use crate::trigger::{self, Action, KeyCode, Modifiers};

/// A language-specific re-indenter.
///
/// The host asks [`Indenter::classify_trigger`] about every keystroke and,
/// for anything but [`Action::None`], lets the keystroke insert its
/// character and then calls [`Indenter::handle`] with the cursor after it.
pub trait Indenter {
    fn classify_trigger(&self, key: KeyCode, modifiers: Modifiers) -> Action;

    /// Compute the edit for `action`, or `None` when nothing needs to change
    fn handle(
        &self,
        action: Action,
        source: &Source<'_>,
        position: Position,
        config: &IndentConfig,
    ) -> Option<Edit>;
}

/// Indenter for C and the languages that share its braces and comments
#[derive(Debug, Clone, Copy, Default)]
pub struct CIndenter;

impl Indenter for CIndenter {
    fn classify_trigger(&self, key: KeyCode, modifiers: Modifiers) -> Action {
        let action = trigger::classify_trigger(key, modifiers);
        tracing::trace!(%key, ?action, "classified keystroke");
        action
    }

    fn handle(
        &self,
        action: Action,
        source: &Source<'_>,
        position: Position,
        config: &IndentConfig,
    ) -> Option<Edit> {
        let edit = match action {
            Action::IndentLine => indent::indent_line(source, position, config),
            Action::UnindentOpeningBrace => {
                indent::unindent_opening_brace(source, position, config)
            }
            Action::UnindentClosingBrace => {
                indent::unindent_closing_brace(source, position, config)
            }
            Action::UnindentCaseOrLabel => {
                indent::unindent_case_or_label(source, position, config)
            }
            Action::UnindentHash => indent::unindent_hash(source, position, config),
            Action::AlignParameters => params::align_parameters(source, position),
            Action::CloseComment => indent::close_comment(source, position),
            Action::None => None,
        };
        tracing::debug!(?action, ?position, changed = edit.is_some(), "handled trigger");
        edit
    }
}

/// Run `action` on `buffer` with [`CIndenter`] and a [`SyntaxClassifier`]
/// built from the buffer
pub fn handle(
    action: Action,
    buffer: &dyn TextBuffer,
    position: Position,
    config: &IndentConfig,
) -> Option<Edit> {
    let classifier = SyntaxClassifier::from_buffer(buffer);
    CIndenter.handle(action, &Source::new(buffer, &classifier), position, config)
}
