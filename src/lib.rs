//! cindent - structural re-indentation for C-family source
//!
//! A host editor classifies each keystroke with [`Indenter::classify_trigger`],
//! lets the keystroke insert its character, then asks [`Indenter::handle`] for
//! the [`Edit`] that re-indents the current line. The engine keeps no state
//! between calls: the buffer, cursor and [`IndentConfig`] are passed in every
//! time.

pub mod buffer;
pub mod config;
pub mod config_paths;
pub mod context;
pub mod edit;
pub mod indent;
pub mod indenter;
pub mod params;
pub mod position;
pub mod scan;
pub mod source;
pub mod syntax;
pub mod tracing;
pub mod trigger;

// Re-export commonly used types
pub use buffer::{RopeBuffer, TextBuffer, TextBufferMut};
pub use config::{DirectiveIndent, IndentConfig};
pub use context::{ContextClass, ContextClassifier, LexicalClassifier};
pub use edit::Edit;
pub use indenter::{handle, CIndenter, Indenter};
pub use params::{format_parameter_list, ParameterDescriptor, ParseError};
pub use position::{Position, Span};
pub use source::Source;
pub use syntax::SyntaxClassifier;
pub use trigger::{classify_trigger, Action, KeyCode, Modifiers};
