//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.
//!
//! Buffers are written with a `|` marking the cursor.

#![allow(dead_code)]

use cindent::{
    handle, Action, CIndenter, IndentConfig, Indenter, KeyCode, Modifiers, Position, RopeBuffer,
    Source, SyntaxClassifier, TextBuffer, TextBufferMut,
};

pub const CURSOR: char = '|';

/// Buffer and cursor from text containing one `|`
pub fn buffer_with_cursor(marked: &str) -> (RopeBuffer, Position) {
    let offset = marked
        .chars()
        .position(|c| c == CURSOR)
        .expect("text needs a | cursor marker");
    let text: String = marked.chars().filter(|&c| c != CURSOR).collect();
    let buffer = RopeBuffer::from_text(&text);
    let (line, column) = buffer.offset_to_position(offset);
    (buffer, Position::new(line, column))
}

/// Run `f` over a classified view of `marked` and its cursor
pub fn source_at<R>(marked: &str, f: impl FnOnce(&Source<'_>, Position) -> R) -> R {
    let (buffer, cursor) = buffer_with_cursor(marked);
    let classifier = SyntaxClassifier::from_buffer(&buffer);
    f(&Source::new(&buffer, &classifier), cursor)
}

/// Buffer content with `|` inserted at `cursor`
pub fn render(buffer: &RopeBuffer, cursor: Position) -> String {
    let offset = buffer.position_to_offset(cursor.line, cursor.column);
    let mut text = buffer.to_string();
    let byte = text
        .char_indices()
        .nth(offset)
        .map_or(text.len(), |(i, _)| i);
    text.insert(byte, CURSOR);
    text
}

/// Press `key` at the cursor the way a host does: insert the character,
/// then run whatever action the key triggers and apply its edit
pub fn press(
    buffer: &mut RopeBuffer,
    cursor: Position,
    key: KeyCode,
    config: &IndentConfig,
) -> Position {
    let typed = match key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter | KeyCode::NumpadEnter => "\n".to_string(),
        other => panic!("press does not simulate {other}"),
    };
    let offset = buffer.position_to_offset(cursor.line, cursor.column);
    buffer.insert(offset, &typed);
    let (line, column) = buffer.offset_to_position(offset + typed.chars().count());
    let cursor = Position::new(line, column);

    let action = CIndenter.classify_trigger(key, Modifiers::NONE);
    if action == Action::None {
        return cursor;
    }
    match handle(action, &*buffer, cursor, config) {
        Some(edit) => edit.apply(buffer),
        None => cursor,
    }
}

/// Type `keys` into `marked`, `\n` pressing Enter, and render the result
pub fn type_keys(marked: &str, keys: &str, config: &IndentConfig) -> String {
    let (mut buffer, mut cursor) = buffer_with_cursor(marked);
    for c in keys.chars() {
        let key = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
        cursor = press(&mut buffer, cursor, key, config);
    }
    render(&buffer, cursor)
}

/// Run `action` once at the cursor without inserting anything first
pub fn run_action(marked: &str, action: Action, config: &IndentConfig) -> Option<String> {
    let (mut buffer, cursor) = buffer_with_cursor(marked);
    let edit = handle(action, &buffer, cursor, config)?;
    let cursor = edit.apply(&mut buffer);
    Some(render(&buffer, cursor))
}

/// Four-column K&R layout
pub fn knr() -> IndentConfig {
    IndentConfig {
        indent_width: 4,
        condition_indent: 4,
        pre_scope_indent: Some(0),
        ..IndentConfig::default()
    }
}

/// GNU layout (the default)
pub fn gnu() -> IndentConfig {
    IndentConfig::default()
}
