//! Keystrokes that trigger re-indentation.

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// A modifier that turns a key into a shortcut rather than text input
    #[inline]
    pub const fn is_accelerator(self) -> bool {
        self.ctrl() || self.alt() || self.meta()
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

/// The key that was pressed.
///
/// `Char` carries the character the key produced (so `{` arrives as
/// `Char('{')` with Shift held on most layouts).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    NumpadEnter,
    Tab,
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::NumpadEnter => write!(f, "NumEnter"),
            KeyCode::Tab => write!(f, "Tab"),
        }
    }
}

/// What the indenter does in response to a keystroke
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Indent the line just created by Enter
    IndentLine,
    UnindentOpeningBrace,
    UnindentClosingBrace,
    UnindentCaseOrLabel,
    UnindentHash,
    /// Column-align the parameter list just closed by `)`
    AlignParameters,
    /// Turn `* /` into `*/`
    CloseComment,
    /// Let the host insert the character as typed
    None,
}

/// Map a keystroke to the action it triggers
pub fn classify_trigger(key: KeyCode, modifiers: Modifiers) -> Action {
    if modifiers.is_accelerator() {
        return Action::None;
    }

    match key {
        KeyCode::Enter | KeyCode::NumpadEnter if !modifiers.shift() => Action::IndentLine,
        KeyCode::Char('{') => Action::UnindentOpeningBrace,
        KeyCode::Char('}') => Action::UnindentClosingBrace,
        KeyCode::Char(':') => Action::UnindentCaseOrLabel,
        KeyCode::Char('#') => Action::UnindentHash,
        KeyCode::Char(')') => Action::AlignParameters,
        KeyCode::Char('/') => Action::CloseComment,
        _ => Action::None,
    }
}
