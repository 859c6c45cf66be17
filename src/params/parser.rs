//! Parsing of C parameter lists such as `int a, char **argv, ...`.

use std::fmt;

/// One parameter of a declaration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterDescriptor {
    /// Type without trailing `*`s, whitespace runs collapsed to one space
    pub type_text: String,
    /// Name, array suffix included (`buf[16]`)
    pub name: String,
    pub pointer_depth: usize,
    pub is_ellipsis: bool,
}

impl ParameterDescriptor {
    pub fn new(
        type_text: impl Into<String>,
        name: impl Into<String>,
        pointer_depth: usize,
    ) -> Self {
        Self {
            type_text: type_text.into(),
            name: name.into(),
            pointer_depth,
            is_ellipsis: false,
        }
    }

    /// The variadic `...` marker
    pub fn ellipsis() -> Self {
        Self {
            is_ellipsis: true,
            ..Self::default()
        }
    }
}

/// Why a list is not a parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    InvalidCharacter(char),
    MissingName,
    MissingType,
    InvalidName(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty parameter list"),
            ParseError::InvalidCharacter(c) => write!(f, "invalid character {c:?} in parameter"),
            ParseError::MissingName => write!(f, "parameter has no name"),
            ParseError::MissingType => write!(f, "parameter has no type"),
            ParseError::InvalidName(name) => write!(f, "invalid parameter name {name:?}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse the text between a declaration's parentheses.
///
/// The list is split on every `,`, so a type that itself contains a comma
/// (a function pointer's parameters) is mis-split and fails. Any failing
/// parameter fails the whole list.
pub fn parse_parameters(text: &str) -> Result<Vec<ParameterDescriptor>, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    text.split(',').map(parse_parameter).collect()
}

fn parse_parameter(segment: &str) -> Result<ParameterDescriptor, ParseError> {
    let segment = segment.trim();
    if segment == "..." {
        return Ok(ParameterDescriptor::ellipsis());
    }
    if let Some(bad) = segment.chars().find(|&c| !is_parameter_char(c)) {
        return Err(ParseError::InvalidCharacter(bad));
    }

    let name_start = segment
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_name_char(c))
        .last()
        .map(|(i, _)| i)
        .ok_or(ParseError::MissingName)?;
    let (head, name) = segment.split_at(name_start);

    let pointer_depth = head
        .chars()
        .rev()
        .take_while(|&c| c == '*' || c.is_whitespace())
        .filter(|&c| c == '*')
        .count();
    let type_text = head
        .trim_end_matches(|c: char| c == '*' || c.is_whitespace())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if type_text.is_empty() {
        return Err(ParseError::MissingType);
    }
    if !is_valid_name(name) {
        return Err(ParseError::InvalidName(name.to_string()));
    }

    Ok(ParameterDescriptor::new(type_text, name, pointer_depth))
}

fn is_parameter_char(c: char) -> bool {
    is_name_char(c) || c == '*' || c.is_whitespace()
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '[' || c == ']'
}

fn is_valid_name(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && name.matches('[').count() == name.matches(']').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_list() {
        let params = parse_parameters("int a, char *b").unwrap();
        assert_eq!(
            params,
            vec![
                ParameterDescriptor::new("int", "a", 0),
                ParameterDescriptor::new("char", "b", 1),
            ]
        );
    }

    #[test]
    fn test_pointer_stars_with_whitespace() {
        let params = parse_parameters("const char * * argv").unwrap();
        assert_eq!(params[0], ParameterDescriptor::new("const char", "argv", 2));
    }

    #[test]
    fn test_multiline_type_is_collapsed() {
        let params = parse_parameters("unsigned\n    long  n").unwrap();
        assert_eq!(params[0].type_text, "unsigned long");
    }

    #[test]
    fn test_array_name_and_ellipsis() {
        let params = parse_parameters("char buf[16], ...").unwrap();
        assert_eq!(params[0].name, "buf[16]");
        assert!(params[1].is_ellipsis);
        assert!(params[1].type_text.is_empty());
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_parameters("  "), Err(ParseError::Empty));
        assert_eq!(parse_parameters("x + 1, y"), Err(ParseError::InvalidCharacter('+')));
        assert_eq!(parse_parameters("a"), Err(ParseError::MissingType));
        assert_eq!(parse_parameters("int a,"), Err(ParseError::MissingName));
        assert_eq!(parse_parameters("char *"), Err(ParseError::MissingName));
        assert_eq!(parse_parameters("int 2x"), Err(ParseError::InvalidName("2x".into())));
    }

    #[test]
    fn test_function_pointer_is_mis_split() {
        assert!(parse_parameters("int (*cb)(int, int)").is_err());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ParseError::Empty.to_string(), "empty parameter list");
        assert_eq!(
            ParseError::InvalidCharacter('(').to_string(),
            "invalid character '(' in parameter"
        );
    }
}
