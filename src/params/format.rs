use super::parser::ParameterDescriptor;

/// Lay out parameters one per line with types, stars and names in columns.
///
/// Lines after the first start with `indent_prefix`. Formatting the output
/// again yields the same text.
pub fn format_parameters(params: &[ParameterDescriptor], indent_prefix: &str) -> String {
    let type_width = params
        .iter()
        .filter(|p| !p.is_ellipsis)
        .map(|p| p.type_text.chars().count())
        .max()
        .unwrap_or(0);
    let star_width = params.iter().map(|p| p.pointer_depth).max().unwrap_or(0);

    let separator = format!(",\n{indent_prefix}");
    params
        .iter()
        .map(|p| format_parameter(p, type_width, star_width))
        .collect::<Vec<_>>()
        .join(&separator)
}

fn format_parameter(param: &ParameterDescriptor, type_width: usize, star_width: usize) -> String {
    if param.is_ellipsis {
        return "...".to_string();
    }
    format!(
        "{:<type_width$} {:>star_width$}{}",
        param.type_text,
        "*".repeat(param.pointer_depth),
        param.name,
    )
}
