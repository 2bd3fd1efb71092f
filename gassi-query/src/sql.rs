//! SQL text utilities shared by the dialects.

/// Wrap an identifier in the given quote character, doubling any embedded
/// occurrences of it.
pub fn escape_identifier(name: &str, quote: char) -> String {
    let mut doubled = String::with_capacity(2);
    doubled.push(quote);
    doubled.push(quote);
    let escaped = name.replace(quote, &doubled);
    format!("{quote}{escaped}{quote}")
}

/// Build a comma separated list of placeholders for `count` parameters.
///
/// `placeholder` receives the 1-indexed position.
pub fn placeholder_list(count: usize, placeholder: impl Fn(usize) -> String) -> String {
    (1..=count).map(placeholder).collect::<Vec<_>>().join(", ")
}
