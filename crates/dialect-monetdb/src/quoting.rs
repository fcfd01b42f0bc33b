/// Renders a string literal with backslashes doubled and single quotes
/// backslash-escaped. `None` renders as the empty literal.
#[must_use]
pub fn quote_value(value: Option<&str>) -> String {
    let value = value.unwrap_or_default();
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('\'');
    quoted
}

/// MonetDB identifiers are lowercase alphanumerics; every run of other
/// characters collapses into a single underscore.
#[must_use]
pub fn prepare_identifier(identifier: &str) -> String {
    let mut prepared = String::with_capacity(identifier.len());
    let mut in_separator_run = false;

    for ch in identifier.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            prepared.push(ch);
            in_separator_run = false;
        } else if !in_separator_run {
            prepared.push('_');
            in_separator_run = true;
        }
    }

    prepared
}

#[must_use]
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", prepare_identifier(identifier))
}

/// Double-quotes a name as the store saw it, without normalization.
/// Embedded double quotes are doubled.
pub(crate) fn escape_name(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub(crate) fn qualified_name(schema: &str, table: &str) -> String {
    format!("{}.{}", escape_name(schema), escape_name(table))
}
