use std::fmt::Display;

/// Formats one `key: value` porcelain line.
pub(crate) fn porcelain_field(key: &str, value: impl Display) -> String {
    format!("{key}: {value}")
}

/// Formats an optional value, printing `none` when absent.
pub(crate) fn porcelain_optional(key: &str, value: Option<impl Display>) -> String {
    match value {
        Some(v) => porcelain_field(key, v),
        None => porcelain_field(key, "none"),
    }
}
