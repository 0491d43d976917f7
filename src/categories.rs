use std::path::Path;

use serde::Serialize;

/// Suggested categories. Storage does not enforce membership.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Education",
    "Business",
    "Other",
];

#[derive(Serialize)]
struct CategoryList<'a> {
    categories: &'a [&'a str],
}

#[derive(Serialize)]
struct CategoryError {
    error: String,
}

pub fn default_categories_json() -> String {
    serde_json::to_string_pretty(&CategoryList {
        categories: DEFAULT_CATEGORIES,
    })
    .unwrap_or_else(|e| error_json(e.to_string()))
}

/// The category document served to callers: the override file verbatim when it
/// exists, the built-in list otherwise. Read failures come back as `{"error": ...}`.
pub fn categories_json(path: Option<&Path>) -> String {
    match path {
        Some(p) if p.exists() => std::fs::read_to_string(p).unwrap_or_else(|e| {
            tracing::warn!(path = %p.display(), error = %e, "could not read categories file");
            error_json(e.to_string())
        }),
        _ => default_categories_json(),
    }
}

fn error_json(message: String) -> String {
    serde_json::to_string(&CategoryError { error: message })
        .unwrap_or_else(|_| r#"{"error":"unserializable error"}"#.to_string())
}
