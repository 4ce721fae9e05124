//! EPP domain status codes embedded in `Domain Status` values.
//!
//! Registries write statuses as a reference URL carrying the code as its
//! fragment, optionally followed by more text:
//! ```text
//! Domain Status: clientTransferProhibited https://icann.org/epp#clientTransferProhibited
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use super::record::FieldValue;

/// Reference page the rendered status links point to.
pub const STATUS_REFERENCE_URL: &str = "http://www.icann.org/epp";

/// Letters right after the first `#`.
static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^#]*#([A-Za-z]+)").expect("Invalid status code regex"));

/// Extracts the status code from a raw status value.
pub fn extract_code(value: &str) -> Option<&str> {
    CODE_PATTERN
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Renders a code as a markdown-style link to the reference page.
pub fn status_link(code: &str) -> String {
    format!("[{code}]({STATUS_REFERENCE_URL}#{code})")
}

/// Renders one raw status value. Values without a code are shown as written.
pub fn render_status(value: &str) -> String {
    match extract_code(value) {
        Some(code) => status_link(code),
        None => value.trim().to_string(),
    }
}

/// Renders every status value, one per line.
pub fn render_statuses(statuses: &FieldValue) -> String {
    match statuses {
        FieldValue::Single(value) => render_status(value),
        FieldValue::Multiple(values) => values
            .iter()
            .map(|value| render_status(value))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string(),
    }
}
