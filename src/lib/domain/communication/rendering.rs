//! Shared helpers for rendering notification emails

use askama::Template;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// An email body could not be rendered
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template failed to render
    #[error(transparent)]
    Template(#[from] askama::Error),
}

/// Renders an HTML email template.
///
/// Email templates carry their styles in `style` attributes, so the output is
/// sent as rendered and keeps askama's escaping of every interpolated value.
pub fn render_html<T: Template>(template: &T) -> Result<String, RenderError> {
    Ok(template.render()?)
}

/// Human-readable timestamp used in email bodies, e.g. `Mon, Oct 19, 2026, 04:05 PM UTC`
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%a, %b %-d, %Y, %I:%M %p UTC").to_string()
}

/// Splits user text into lines so templates can join them with `<br>`
/// while still escaping each line.
pub fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Keeps only values with visible content.
pub fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 16, 5, 0).unwrap();

        assert_eq!(format_timestamp(&at), "Mon, Oct 19, 2026, 04:05 PM UTC");
    }

    #[test]
    fn test_lines_handles_windows_line_endings() {
        assert_eq!(lines("one\r\ntwo\nthree"), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_present_drops_blank_values() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some("")), None);
        assert_eq!(present(Some("   ")), None);
        assert_eq!(present(Some(" Acme ")), Some("Acme".to_string()));
    }
}
