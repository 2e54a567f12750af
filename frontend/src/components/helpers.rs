//! Small formatting helpers shared by the view templates.

use chrono::{DateTime, Utc};

/// Format used by the time inputs of the point form.
pub const FORM_TIME_FORMAT: &str = "%d/%m/%y %H:%M";

/// Escapes special HTML characters so user and catalog text can be embedded
/// in markup, both as element text and inside double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `check-in` -> `Check-in`.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Value of a time input.
///
/// # Arguments
/// * `time` - The instant to show, if the point has one.
///
/// # Returns
/// The time in [`FORM_TIME_FORMAT`], or an empty string when no time is set.
pub fn format_form_time(time: Option<&DateTime<Utc>>) -> String {
    time.map(|time| time.format(FORM_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(capitalize("check-in"), "Check-in");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn formats_form_time() {
        let time = Utc.with_ymd_and_hms(2026, 3, 18, 9, 5, 0).unwrap();
        assert_eq!(format_form_time(Some(&time)), "18/03/26 09:05");
        assert_eq!(format_form_time(None), "");
    }
}
