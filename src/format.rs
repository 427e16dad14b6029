//! Display helpers: timestamps, truncation, character counts, input checks.

use crate::api::Message;
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::borrow::Cow;

/// Output format for timestamps.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Naive layouts the service is known to send, interpreted as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Share of the limit above which a count is flagged.
const WARNING_PERCENT: f64 = 80.0;

/// Parse a server timestamp.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Format a server timestamp as `YYYY-MM-DD HH:MM:SS`.
///
/// Empty input gives an empty string; unparseable input is returned as is.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |dt| dt.format(DISPLAY_FORMAT).to_string(),
    )
}

/// Milliseconds since the epoch; 0 when missing or unparseable.
#[must_use]
pub fn timestamp_millis(raw: &str) -> i64 {
    parse_timestamp(raw).map_or(0, |dt| dt.timestamp_millis())
}

/// Messages in ascending timestamp order.
///
/// Stable: equal timestamps keep server order, and messages without a
/// usable timestamp sort as the epoch.
#[must_use]
pub fn sort_messages(messages: &[Message]) -> Vec<&Message> {
    let mut sorted: Vec<&Message> = messages.iter().collect();
    sorted.sort_by_key(|m| timestamp_millis(&m.timestamp));
    sorted
}

/// Cut text to `max_chars` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => Cow::Owned(format!("{}...", &text[..idx])),
        None => Cow::Borrowed(text),
    }
}

/// How close a text is to its length limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountLevel {
    /// Nothing typed.
    Empty,
    /// Comfortably within the limit.
    Normal,
    /// Above 80% of the limit.
    Warning,
    /// Past the limit.
    OverLimit,
}

/// Character count feedback for an input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterCount {
    /// Characters typed.
    pub count: usize,
    /// Limit the count is measured against.
    pub max_length: usize,
    /// `count` as a percentage of `max_length`.
    pub percentage: f64,
    /// Display level.
    pub level: CountLevel,
    /// True when `count > max_length`.
    pub is_over_limit: bool,
}

/// Count characters in `text` against `max_length`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn character_count(text: &str, max_length: usize) -> CharacterCount {
    let count = text.chars().count();
    let percentage = if max_length == 0 {
        if count == 0 { 0.0 } else { f64::INFINITY }
    } else {
        count as f64 / max_length as f64 * 100.0
    };

    let level = if count > max_length {
        CountLevel::OverLimit
    } else if percentage > WARNING_PERCENT {
        CountLevel::Warning
    } else if count > 0 {
        CountLevel::Normal
    } else {
        CountLevel::Empty
    };

    CharacterCount {
        count,
        max_length,
        percentage,
        level,
        is_over_limit: count > max_length,
    }
}

/// Constraints for a free-text input.
#[derive(Debug, Clone, Default)]
pub struct InputRules {
    /// Reject blank input.
    pub required: bool,
    /// Minimum characters, checked only when input is non-empty.
    pub min_length: usize,
    /// Maximum characters.
    pub max_length: Option<usize>,
    /// Pattern non-empty input must match.
    pub pattern: Option<Regex>,
}

/// Outcome of `validate_input`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// One message per failed rule.
    pub errors: Vec<String>,
}

impl Validation {
    /// True when no rule failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check `input` against `rules`, collecting every failure.
#[must_use]
pub fn validate_input(input: &str, rules: &InputRules) -> Validation {
    let mut errors = Vec::new();
    let len = input.chars().count();

    if rules.required && input.trim().is_empty() {
        errors.push("This field is required".to_string());
    }

    if !input.is_empty() {
        if len < rules.min_length {
            errors.push(format!(
                "Minimum length is {} characters",
                rules.min_length
            ));
        }

        if let Some(max) = rules.max_length {
            if len > max {
                errors.push(format!("Maximum length is {max} characters"));
            }
        }

        if let Some(pattern) = &rules.pattern {
            if !pattern.is_match(input) {
                errors.push("Invalid format".to_string());
            }
        }
    }

    Validation { errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;

    fn message(content: &str, timestamp: &str) -> Message {
        Message {
            role: Role::Assistant,
            content: content.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn format_timestamp_server_layout() {
        assert_eq!(
            format_timestamp("2025-03-01 09:15:00"),
            "2025-03-01 09:15:00"
        );
    }

    #[test]
    fn format_timestamp_rfc3339() {
        assert_eq!(
            format_timestamp("2025-03-01T09:15:00Z"),
            "2025-03-01 09:15:00"
        );
        assert_eq!(
            format_timestamp("2025-03-01T10:15:00+01:00"),
            "2025-03-01 09:15:00"
        );
    }

    #[test]
    fn format_timestamp_fractional_seconds() {
        assert_eq!(
            format_timestamp("2025-03-01T09:15:00.123456"),
            "2025-03-01 09:15:00"
        );
    }

    #[test]
    fn format_timestamp_empty_and_garbage() {
        assert_eq!(format_timestamp(""), "");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn missing_timestamp_is_epoch() {
        assert_eq!(timestamp_millis(""), 0);
        assert_eq!(timestamp_millis("not a date"), 0);
        assert_eq!(timestamp_millis("1970-01-01 00:00:01"), 1000);
    }

    #[test]
    fn sort_messages_puts_missing_first() {
        let messages = vec![
            message("t2", "2025-01-01 10:00:02"),
            message("t1", "2025-01-01 10:00:01"),
            message("missing", ""),
        ];

        let order: Vec<&str> = sort_messages(&messages)
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(order, vec!["missing", "t1", "t2"]);
    }

    #[test]
    fn sort_messages_is_stable() {
        let messages = vec![
            message("a", "2025-01-01 10:00:00"),
            message("b", ""),
            message("c", "2025-01-01 10:00:00"),
            message("d", ""),
        ];

        let order: Vec<&str> = sort_messages(&messages)
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn truncate_short_text_unchanged() {
        assert!(matches!(truncate_text("short", 50), Cow::Borrowed("short")));
        assert_eq!(truncate_text("exactly5", 8), "exactly5");
    }

    #[test]
    fn truncate_long_text() {
        let text = "x".repeat(100);
        let out = truncate_text(&text, 80);
        assert_eq!(out.chars().count(), 83);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_text("ñandú", 2), "ña...");
    }

    #[test]
    fn character_count_levels() {
        assert_eq!(character_count("", 1000).level, CountLevel::Empty);
        assert_eq!(character_count("abc", 1000).level, CountLevel::Normal);
        assert_eq!(
            character_count(&"a".repeat(801), 1000).level,
            CountLevel::Warning
        );
        assert_eq!(
            character_count(&"a".repeat(800), 1000).level,
            CountLevel::Normal
        );

        let over = character_count(&"a".repeat(1001), 1000);
        assert_eq!(over.level, CountLevel::OverLimit);
        assert!(over.is_over_limit);
        assert_eq!(over.count, 1001);
    }

    #[test]
    fn validate_required() {
        let rules = InputRules {
            required: true,
            ..Default::default()
        };
        assert_eq!(
            validate_input("   ", &rules).errors,
            vec!["This field is required".to_string()]
        );
        assert!(validate_input("ok", &rules).is_valid());
    }

    #[test]
    fn validate_lengths_and_pattern() {
        let rules = InputRules {
            required: false,
            min_length: 3,
            max_length: Some(5),
            pattern: Some(Regex::new(r"^[a-z]+$").unwrap()),
        };

        let short = validate_input("A", &rules);
        assert_eq!(
            short.errors,
            vec![
                "Minimum length is 3 characters".to_string(),
                "Invalid format".to_string()
            ]
        );

        let long = validate_input("abcdef", &rules);
        assert_eq!(long.errors, vec!["Maximum length is 5 characters".to_string()]);

        // Optional and empty passes every rule
        assert!(validate_input("", &rules).is_valid());
    }
}
