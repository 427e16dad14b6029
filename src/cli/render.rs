//! Plain-text rendering of sessions and threads.

use crate::api::Session;
use crate::core::ResearchState;
use crate::format::{CharacterCount, CountLevel, format_timestamp, sort_messages, truncate_text};
use std::fmt::Write;

/// Characters of the opening query shown per list row.
const QUERY_PREVIEW_LEN: usize = 80;

/// Width of separator rules.
const RULE_WIDTH: usize = 90;

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

/// Render the session list for `user_label`, marking the selection.
#[must_use]
pub fn session_list(state: &ResearchState, user_label: &str) -> String {
    let mut out = String::new();

    if state.sessions.is_empty() {
        let _ = writeln!(out, "No research sessions yet for {user_label}.");
        let _ = writeln!(out, "Start with: scout ask \"<your question>\"");
        return out;
    }

    let _ = writeln!(out, "Research history for {user_label}");
    let _ = writeln!(out, "  {:<10} {:<20} {:>5}  Query", "Session", "Created", "Msgs");
    let _ = writeln!(out, "{}", rule());

    for session in &state.sessions {
        let marker = if state.selected_session_id.as_ref() == Some(&session.session_id) {
            '>'
        } else {
            ' '
        };
        let query = single_line(&session.query);
        let _ = writeln!(
            out,
            "{marker} {:<10} {:<20} {:>5}  {}",
            format!("#{}", session.session_id),
            format_timestamp(&session.created_at),
            session.messages.len(),
            truncate_text(&query, QUERY_PREVIEW_LEN)
        );
    }

    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "{} session(s)", state.sessions.len());
    out
}

/// Render one session's messages in chronological order.
#[must_use]
pub fn thread(session: &Session) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Session #{}: {}", session.session_id, session.query);
    let created = format_timestamp(&session.created_at);
    if !created.is_empty() {
        let _ = writeln!(out, "Started {created}");
    }
    let _ = writeln!(out, "{}", rule());

    if session.messages.is_empty() {
        let _ = writeln!(out, "(no messages yet)");
        return out;
    }

    for message in sort_messages(&session.messages) {
        let stamp = format_timestamp(&message.timestamp);
        if stamp.is_empty() {
            let _ = writeln!(out, "[{}]", message.role.sender_label());
        } else {
            let _ = writeln!(out, "[{}] {stamp}", message.role.sender_label());
        }
        let _ = writeln!(out, "{}", message.content.trim_end());
        let _ = writeln!(out);
    }
    out
}

/// One-line character count feedback for a query.
#[must_use]
pub fn character_count(count: &CharacterCount) -> String {
    let note = match count.level {
        CountLevel::OverLimit => " (too long)",
        CountLevel::Warning => " (close to limit)",
        CountLevel::Empty | CountLevel::Normal => "",
    };
    format!("{}/{} characters{note}", count.count, count.max_length)
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
