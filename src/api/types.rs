//! Wire types exchanged with the research service.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Numeric user identifier selecting a history partition.
///
/// Always positive; there is no authentication behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct UserId(u64);

impl UserId {
    /// The first user, present in every fresh directory.
    pub const FIRST: Self = Self(1);

    /// Create a user id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for zero.
    pub fn new(id: u64) -> Result<Self> {
        if id == 0 {
            return Err(Error::Validation(
                "User ID must be a positive integer.".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// The raw numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for UserId {
    type Error = Error;

    fn try_from(id: u64) -> Result<Self> {
        Self::new(id)
    }
}

impl From<UserId> for u64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl FromStr for UserId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let id = s
            .trim()
            .parse::<u64>()
            .map_err(|_| Error::Validation(format!("Invalid user ID: {s}")))?;
        Self::new(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Server-assigned session identifier. Opaque: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionId {
    /// Numeric id (what the reference backend assigns).
    Number(i64),
    /// Any other identifier.
    Text(String),
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl FromStr for SessionId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('#');
        Ok(s.parse::<i64>()
            .map_or_else(|_| Self::Text(s.to_string()), Self::Number))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => fmt::Display::fmt(n, f),
            Self::Text(s) => f.pad(s),
        }
    }
}

/// Author of a message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// The person asking.
    User,
    /// The research service's answer.
    #[default]
    Assistant,
    /// Service notices.
    System,
    /// Any other backend role (e.g. `critic`); rendered like an assistant.
    Other(String),
}

impl Role {
    /// Label shown next to a message.
    #[must_use]
    pub fn sender_label(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::System => "System",
            Self::Assistant | Self::Other(_) => "AI Assistant",
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.to_lowercase().as_str() {
            "user" => Self::User,
            "assistant" | "" => Self::Assistant,
            "system" => Self::System,
            _ => Self::Other(role),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::User => "user".to_string(),
            Role::Assistant => "assistant".to_string(),
            Role::System => "system".to_string(),
            Role::Other(other) => other,
        }
    }
}

/// One turn in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote it.
    #[serde(default)]
    pub role: Role,

    /// Message text.
    #[serde(default)]
    pub content: String,

    /// Creation time as sent by the server; may be empty.
    #[serde(default)]
    pub timestamp: String,
}

/// A research topic thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Server-assigned identifier.
    pub session_id: SessionId,

    /// The question that opened the session.
    #[serde(default)]
    pub query: String,

    /// Messages in server order.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Creation time as sent by the server.
    #[serde(default)]
    pub created_at: String,
}

/// Response to a chat submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Session holding the new exchange.
    pub session_id: SessionId,

    /// Summary text, when the service includes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Other server-defined fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub user_id: UserId,
    pub query: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_id_rejects_zero() {
        assert!(UserId::new(0).is_err());
        assert_eq!(UserId::new(5).unwrap().get(), 5);
        assert!("0".parse::<UserId>().is_err());
        assert!("abc".parse::<UserId>().is_err());
        assert_eq!(" 12 ".parse::<UserId>().unwrap().get(), 12);
    }

    #[test]
    fn session_id_accepts_numbers_and_strings() {
        let numeric: SessionId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(numeric, SessionId::Number(42));

        let text: SessionId = serde_json::from_value(json!("abc-1")).unwrap();
        assert_eq!(text, SessionId::Text("abc-1".to_string()));
        assert_eq!(text.to_string(), "abc-1");
    }

    #[test]
    fn session_id_parses_cli_input() {
        assert_eq!("#42".parse::<SessionId>().unwrap(), SessionId::Number(42));
        assert_eq!(
            "topic-a".parse::<SessionId>().unwrap(),
            SessionId::Text("topic-a".to_string())
        );
    }

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!(Role::from("USER".to_string()), Role::User);
        assert_eq!(Role::from("System".to_string()), Role::System);
        assert_eq!(
            Role::from("critic".to_string()),
            Role::Other("critic".to_string())
        );
        assert_eq!(Role::Other("critic".to_string()).sender_label(), "AI Assistant");
    }

    #[test]
    fn session_decodes_history_entry() {
        let session: Session = serde_json::from_value(json!({
            "session_id": 3,
            "query": "rust async runtimes",
            "created_at": "2025-01-02 10:00:00",
            "messages": [
                {"role": "user", "content": "rust async runtimes", "timestamp": "2025-01-02 10:00:00"},
                {"role": "assistant", "content": "Tokio is...", "timestamp": "2025-01-02 10:00:05"}
            ]
        }))
        .unwrap();

        assert_eq!(session.session_id, SessionId::Number(3));
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].role, Role::User);
    }

    #[test]
    fn session_tolerates_missing_fields() {
        let session: Session = serde_json::from_value(json!({"session_id": "s1"})).unwrap();
        assert!(session.query.is_empty());
        assert!(session.messages.is_empty());
        assert!(session.created_at.is_empty());
    }

    #[test]
    fn chat_response_keeps_extra_fields() {
        let response: ChatResponse = serde_json::from_value(json!({
            "session_id": 42,
            "result": "summary text",
            "sources": 3
        }))
        .unwrap();

        assert_eq!(response.session_id, SessionId::Number(42));
        assert_eq!(response.result.as_deref(), Some("summary text"));
        assert_eq!(response.extra.get("sources"), Some(&json!(3)));
    }

    #[test]
    fn chat_request_body_shape() {
        let body = ChatRequest {
            user_id: UserId::new(1).unwrap(),
            query: "quantum computing trends",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"user_id": 1, "query": "quantum computing trends"})
        );
    }
}
