//! Client side of the research service REST surface.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{HttpClient, MAX_QUERY_CHARS, ResearchApi, validate_query};
pub use types::{ChatResponse, Message, Role, Session, SessionId, UserId};
