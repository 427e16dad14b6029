//! Client-side research state and its transitions.
//!
//! `ResearchState` is plain data. Every user action maps onto one or two
//! transition methods here; the controller only decides when to call them.

use crate::api::{Session, SessionId, UserId};
use serde::Serialize;

/// Everything the front end renders from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchState {
    /// History partition being shown.
    pub current_user_id: UserId,

    /// Sessions in server order.
    pub sessions: Vec<Session>,

    /// Session whose thread is shown.
    pub selected_session_id: Option<SessionId>,

    /// A history fetch is in flight.
    pub loading: bool,

    /// A query submission is in flight.
    pub submitting: bool,

    /// Message for the error banner.
    pub error: Option<String>,
}

impl ResearchState {
    /// Fresh state for a user: nothing loaded, nothing selected.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            current_user_id: user_id,
            sessions: Vec::new(),
            selected_session_id: None,
            loading: false,
            submitting: false,
            error: None,
        }
    }

    /// The selected session, if it is in the current list.
    #[must_use]
    pub fn selected_session(&self) -> Option<&Session> {
        let id = self.selected_session_id.as_ref()?;
        self.sessions.iter().find(|s| &s.session_id == id)
    }

    /// True while any request is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.loading || self.submitting
    }

    /// A history fetch started.
    pub fn begin_refresh(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A history fetch succeeded.
    ///
    /// Selection precedence: a preferred id always wins; otherwise the
    /// first session is picked when nothing is selected or the selected
    /// session disappeared.
    pub fn apply_history(&mut self, sessions: Vec<Session>, preferred: Option<SessionId>) {
        self.sessions = sessions;
        self.loading = false;

        if let Some(id) = preferred {
            self.selected_session_id = Some(id);
            return;
        }

        let still_present = self
            .selected_session_id
            .as_ref()
            .is_some_and(|id| self.sessions.iter().any(|s| &s.session_id == id));

        if !still_present {
            self.selected_session_id = self.sessions.first().map(|s| s.session_id.clone());
        }
    }

    /// A history fetch failed. The list and selection are dropped together.
    pub fn fail_history(&mut self, message: String) {
        self.error = Some(message);
        self.sessions.clear();
        self.selected_session_id = None;
        self.loading = false;
    }

    /// A query submission started.
    pub fn begin_submit(&mut self) {
        self.submitting = true;
        self.error = None;
    }

    /// A query submission failed.
    pub fn fail_submit(&mut self, message: String) {
        self.error = Some(message);
        self.submitting = false;
    }

    /// A query submission (and its follow-up refresh) completed.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    /// Input was rejected before any request.
    pub fn reject_input(&mut self, message: String) {
        self.error = Some(message);
    }

    /// The user picked a session (or cleared the selection).
    pub fn select_session(&mut self, session_id: Option<SessionId>) {
        self.selected_session_id = session_id;
        self.error = None;
    }

    /// Switch history partition.
    ///
    /// Returns `false` and changes nothing when `user_id` is already current.
    pub fn switch_user(&mut self, user_id: UserId) -> bool {
        if user_id == self.current_user_id {
            return false;
        }
        self.current_user_id = user_id;
        self.sessions.clear();
        self.selected_session_id = None;
        self.error = None;
        true
    }

    /// Dismiss the error banner.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
