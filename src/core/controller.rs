//! Orchestration of research actions over a `ResearchApi`.
//!
//! The controller owns the `ResearchState` and is the only thing that
//! talks to the adapter. Actions take `&self` and may overlap; each
//! refresh and each submission takes a ticket, and a result is dropped if a
//! newer action of the same kind started in the meantime. Actions never
//! return errors: failures land in `state.error`.

use crate::api::{ChatResponse, ResearchApi, SessionId, UserId, validate_query};
use crate::core::state::ResearchState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// State container plus the adapter it drives.
#[derive(Debug)]
pub struct ResearchController<A> {
    api: A,
    state: Mutex<ResearchState>,
    refresh_seq: AtomicU64,
    submit_seq: AtomicU64,
}

impl<A: ResearchApi> ResearchController<A> {
    /// Create a controller without contacting the server.
    #[must_use]
    pub fn new(api: A, user_id: UserId) -> Self {
        Self {
            api,
            state: Mutex::new(ResearchState::new(user_id)),
            refresh_seq: AtomicU64::new(0),
            submit_seq: AtomicU64::new(0),
        }
    }

    /// Create a controller and load the user's history.
    pub async fn connect(api: A, user_id: UserId) -> Self {
        let controller = Self::new(api, user_id);
        controller.refresh_history(None).await;
        controller
    }

    /// The adapter in use.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    fn lock(&self) -> MutexGuard<'_, ResearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ResearchState {
        self.lock().clone()
    }

    /// History partition being shown.
    #[must_use]
    pub fn current_user_id(&self) -> UserId {
        self.lock().current_user_id
    }

    /// Selected session id, if any.
    #[must_use]
    pub fn selected_session_id(&self) -> Option<SessionId> {
        self.lock().selected_session_id.clone()
    }

    /// Current error banner message, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Reload the current user's history.
    ///
    /// `preferred` is selected unconditionally on success.
    pub async fn refresh_history(&self, preferred: Option<SessionId>) {
        let ticket = self.refresh_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let user_id = {
            let mut state = self.lock();
            state.begin_refresh();
            state.current_user_id
        };

        debug!(%user_id, ticket, "refreshing history");
        let result = self.api.fetch_history(user_id).await;

        let mut state = self.lock();
        if self.refresh_seq.load(Ordering::SeqCst) != ticket {
            warn!(%user_id, ticket, "discarding superseded history result");
            return;
        }

        match result {
            Ok(sessions) => {
                debug!(%user_id, count = sessions.len(), "history loaded");
                state.apply_history(sessions, preferred);
            }
            Err(e) => {
                warn!(%user_id, "history fetch failed: {e}");
                state.fail_history(e.to_string());
            }
        }
    }

    /// Submit a query, then reload history with the new session selected.
    ///
    /// Returns `None` when the query is rejected or the submission fails;
    /// the reason is left in the error banner.
    pub async fn submit_query(&self, query: &str) -> Option<ChatResponse> {
        if let Err(e) = validate_query(query) {
            self.lock().reject_input(e.to_string());
            return None;
        }

        let ticket = self.submit_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let user_id = {
            let mut state = self.lock();
            state.begin_submit();
            state.current_user_id
        };

        debug!(%user_id, ticket, "submitting query");
        let result = self.api.submit_chat(user_id, query).await;

        if self.submit_seq.load(Ordering::SeqCst) != ticket {
            warn!(%user_id, ticket, "discarding superseded submission result");
            return result.ok();
        }

        match result {
            Ok(response) => {
                self.refresh_history(Some(response.session_id.clone()))
                    .await;
                if self.submit_seq.load(Ordering::SeqCst) == ticket {
                    self.lock().finish_submit();
                }
                Some(response)
            }
            Err(e) => {
                warn!(%user_id, "submission failed: {e}");
                self.lock().fail_submit(e.to_string());
                None
            }
        }
    }

    /// Select a session (or clear the selection). No network call.
    pub fn select_session(&self, session_id: Option<SessionId>) {
        self.lock().select_session(session_id);
    }

    /// Reset state for a different user without loading anything.
    ///
    /// In-flight results for the previous user are discarded when they
    /// arrive. Returns `false` if `user_id` is already current.
    pub fn switch_user(&self, user_id: UserId) -> bool {
        let mut state = self.lock();
        if !state.switch_user(user_id) {
            return false;
        }
        self.refresh_seq.fetch_add(1, Ordering::SeqCst);
        if state.submitting {
            self.submit_seq.fetch_add(1, Ordering::SeqCst);
            state.submitting = false;
        }
        state.loading = false;
        debug!(%user_id, "switched user");
        true
    }

    /// Switch user and load the new user's history.
    pub async fn update_user_id(&self, user_id: UserId) {
        if self.switch_user(user_id) {
            self.refresh_history(None).await;
        }
    }

    /// Dismiss the error banner.
    pub fn clear_error(&self) {
        self.lock().clear_error();
    }
}
