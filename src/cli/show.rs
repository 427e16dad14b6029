//! `scout show` command implementation.

use crate::api::{SessionId, UserId};
use crate::cli::{check_banner, controller, render};
use crate::config::Config;
use crate::error::{Error, Result};

/// Run the show command.
///
/// Prints one session's thread: the given one, or the most recent.
///
/// # Errors
///
/// Returns an error if the history cannot be loaded or the session is not
/// part of it.
pub async fn run(config: &Config, user: Option<UserId>, session_id: Option<SessionId>) -> Result<()> {
    let controller = controller(config, user)?;
    controller.refresh_history(session_id.clone()).await;
    check_banner(&controller)?;

    let state = controller.snapshot();
    let Some(session) = state.selected_session() else {
        return Err(match session_id {
            Some(id) => Error::Validation(format!("Session not found: #{id}")),
            None => Error::Validation("No research sessions yet.".to_string()),
        });
    };

    print!("{}", render::thread(session));
    Ok(())
}
