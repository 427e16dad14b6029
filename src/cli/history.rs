//! `scout history` command implementation.

use crate::api::UserId;
use crate::cli::{check_banner, controller, render};
use crate::config::Config;
use crate::core::UserDirectory;
use crate::error::Result;
use crate::storage::FileBackend;

/// Run the history command.
///
/// Lists the user's sessions, newest first as the server orders them.
///
/// # Errors
///
/// Returns an error if the history cannot be loaded.
pub async fn run(config: &Config, user: Option<UserId>, json: bool) -> Result<()> {
    let controller = controller(config, user)?;
    controller.refresh_history(None).await;
    check_banner(&controller)?;

    let state = controller.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    let store = FileBackend::new(config.storage.path.clone())?;
    let directory = UserDirectory::load(&store)?;
    let label = directory.display_name(state.current_user_id);

    print!("{}", render::session_list(&state, &label));
    Ok(())
}
