//! `scout ask` command implementation.

use crate::api::{MAX_QUERY_CHARS, UserId};
use crate::cli::{check_banner, controller, render};
use crate::config::Config;
use crate::error::Result;
use crate::format::character_count;

/// Run the ask command.
///
/// Submits the query, then prints the session it landed in.
///
/// # Errors
///
/// Returns an error if the query is rejected or the submission fails.
pub async fn run(config: &Config, user: Option<UserId>, query: &str) -> Result<()> {
    let controller = controller(config, user)?;

    let count = character_count(query, MAX_QUERY_CHARS);
    eprintln!("{}", render::character_count(&count));
    if !count.is_over_limit && !query.trim().is_empty() {
        eprintln!("Researching... this can take a few minutes.");
    }

    let response = controller.submit_query(query).await;
    check_banner(&controller)?;

    let state = controller.snapshot();
    match state.selected_session() {
        Some(session) => print!("{}", render::thread(session)),
        None => {
            if let Some(summary) = response.and_then(|r| r.result) {
                println!("{summary}");
            }
        }
    }
    Ok(())
}
