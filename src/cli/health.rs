//! `scout health` command implementation.

use crate::api::{HttpClient, ResearchApi};
use crate::config::Config;
use crate::error::Result;

/// Run the health command.
///
/// # Errors
///
/// Returns an error if the service cannot be reached or reports failure.
pub async fn run(config: &Config) -> Result<()> {
    let client = HttpClient::new(&config.api)?;
    let status = client.health_check().await?;

    println!("{} is up", client.base_url());
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
