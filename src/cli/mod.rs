//! CLI command implementations.

pub mod ask;
pub mod health;
pub mod history;
pub mod render;
pub mod show;
pub mod users;

use crate::api::{HttpClient, ResearchApi, UserId};
use crate::config::Config;
use crate::core::ResearchController;
use crate::error::{Error, Result};

/// The user to act as: `--user` if given, else the configured default.
///
/// # Errors
///
/// Returns a configuration error if the configured default is invalid.
pub fn resolve_user(config: &Config, user: Option<UserId>) -> Result<UserId> {
    user.map_or_else(|| config.user.default_user(), Ok)
}

/// Build a controller over HTTP without loading anything.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the user cannot
/// be resolved.
pub fn controller(config: &Config, user: Option<UserId>) -> Result<ResearchController<HttpClient>> {
    let api = HttpClient::new(&config.api)?;
    Ok(ResearchController::new(api, resolve_user(config, user)?))
}

/// Turn a pending error banner into a command failure.
///
/// # Errors
///
/// Returns the banner message if one is set.
pub fn check_banner<A: ResearchApi>(controller: &ResearchController<A>) -> Result<()> {
    match controller.error() {
        Some(message) => {
            controller.clear_error();
            Err(Error::Unexpected(message))
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_user_wins() {
        let config = Config::default();
        let user = UserId::new(9).unwrap();
        assert_eq!(resolve_user(&config, Some(user)).unwrap(), user);
        assert_eq!(resolve_user(&config, None).unwrap(), UserId::FIRST);
    }
}
