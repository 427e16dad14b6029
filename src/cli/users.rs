//! `scout users` command implementation.

use crate::api::UserId;
use crate::cli::resolve_user;
use crate::config::Config;
use crate::core::UserDirectory;
use crate::error::{Error, Result};
use crate::format::{InputRules, validate_input};
use crate::storage::{FileBackend, UserStore};
use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

const MAX_NAME_CHARS: usize = 50;

/// Run `scout users list`.
///
/// # Errors
///
/// Returns an error if the user directory cannot be read.
pub fn list(config: &Config, user: Option<UserId>) -> Result<()> {
    let store = FileBackend::new(config.storage.path.clone())?;
    let active = resolve_user(config, user)?;
    print!("{}", render_list(&store, active)?);
    Ok(())
}

/// Run `scout users add`.
///
/// # Errors
///
/// Returns an error for a blank or over-long name, or if the directory
/// cannot be saved.
pub fn add(config: &Config, name: &str) -> Result<()> {
    check_name(name)?;
    let store = FileBackend::new(config.storage.path.clone())?;
    let mut directory = UserDirectory::load(&store)?;
    let created = directory.create_user(name)?;

    println!("Created user {} ({})", created.id, created.name);
    println!("Use it with: scout --user {} history", created.id);
    Ok(())
}

/// Run `scout users remove`.
///
/// # Errors
///
/// Returns an error for an unknown id, the last remaining user, or if the
/// directory cannot be saved.
pub fn remove(config: &Config, user: Option<UserId>, id: UserId) -> Result<()> {
    let store = FileBackend::new(config.storage.path.clone())?;
    let active = resolve_user(config, user)?;
    let mut directory = UserDirectory::load(&store)?;

    let switch_to = directory.delete_user(id, active)?;
    println!("Removed user {id}");
    if let Some(next) = switch_to {
        println!(
            "Active user removed; continue with: scout --user {next} ({})",
            directory.display_name(next)
        );
    }
    Ok(())
}

fn check_name(name: &str) -> Result<()> {
    let rules = InputRules {
        max_length: Some(MAX_NAME_CHARS),
        ..InputRules::default()
    };
    let validation = validate_input(name.trim(), &rules);
    match validation.errors.into_iter().next() {
        Some(message) => Err(Error::Validation(message)),
        None => Ok(()),
    }
}

fn render_list(store: &dyn UserStore, active: UserId) -> Result<String> {
    let directory = UserDirectory::load(store)?;
    let mut out = String::new();

    for named in directory.users() {
        let marker = if named.id == active { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:>4}  {:<24} {}",
            named.id,
            named.name,
            format_local_time(named.created_at)
        );
    }

    if directory.find(active).is_none() {
        let _ = writeln!(out, "* {active:>4}  {:<24} (not in directory)", directory.display_name(active));
    }
    Ok(out)
}

/// Format UTC time as local time for display.
fn format_local_time(utc: DateTime<Utc>) -> String {
    let local: DateTime<Local> = utc.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}
