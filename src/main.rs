//! scout CLI - research-query client.

use clap::{Parser, Subcommand};
use scout::api::{SessionId, UserId};
use scout::config::load_config;
use scout::{cli, logging};
use std::process::ExitCode;

/// Get the version string.
///
/// - Release builds (on a git tag): "0.1.0"
/// - Development builds: "0.1.0-dev (abc1234)"
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("SCOUT_GIT_HASH");
    const IS_RELEASE: &str = env!("SCOUT_IS_RELEASE");

    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            VERSION.to_string()
        } else {
            format!("{VERSION}-dev ({GIT_HASH})")
        }
    })
}

#[derive(Parser)]
#[command(name = "scout")]
#[command(author, version = version(), about = "Research-query client", long_about = None)]
struct Cli {
    /// User ID whose history to use. Defaults to the configured user.
    #[arg(short, long, global = true)]
    user: Option<UserId>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a research query and show the resulting session.
    Ask {
        /// The question (words are joined with spaces).
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// List research sessions.
    History {
        /// Print the full state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a session's messages. Defaults to the most recent session.
    Show {
        /// Session ID.
        session_id: Option<SessionId>,
    },

    /// Check that the research service is reachable.
    Health,

    /// Manage locally named users.
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List named users.
    List,

    /// Add a named user with the next free ID.
    Add {
        /// Display name.
        name: String,
    },

    /// Remove a named user.
    Remove {
        /// User ID.
        id: UserId,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("scout: error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Ask { query } => cli::ask::run(&config, cli.user, &query.join(" ")).await,
        Commands::History { json } => cli::history::run(&config, cli.user, json).await,
        Commands::Show { session_id } => cli::show::run(&config, cli.user, session_id).await,
        Commands::Health => cli::health::run(&config).await,
        Commands::Users { action } => match action {
            UsersAction::List => cli::users::list(&config, cli.user),
            UsersAction::Add { name } => cli::users::add(&config, &name),
            UsersAction::Remove { id } => cli::users::remove(&config, cli.user, id),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("scout: error: {e}");
            ExitCode::FAILURE
        }
    }
}
