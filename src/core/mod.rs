//! Research state, its orchestration, and the local user directory.

pub mod controller;
pub mod state;
pub mod users;

pub use controller::ResearchController;
pub use state::ResearchState;
pub use users::{NamedUser, UserDirectory};
