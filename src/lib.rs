// ABOUTME: Library crate for tmux-relay exposing the command-relay core
// Chat-platform integration and process startup live in the embedding application

pub mod config;
pub mod models;
pub mod relay;
pub mod store;
pub mod tmux;

pub use config::RelayConfig;
pub use models::{Notification, SessionRecord};
pub use relay::{parse_command_input, CommandRelay, RelayError, RelayOutcome, RegisteredSession};
pub use store::{FileSessionStore, SessionStore, StoreError};
pub use tmux::{SessionLocator, TmuxError, TmuxLocator};
