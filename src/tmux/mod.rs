// ABOUTME: Host tmux session location and keystroke delivery
// Talks to the tmux server over its CLI control surface

pub mod error;
pub mod locator;

pub use error::TmuxError;
pub use locator::{SessionLocator, TmuxLocator};
