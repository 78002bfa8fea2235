//! Chat model implementations

mod echo;

pub use echo::{EchoChatModel, ECHO_PREFIX};
