//! tracing subscriber setup for hosts embedding the editor.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

use crate::config::EditorConfig;

/// Install a fmt subscriber at `config.log_level`.
///
/// Returns false if a global subscriber was already installed, in which case
/// the existing one stays in charge.
pub fn init(config: &EditorConfig) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(false)
        .try_init()
        .is_ok()
}
