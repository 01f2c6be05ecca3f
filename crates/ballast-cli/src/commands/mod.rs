//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (snapshot source resolution, report building)
//! - `config` - Settings commands (path, show)
//! - `import` - Copy a JSON snapshot into a SQLite database
//! - `report` - Report, metrics and payoff commands

pub mod config;
pub mod core;
pub mod import;
pub mod report;

// Re-export command functions for main.rs
pub use config::*;
pub use self::core::*;
pub use import::*;
pub use report::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
