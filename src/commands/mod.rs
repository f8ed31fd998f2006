//! CLI commands

pub mod clean;
pub mod export;
pub mod list;
pub mod show;
pub mod stats;
