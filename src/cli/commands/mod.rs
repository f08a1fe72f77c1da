//! CLI command implementations

pub mod completions;
pub mod dashboard;
pub mod init;
pub mod item;
pub mod sup;
