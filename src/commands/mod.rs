//! Command implementations for the Pagelift CLI

pub mod build;
pub mod clean;
pub mod completions;
pub mod deploy;
pub mod helpers;
pub mod version;
