pub mod cleaner;
pub mod common;
pub mod config;
pub mod outcome;
pub mod platform;
pub mod process;
pub mod prompt;
pub mod registry;
pub mod remove;
pub mod settings;
pub mod targets;
