//! Configuration module for the finance tracker
//!
//! - Platform path resolution for the settings file
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::Settings;
