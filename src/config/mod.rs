//! Configuration and path management for CodeMOA

pub mod paths;
pub mod settings;

pub use paths::CodemoaPaths;
pub use settings::{AppSettings, ThemeMode};
