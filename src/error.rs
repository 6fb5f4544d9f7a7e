// src/error.rs
use std::fmt::Display;
use std::path::Path;

pub use crate::types::SitedorkError;

pub type Result<T> = std::result::Result<T, SitedorkError>;

/// Attach a file path to I/O and parse failures, picking the error kind by
/// which side of the run the file belongs to.
pub trait PathContext<T> {
    /// Failure while reading the settings file.
    fn config_at(self, action: &str, path: &Path) -> Result<T>;

    /// Failure while creating or appending to a results file.
    fn output_at(self, action: &str, path: &Path) -> Result<T>;
}

impl<T, E: Display> PathContext<T> for std::result::Result<T, E> {
    fn config_at(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|e| SitedorkError::ConfigError(format!("{} {}: {}", action, path.display(), e)))
    }

    fn output_at(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|e| SitedorkError::OutputError(format!("{} {}: {}", action, path.display(), e)))
    }
}
