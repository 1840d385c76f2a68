/*!
 * Error types for the subhook application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning caption files into hooks
#[derive(Error, Debug)]
pub enum HookError {
    /// The subtitles directory to walk does not exist
    #[error("Subtitles folder '{}' does not exist", .0.display())]
    MissingInput(PathBuf),

    /// Reading a caption file failed
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Caption file is not valid UTF-8
    #[error("File is not valid UTF-8: {}", .0.display())]
    Encoding(PathBuf),

    /// Writing a hook file failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// File being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by configuration validation
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No caption extension configured
    #[error("At least one subtitle extension must be configured")]
    NoExtensions,

    /// A directory setting is empty
    #[error("Directory setting '{0}' must not be empty")]
    EmptyDirectory(&'static str),

    /// Subtitles and hooks would share a directory
    #[error("Subtitles and hooks directories must differ: {0}")]
    SameDirectories(String),
}

/// Errors that can occur when loading or saving video record files
#[derive(Error, Debug)]
pub enum RecordsError {
    /// File could not be read or written
    #[error("Record file error for {}: {source}", path.display())]
    Io {
        /// Record file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File content is not a valid record list
    #[error("Invalid record file {}: {source}", path.display())]
    Json {
        /// Record file path
        path: PathBuf,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },
}
