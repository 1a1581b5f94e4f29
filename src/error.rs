//! Error types for Berth operations.
//!
//! This module defines [`BerthError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `BerthError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `BerthError::Other`) for unexpected errors
//! - Every error is fatal to the run: nothing is retried or recovered
//!   mid-provisioning, so messages must tell the operator what to fix

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Berth operations.
#[derive(Debug, Error)]
pub enum BerthError {
    /// No supported package manager was found on the host.
    #[error("Unsupported system: no known package manager found (looked for {probed})")]
    UnsupportedSystem { probed: String },

    /// The host CPU architecture is not in the supported set.
    #[error("Unsupported architecture: {arch}")]
    UnsupportedArchitecture { arch: String },

    /// A required credential field was left empty at the prompt.
    #[error("Required field '{field}' must not be empty")]
    MissingRequiredField { field: String },

    /// A credential field has a value of the wrong shape (e.g. non-numeric port).
    #[error("Invalid value for '{field}': {value}")]
    InvalidFieldValue { field: String, value: String },

    /// Application configuration file not found at the expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the application configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A network download failed (setup script or tool binary).
    #[error("Download failed for {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Berth operations.
pub type Result<T> = std::result::Result<T, BerthError>;
