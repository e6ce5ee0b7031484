/// Error types for the terminal front end
use std::io;

use thiserror::Error;
use turbine_core::SceneError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Terminal I/O failed
    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// The scene could not be built
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

/// Result type using AppError
pub type Result<T> = std::result::Result<T, AppError>;
