//! Error types for FormPilot.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Decryption error: {0}")]
    Decrypt(String),

    #[error("Page error: {0}")]
    Page(String),

    #[error("Fill error: {0}")]
    Fill(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
