//! FormPilot Core — shared error type and engine configuration.

pub mod config;
pub mod error;

pub use config::{EngineConfig, DEFAULT_SETTLE_DELAY_MS};
pub use error::{Error, Result};
