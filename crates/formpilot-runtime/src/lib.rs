//! FormPilot Runtime — orchestration, decryption boundary, transport.

pub mod decrypt;
pub mod orchestrator;
pub mod transport;

pub use decrypt::{PlainDecryptor, TemplateDecryptor};
pub use orchestrator::Orchestrator;
pub use transport::{channel, serve, RequestEnvelope, RequestSender};
