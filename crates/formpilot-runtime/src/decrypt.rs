//! Template decryption boundary.
//!
//! Templates arrive as opaque blobs; turning one into plaintext fields
//! is somebody else's job behind this trait. The runtime only ever
//! sees the decrypted [`Template`] for the duration of one fill.

use async_trait::async_trait;
use formpilot_core::{Error, Result};
use formpilot_protocol::{EncryptedTemplate, Template};

/// Turns an encrypted template blob into plaintext fields.
#[async_trait]
pub trait TemplateDecryptor: Send + Sync {
    async fn decrypt_object(&self, blob: &EncryptedTemplate) -> Result<Template>;
}

/// Pass-through decryptor: treats the blob as plaintext JSON.
///
/// Stands in for the real decryption service in tests and the CLI.
pub struct PlainDecryptor;

#[async_trait]
impl TemplateDecryptor for PlainDecryptor {
    async fn decrypt_object(&self, blob: &EncryptedTemplate) -> Result<Template> {
        serde_json::from_value(blob.0.clone())
            .map_err(|e| Error::Decrypt(format!("template inválido: {e}")))
    }
}
