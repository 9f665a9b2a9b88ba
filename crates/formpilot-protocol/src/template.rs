//! Template data model.

use serde::{Deserialize, Serialize};

/// One logical field inside a decrypted template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub value: String,
}

impl TemplateField {
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            value: value.into(),
        }
    }
}

/// A named set of logical fields to inject into a form.
///
/// Decrypted just-in-time per fill request and dropped when the
/// operation ends; never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub fields: Vec<TemplateField>,
}

/// Opaque encrypted template blob, passed through to the decryption
/// service untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedTemplate(pub serde_json::Value);

impl EncryptedTemplate {
    /// Wrap a plaintext template as a blob (for stubs and tests).
    pub fn plaintext(template: &Template) -> Self {
        Self(serde_json::to_value(template).unwrap_or(serde_json::Value::Null))
    }
}
