//! Request/response message contract.
//!
//! Shapes (field names included) mirror the original extension wire
//! format so existing callers keep working.

use std::collections::BTreeMap;

use formpilot_detect::DetectedField;
use serde::Serialize;

use crate::template::EncryptedTemplate;

/// Error payload for an unrecognized `action`.
pub const UNKNOWN_ACTION_ERROR: &str = "Ação não reconhecida";

/// A request delivered by the messaging transport.
#[derive(Debug, Clone)]
pub enum Request {
    DetectFields,
    FillForm { template: EncryptedTemplate },
    Unknown { action: String },
}

impl Request {
    /// Parse a raw message by its `action` discriminator. Anything
    /// unrecognized becomes [`Request::Unknown`] rather than an error;
    /// the orchestrator answers it with the standard error payload.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let action = value.get("action").and_then(serde_json::Value::as_str);
        match action {
            Some("detectFields") => Request::DetectFields,
            Some("fillForm") => Request::FillForm {
                template: EncryptedTemplate(
                    value.get("template").cloned().unwrap_or(serde_json::Value::Null),
                ),
            },
            other => Request::Unknown {
                action: other.unwrap_or("").to_string(),
            },
        }
    }
}

/// Response to a `detectFields` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResponse {
    pub success: bool,
    pub detected_fields: usize,
    pub fields: Vec<DetectedField>,
    pub fields_by_type: BTreeMap<String, Vec<DetectedField>>,
}

/// Response to a completed `fillForm` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillResponse {
    pub success: bool,
    pub filled_fields: usize,
    pub total_fields: usize,
    pub errors: Vec<String>,
}

/// Fatal-failure payload (decryption failure, unknown action).
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Any response the orchestrator can produce.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Detect(DetectResponse),
    Fill(FillResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error(ErrorResponse {
            success: false,
            error: message.into(),
        })
    }

    pub fn unknown_action() -> Self {
        Self::error(UNKNOWN_ACTION_ERROR)
    }

    pub fn success(&self) -> bool {
        match self {
            Response::Detect(r) => r.success,
            Response::Fill(r) => r.success,
            Response::Error(r) => r.success,
        }
    }
}
