//! FormPilot Protocol — message contract and template data model.
//!
//! The request/response shapes preserve the original extension's wire
//! format: `action`-discriminated requests and camelCase response
//! payloads, including the Portuguese error strings callers match on.

pub mod messages;
pub mod template;

pub use messages::{
    DetectResponse, ErrorResponse, FillResponse, Request, Response, UNKNOWN_ACTION_ERROR,
};
pub use template::{EncryptedTemplate, Template, TemplateField};
