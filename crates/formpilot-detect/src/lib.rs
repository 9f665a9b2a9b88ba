//! FormPilot Detect — field scanning, label resolution, control analysis.

pub mod analyzer;
pub mod label;
pub mod scanner;
pub mod types;

pub use analyzer::{analyze, field_confidence};
pub use label::resolve_label;
pub use scanner::scan;
pub use types::DetectedField;
