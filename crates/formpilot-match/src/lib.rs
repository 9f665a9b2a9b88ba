//! FormPilot Match — similarity scoring and template-to-field selection.
//!
//! Pure functions throughout: every weight and threshold lives in a
//! named, independently testable unit rather than inline arithmetic.

pub mod compat;
pub mod engine;
pub mod similarity;

pub use compat::{is_compatible, TEXT_FAMILY};
pub use engine::{match_score, select_match, NAME_FALLBACK_THRESHOLD, SCORE_THRESHOLD};
pub use similarity::{normalize, similar, text_similarity, tokenize};
