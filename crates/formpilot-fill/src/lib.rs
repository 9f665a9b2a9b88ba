//! FormPilot Fill — type-aware value writing and visual feedback.

pub mod annotate;
pub mod filler;

pub use annotate::FeedbackAnnotator;
pub use filler::{parse_boolean, Filler, FALSE_WORDS, TRUE_WORDS};
