//! FormPilot DOM — explicit page model over which the engine operates.
//!
//! Wraps what the engine needs from a live document: element
//! enumeration in encounter order, control state reads and writes,
//! computed style and geometry for the visibility filter, selector
//! generation/matching, and an ordered synthetic-event log standing in
//! for the host page's change detection.

pub mod fixture;
pub mod page;
pub mod selector;
pub mod types;
pub mod visibility;

pub use fixture::FixtureNode;
pub use page::{Element, Page};
pub use selector::{generate_selector, query_selector, query_selector_all};
pub use types::*;
pub use visibility::is_visible;
