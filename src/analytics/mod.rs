//! Analytics modules.
//!
//! The aggregation engine plus the selection and search helpers that feed it.

pub mod engine;
pub mod search;
pub mod selection;

pub use engine::*;
pub use selection::SelectionSet;
