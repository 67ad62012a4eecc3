//! Input/output helpers.
//!
//! - assessment JSON export (`export`)

pub mod export;

pub use export::*;
