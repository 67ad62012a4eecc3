//! Pre-trained model artifacts.
//!
//! - narrow capability traits the engine depends on (`artifacts`)
//! - the process-wide read-only store with degraded-state handling (`store`)

pub mod artifacts;
pub mod store;

pub use artifacts::*;
pub use store::*;
