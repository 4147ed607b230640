//! Public runtime API surface.
//!
//! Types exposed to consumers of the runtime crate live here so the
//! sequencer and loaders can stay focused on orchestration.

pub mod errors;

pub use errors::{Result, RuntimeError};
