//! subburn-core: shared types, errors, and configuration.
//!
//! This crate is the foundational dependency for the other subburn crates,
//! providing the unified error type, job configuration, and the small blob
//! types that flow between the orchestrator and the engine boundary.

pub mod config;
pub mod error;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use config::{BurnConfig, SubtitleStyle};
pub use error::{Error, Result};
pub use media::{Blob, MediaFile, OutputFile};
