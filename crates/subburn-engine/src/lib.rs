//! # subburn-engine
//!
//! The transcoding-engine boundary for subburn.
//!
//! This crate provides:
//!
//! - **The engine contract** ([`Engine`], [`EngineSink`]) -- the polymorphic
//!   boundary the orchestrator drives: load once, stage files into a private
//!   virtual filesystem, run one command, read the output back, with
//!   progress and diagnostic-log events delivered to a registered sink.
//! - **Artifact fetching** ([`ArtifactFetcher`]) -- HTTP retrieval of the
//!   engine's version-pinned core artifacts and the burn font as in-memory
//!   blobs.
//! - **A concrete adapter** ([`ProcessEngine`]) -- realizes the contract
//!   natively by sandboxing the virtual filesystem in a temporary directory
//!   and running the fetched engine core as a child process.

pub mod engine;
pub mod fetch;
pub mod process;
pub mod progress;

// ---- Re-exports for convenience ----

pub use engine::{CoreArtifacts, Engine, EngineSink};
pub use fetch::ArtifactFetcher;
pub use process::ProcessEngine;
pub use progress::ProgressParser;
