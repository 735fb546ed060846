//! The [`Engine`] trait defines the transcoding-engine contract.
//!
//! One engine instance serves exactly one burn job: it is loaded once from
//! fetched core artifacts, files are staged into its private virtual
//! filesystem, one command runs, and the output is read back. The instance
//! is then abandoned together with its virtual filesystem.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use subburn_core::{Blob, Result};

/// Capability interface for engine events.
///
/// Implementors receive asynchronous progress fractions and diagnostic log
/// lines. Sinks must be registered via [`Engine::subscribe`] *before*
/// [`Engine::load`] so that no event emitted during loading is lost.
pub trait EngineSink: Send + Sync {
    /// Raw encode-completion fraction, `0.0..1.0`. The engine may briefly
    /// report out-of-range values; receivers decide whether to clamp.
    fn on_progress(&self, fraction: f64);

    /// One diagnostic log line from the engine.
    fn on_log(&self, line: &str);
}

/// The engine's executable core: JS glue plus wasm binary, fetched as
/// in-memory blobs from the same version-pinned build.
#[derive(Debug, Clone)]
pub struct CoreArtifacts {
    /// The JS glue module (`text/javascript`).
    pub core: Blob,
    /// The wasm binary (`application/wasm`).
    pub wasm: Blob,
}

/// A single-job transcoding engine with a private virtual filesystem.
///
/// Call order is the caller's responsibility and is enforced by adapters
/// with typed errors: `subscribe` before `load`, `load` exactly once before
/// any file or exec operation, and at most one command in flight.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Register an event sink. Must happen before [`load`](Engine::load).
    fn subscribe(&self, sink: Arc<dyn EngineSink>);

    /// Initialize the engine from its core artifacts. Exactly once.
    async fn load(&self, artifacts: CoreArtifacts) -> Result<()>;

    /// Stage `bytes` under `name` in the virtual filesystem.
    async fn write_file(&self, name: &str, bytes: Bytes) -> Result<()>;

    /// Run one argv-style command against the staged files.
    async fn exec(&self, args: &[String]) -> Result<()>;

    /// Read the bytes at `name` from the virtual filesystem.
    async fn read_file(&self, name: &str) -> Result<Bytes>;
}
