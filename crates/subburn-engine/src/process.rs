//! Native adapter realizing the [`Engine`] contract with a child process.
//!
//! The virtual filesystem is a private temporary directory; absolute VFS
//! paths (e.g. `/tmp/yahei`) are rooted inside it. `load` stages the fetched
//! core artifacts into the sandbox and marks the glue entry executable;
//! `exec` spawns it with the sandbox as working directory, so relative file
//! names in the command resolve to staged VFS entries, and rewrites absolute
//! VFS paths in argv (whole tokens or embedded after `=`/`:` in filter
//! expressions) into the sandbox so the child sees the same namespace as
//! `write_file`/`read_file`. The engine-native progress flags are injected
//! and the diagnostic stream is bridged to the registered sinks. The sandbox
//! is deleted when the engine is dropped.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use subburn_core::{Error, Result};

use crate::engine::{CoreArtifacts, Engine, EngineSink};
use crate::progress::ProgressParser;

/// Sandbox-relative location of the staged engine core.
const CORE_GLUE: &str = ".engine/ffmpeg-core";
const CORE_WASM: &str = ".engine/ffmpeg-core.wasm";

/// How many trailing diagnostic lines to keep for execution error messages.
const STDERR_TAIL: usize = 12;

#[derive(Debug, Default)]
struct State {
    loaded: bool,
    in_flight: bool,
}

/// Process-backed transcoding engine.
pub struct ProcessEngine {
    sandbox: tempfile::TempDir,
    sinks: Mutex<Vec<Arc<dyn EngineSink>>>,
    state: Mutex<State>,
}

impl ProcessEngine {
    /// Create an unloaded engine with a fresh sandbox.
    pub fn new() -> Result<Self> {
        let sandbox = tempfile::TempDir::new()?;
        Ok(Self {
            sandbox,
            sinks: Mutex::new(Vec::new()),
            state: Mutex::new(State::default()),
        })
    }

    /// Map a virtual filesystem name into the sandbox.
    fn vfs_path(&self, name: &str) -> PathBuf {
        self.sandbox.path().join(name.trim_start_matches('/'))
    }

    fn core_path(&self) -> PathBuf {
        self.sandbox.path().join(CORE_GLUE)
    }

    fn require_loaded(&self) -> bool {
        self.state.lock().loaded
    }

    fn emit_progress(&self, fraction: f64) {
        let sinks = self.sinks.lock().clone();
        for sink in &sinks {
            sink.on_progress(fraction);
        }
    }

    fn emit_log(&self, line: &str) {
        let sinks = self.sinks.lock().clone();
        for sink in &sinks {
            sink.on_log(line);
        }
    }

    async fn stage(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await
    }
}

/// Rewrite absolute VFS paths inside one argv token so they resolve to the
/// sandbox, matching what `write_file`/`read_file` do with the same names.
///
/// A `/` opens a VFS path when it starts the token or directly follows a
/// `=` or `:` delimiter, covering both bare path tokens and paths embedded
/// in filter expressions such as `fontsdir=/tmp`. A double slash is left
/// alone.
fn rewrite_vfs_paths(arg: &str, root: &Path) -> String {
    let root = root.to_string_lossy();
    let mut out = String::with_capacity(arg.len() + root.len());
    let mut prev: Option<char> = None;
    let mut chars = arg.chars().peekable();

    while let Some(c) = chars.next() {
        let opens_path = c == '/'
            && matches!(prev, None | Some('=') | Some(':'))
            && chars.peek() != Some(&'/');
        if opens_path {
            out.push_str(&root);
        }
        out.push(c);
        prev = Some(c);
    }

    out
}

/// Clears the in-flight flag when an exec finishes, on every exit path.
struct InFlightGuard<'a>(&'a Mutex<State>);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().in_flight = false;
    }
}

#[async_trait]
impl Engine for ProcessEngine {
    fn subscribe(&self, sink: Arc<dyn EngineSink>) {
        self.sinks.lock().push(sink);
    }

    async fn load(&self, artifacts: CoreArtifacts) -> Result<()> {
        if self.require_loaded() {
            return Err(Error::EngineLoad("engine is already loaded".into()));
        }
        if artifacts.core.bytes.is_empty() || artifacts.wasm.bytes.is_empty() {
            return Err(Error::EngineLoad("empty core artifact".into()));
        }

        let glue = self.core_path();
        self.stage(&glue, &artifacts.core.bytes)
            .await
            .map_err(|e| Error::EngineLoad(format!("failed to stage core: {e}")))?;
        self.stage(&self.sandbox.path().join(CORE_WASM), &artifacts.wasm.bytes)
            .await
            .map_err(|e| Error::EngineLoad(format!("failed to stage wasm: {e}")))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&glue, std::fs::Permissions::from_mode(0o755))
                .await
                .map_err(|e| Error::EngineLoad(format!("failed to mark executable: {e}")))?;
        }

        self.state.lock().loaded = true;
        tracing::debug!(sandbox = %self.sandbox.path().display(), "engine loaded");
        Ok(())
    }

    async fn write_file(&self, name: &str, bytes: Bytes) -> Result<()> {
        if !self.require_loaded() {
            return Err(Error::staging(name, "engine not loaded"));
        }
        self.stage(&self.vfs_path(name), &bytes)
            .await
            .map_err(|e| Error::staging(name, e.to_string()))
    }

    async fn exec(&self, args: &[String]) -> Result<()> {
        {
            let mut state = self.state.lock();
            if !state.loaded {
                return Err(Error::Execution("engine not loaded".into()));
            }
            if state.in_flight {
                return Err(Error::Execution("another command is in flight".into()));
            }
            state.in_flight = true;
        }
        let _guard = InFlightGuard(&self.state);

        let args: Vec<String> = args
            .iter()
            .map(|a| rewrite_vfs_paths(a, self.sandbox.path()))
            .collect();

        let mut child = Command::new(self.core_path())
            .args(["-y", "-progress", "pipe:2", "-nostats"])
            .args(&args)
            .current_dir(self.sandbox.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Execution(format!("failed to spawn engine core: {e}")))?;

        // Bridge the diagnostic stream: every line to the log sinks, progress
        // blocks folded into fractions for the progress sinks.
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Execution("engine stderr unavailable".into()))?;
        let mut lines = BufReader::new(stderr).lines();
        let mut parser = ProgressParser::new();
        let mut tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL);

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| Error::Execution(format!("failed to read engine output: {e}")))?
        {
            self.emit_log(&line);
            if let Some(fraction) = parser.push(&line) {
                self.emit_progress(fraction);
            }
            if tail.len() == STDERR_TAIL {
                tail.pop_front();
            }
            tail.push_back(line);
        }

        let status = child
            .wait()
            .await
            .map_err(|e| Error::Execution(format!("failed to wait for engine core: {e}")))?;

        if !status.success() {
            let context = tail.into_iter().collect::<Vec<_>>().join("\n");
            return Err(Error::Execution(format!(
                "engine core exited with {status}: {context}"
            )));
        }

        Ok(())
    }

    async fn read_file(&self, name: &str) -> Result<Bytes> {
        if !self.require_loaded() {
            return Err(Error::read(name, "engine not loaded"));
        }
        let data = tokio::fs::read(self.vfs_path(name))
            .await
            .map_err(|e| Error::read(name, e.to_string()))?;
        Ok(Bytes::from(data))
    }
}
