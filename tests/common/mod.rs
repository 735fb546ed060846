//! Shared test harness for integration tests.
//!
//! Provides [`FakeEngine`], a scripted in-memory engine that records every
//! call, [`RecordingObserver`] for capturing progress and tips, and helpers
//! for mounting artifact/font fixtures on a wiremock server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use subburn::{
    BurnConfig, BurnObserver, CoreArtifacts, Engine, EngineSink, Error, Result, Tip,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One recorded engine call, in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Subscribe,
    Load,
    Write(String),
    Exec(Vec<String>),
    Read(String),
}

/// In-memory engine with scripted behavior and full call recording.
pub struct FakeEngine {
    pub calls: Mutex<Vec<EngineCall>>,
    /// Reject the `load` call.
    pub fail_load: bool,
    /// Fail the `exec` call after emitting any scripted progress.
    pub fail_exec: bool,
    /// Whether `exec` produces the output file at its trailing argv token.
    pub produce_output: bool,
    /// Bytes written as the output file.
    pub output_bytes: Bytes,
    /// Raw progress fractions emitted to sinks during `exec`.
    pub progress_script: Vec<f64>,
    sinks: Mutex<Vec<Arc<dyn EngineSink>>>,
    vfs: Mutex<HashMap<String, Bytes>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_load: false,
            fail_exec: false,
            produce_output: true,
            output_bytes: Bytes::from_static(b"burned-output"),
            progress_script: Vec::new(),
            sinks: Mutex::new(Vec::new()),
            vfs: Mutex::new(HashMap::new()),
        }
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// The recorded calls, cloned out.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether any `exec` call was recorded.
    pub fn exec_attempted(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c, EngineCall::Exec(_)))
    }
}

#[async_trait]
impl Engine for FakeEngine {
    fn subscribe(&self, sink: Arc<dyn EngineSink>) {
        self.record(EngineCall::Subscribe);
        self.sinks.lock().unwrap().push(sink);
    }

    async fn load(&self, _artifacts: CoreArtifacts) -> Result<()> {
        self.record(EngineCall::Load);
        if self.fail_load {
            return Err(Error::EngineLoad("scripted load rejection".into()));
        }
        Ok(())
    }

    async fn write_file(&self, name: &str, bytes: Bytes) -> Result<()> {
        self.record(EngineCall::Write(name.to_string()));
        self.vfs.lock().unwrap().insert(name.to_string(), bytes);
        Ok(())
    }

    async fn exec(&self, args: &[String]) -> Result<()> {
        self.record(EngineCall::Exec(args.to_vec()));
        let sinks = self.sinks.lock().unwrap().clone();
        for fraction in &self.progress_script {
            for sink in &sinks {
                sink.on_progress(*fraction);
            }
        }
        if self.fail_exec {
            return Err(Error::Execution("scripted exec failure".into()));
        }
        if self.produce_output {
            if let Some(output) = args.last() {
                self.vfs
                    .lock()
                    .unwrap()
                    .insert(output.clone(), self.output_bytes.clone());
            }
        }
        Ok(())
    }

    async fn read_file(&self, name: &str) -> Result<Bytes> {
        self.record(EngineCall::Read(name.to_string()));
        self.vfs
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::read(name, "no such file"))
    }
}

/// Observer that records every progress percentage and tip string.
#[derive(Default)]
pub struct RecordingObserver {
    pub percents: Mutex<Vec<f64>>,
    pub tips: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn percents(&self) -> Vec<f64> {
        self.percents.lock().unwrap().clone()
    }

    pub fn tips(&self) -> Vec<String> {
        self.tips.lock().unwrap().clone()
    }
}

impl BurnObserver for RecordingObserver {
    fn on_progress(&self, percent: f64) {
        self.percents.lock().unwrap().push(percent);
    }

    fn on_tip(&self, tip: Tip) {
        self.tips.lock().unwrap().push(tip.to_string());
    }
}

/// Install a test subscriber so `RUST_LOG=subburn=debug` shows phase
/// transitions and forwarded engine diagnostics.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Mount the engine core artifacts on `server`.
pub async fn mount_core(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/ffmpeg-core.js"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"// glue".to_vec()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ffmpeg-core.wasm"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\0asm....".to_vec()))
        .mount(server)
        .await;
}

/// Mount the font fixture on `server` with the given status.
pub async fn mount_font(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/Yahei.ttf"))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(b"fontdata".to_vec()))
        .mount(server)
        .await;
}

/// A config pointing both the artifact base and the origin at `server`.
pub fn config_for(server: &MockServer) -> BurnConfig {
    BurnConfig {
        core_base_url: server.uri(),
        origin: server.uri(),
        ..BurnConfig::default()
    }
}
