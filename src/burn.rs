//! The burn orchestrator.
//!
//! [`Burner::burn`] owns the whole lifecycle of one subtitle-burn job:
//! acquire a fresh engine, fetch its core artifacts, load it, stage the
//! inputs and the font into its virtual filesystem, run the burn command,
//! and read the output back. Every step is awaited in order on one task;
//! ordering (subscribe before load, staging before exec, exec before read)
//! is enforced by control flow alone.

use std::sync::Arc;

use subburn_core::{BurnConfig, MediaFile, OutputFile, Result};
use subburn_engine::{ArtifactFetcher, CoreArtifacts, Engine, EngineSink, ProcessEngine};

use crate::filter;
use crate::naming;
use crate::tip::{Phase, Tip};

/// Capability interface through which a job reports back to its caller.
///
/// Progress is the engine's raw completion fraction scaled to `0..100`,
/// unclamped; tips arrive synchronously at each phase transition.
pub trait BurnObserver: Send + Sync {
    /// Encode completion percentage, conceptually in `[0, 100]`.
    fn on_progress(&self, percent: f64);

    /// A phase-transition status message.
    fn on_tip(&self, tip: Tip);
}

/// Bridges engine events to the caller: fractions scaled by 100, diagnostic
/// lines forwarded to the developer log, not to the user.
struct SinkBridge {
    observer: Arc<dyn BurnObserver>,
}

impl EngineSink for SinkBridge {
    fn on_progress(&self, fraction: f64) {
        self.observer.on_progress(fraction * 100.0);
    }

    fn on_log(&self, line: &str) {
        tracing::debug!(target: "subburn::engine", "{line}");
    }
}

type EngineFactory = Box<dyn Fn() -> Result<Arc<dyn Engine>> + Send + Sync>;

/// Orchestrates subtitle-burn jobs against an on-demand transcoding engine.
///
/// Each [`burn`](Burner::burn) call constructs a fresh engine with a private
/// virtual filesystem; nothing is shared between jobs, and concurrent calls
/// simply cost linearly more. The burner itself holds only configuration
/// and an HTTP client.
pub struct Burner {
    config: BurnConfig,
    fetcher: ArtifactFetcher,
    engine_factory: EngineFactory,
}

impl Burner {
    /// Create a burner backed by the native [`ProcessEngine`].
    pub fn new(config: BurnConfig) -> Self {
        Self::with_engine_factory(
            config,
            Box::new(|| Ok(Arc::new(ProcessEngine::new()?) as Arc<dyn Engine>)),
        )
    }

    /// Create a burner producing engines from `factory`. The factory is
    /// invoked once per job.
    pub fn with_engine_factory(config: BurnConfig, factory: EngineFactory) -> Self {
        Self {
            config,
            fetcher: ArtifactFetcher::new(),
            engine_factory: factory,
        }
    }

    /// Burn `subtitle` into `video`, reporting progress and tips to
    /// `observer`.
    ///
    /// Never panics or returns an error past this boundary: every failure is
    /// logged, surfaced as a final [`Tip::Failed`], and absorbed into
    /// `None`. Use [`run`](Burner::run) when the caller needs the typed
    /// failure kind.
    pub async fn burn(
        &self,
        video: &MediaFile,
        subtitle: &MediaFile,
        observer: Arc<dyn BurnObserver>,
    ) -> Option<OutputFile> {
        match self.run(video, subtitle, Arc::clone(&observer)).await {
            Ok(output) => Some(output),
            Err(e) => {
                tracing::error!(phase = %Phase::Failed, "burn job failed: {e}");
                observer.on_tip(Tip::Failed);
                None
            }
        }
    }

    /// Like [`burn`](Burner::burn) but propagates the typed error instead
    /// of absorbing it. The failure tip is not emitted on this path.
    pub async fn run(
        &self,
        video: &MediaFile,
        subtitle: &MediaFile,
        observer: Arc<dyn BurnObserver>,
    ) -> Result<OutputFile> {
        // A fresh engine per job; the sink must be registered before load so
        // no load-time event is lost.
        tracing::debug!(phase = %Phase::Init, video = %video.name, subtitle = %subtitle.name, "starting burn job");
        let engine = (self.engine_factory)()?;
        engine.subscribe(Arc::new(SinkBridge {
            observer: Arc::clone(&observer),
        }));

        tracing::debug!(phase = %Phase::FetchCore, "fetching engine core");
        observer.on_tip(Tip::LoadingEngine);
        let core = self
            .fetcher
            .fetch(&self.config.core_js_url(), "text/javascript")
            .await?;
        observer.on_tip(Tip::CoreJsLoaded);
        let wasm = self
            .fetcher
            .fetch(&self.config.core_wasm_url(), "application/wasm")
            .await?;
        observer.on_tip(Tip::WasmLoaded);

        tracing::debug!(phase = %Phase::LoadEngine, "loading engine");
        engine.load(CoreArtifacts { core, wasm }).await?;

        // Name collisions between the two inputs are the caller's problem.
        tracing::debug!(phase = %Phase::StageInputs, "staging inputs");
        observer.on_tip(Tip::WritingInputs);
        engine.write_file(&video.name, video.bytes.clone()).await?;
        engine
            .write_file(&subtitle.name, subtitle.bytes.clone())
            .await?;

        tracing::debug!(phase = %Phase::StageFont, "staging font");
        let font = self
            .fetcher
            .fetch(&self.config.resolved_font_url(), "font/ttf")
            .await?;
        engine.write_file(&self.config.font_mount, font.bytes).await?;

        let output_name = naming::output_name(&video.name);
        tracing::debug!(phase = %Phase::Execute, output = %output_name, "executing burn command");
        observer.on_tip(Tip::Executing);
        let args = filter::burn_args(&video.name, &subtitle.name, &output_name, &self.config);
        engine.exec(&args).await?;

        tracing::debug!(phase = %Phase::Collect, "collecting output");
        let bytes = engine.read_file(&output_name).await?;

        tracing::debug!(phase = %Phase::Done, "burn job complete");
        Ok(OutputFile {
            mime: naming::mime_type(&video.name),
            name: output_name,
            bytes,
        })
    }
}
