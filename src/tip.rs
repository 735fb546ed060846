//! Phase and tip signals for the burn pipeline.

use std::fmt;

/// The phases a burn job moves through, in order.
///
/// `Failed` is reachable from any phase; the others are strictly sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    FetchCore,
    LoadEngine,
    StageInputs,
    StageFont,
    Execute,
    Collect,
    Done,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::FetchCore => write!(f, "fetch-core"),
            Self::LoadEngine => write!(f, "load-engine"),
            Self::StageInputs => write!(f, "stage-inputs"),
            Self::StageFont => write!(f, "stage-font"),
            Self::Execute => write!(f, "execute"),
            Self::Collect => write!(f, "collect"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Short status strings emitted at phase transitions for the UI layer.
///
/// The display forms are stable: existing UI translation tables key off
/// these exact strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tip {
    /// Engine acquisition is starting.
    LoadingEngine,
    /// The JS glue module finished downloading.
    CoreJsLoaded,
    /// The wasm binary finished downloading.
    WasmLoaded,
    /// Video and subtitle bytes are being staged.
    WritingInputs,
    /// The burn command is running.
    Executing,
    /// The job failed; no output will be produced.
    Failed,
}

impl fmt::Display for Tip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadingEngine => write!(f, "loading ffmpeg"),
            Self::CoreJsLoaded => write!(f, "ffmpeg core js loaded"),
            Self::WasmLoaded => write!(f, "ffmpeg wasm loaded"),
            Self::WritingInputs => write!(f, "writing video and subtitle to ffmpeg"),
            Self::Executing => write!(f, "executing ffmpeg"),
            Self::Failed => write!(f, "failed to burn subtitles"),
        }
    }
}
