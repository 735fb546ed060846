//! Subburn - burn subtitles permanently into a video.
//!
//! The heavy lifting is delegated to an external transcoding engine fetched
//! on demand; this crate is the orchestration layer around it: engine
//! lifecycle, virtual-filesystem staging, command construction, progress
//! reporting, and failure recovery, all as one strictly sequential
//! asynchronous pipeline per job.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use subburn::{BurnConfig, Burner, MediaFile};
//! # use subburn::{BurnObserver, Tip};
//! # struct Quiet;
//! # impl BurnObserver for Quiet {
//! #     fn on_progress(&self, _percent: f64) {}
//! #     fn on_tip(&self, _tip: Tip) {}
//! # }
//!
//! # async fn example() {
//! let burner = Burner::new(BurnConfig::default());
//! let video = MediaFile::new("clip.mp4", std::fs::read("clip.mp4").unwrap());
//! let subtitle = MediaFile::new("sub.srt", std::fs::read("sub.srt").unwrap());
//!
//! if let Some(output) = burner.burn(&video, &subtitle, Arc::new(Quiet)).await {
//!     std::fs::write(&output.name, &output.bytes).unwrap();
//! }
//! # }
//! ```

pub mod burn;
pub mod filter;
pub mod naming;
pub mod tip;

pub use burn::{BurnObserver, Burner};
pub use tip::{Phase, Tip};

// Re-export the foundation and engine boundary for callers and tests.
pub use subburn_core::{Blob, BurnConfig, Error, MediaFile, OutputFile, Result, SubtitleStyle};
pub use subburn_engine::{ArtifactFetcher, CoreArtifacts, Engine, EngineSink, ProcessEngine};
