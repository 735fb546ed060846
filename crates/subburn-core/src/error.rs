//! Unified error type for the subburn crates.
//!
//! Every failure mode of a burn job maps onto one variant of [`Error`], so
//! callers that want to distinguish causes can match on the variant instead
//! of parsing diagnostic text.

/// Unified error type covering all failure modes of a burn job.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An HTTP fetch of an engine artifact or the font returned a
    /// non-success status or failed at the transport level.
    #[error("fetch failed [{url}]: {message}")]
    Fetch {
        /// The URL that was requested.
        url: String,
        /// Human-readable failure description.
        message: String,
    },

    /// Engine initialization rejected.
    #[error("engine load failed: {0}")]
    EngineLoad(String),

    /// Writing bytes into the engine's virtual filesystem failed.
    #[error("staging failed [{name}]: {message}")]
    Staging {
        /// The virtual filesystem path being written.
        name: String,
        /// Human-readable failure description.
        message: String,
    },

    /// The engine command exited with an error.
    #[error("execution failed: {0}")]
    Execution(String),

    /// The expected output file was absent or unreadable after execution.
    #[error("output read failed [{name}]: {message}")]
    Read {
        /// The virtual filesystem path being read.
        name: String,
        /// Human-readable failure description.
        message: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convenience constructor for [`Error::Fetch`].
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Staging`].
    pub fn staging(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Staging {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Read`].
    pub fn read(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Read {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
