//! Blob types that flow between the orchestrator and the engine boundary.

use bytes::Bytes;

/// An opaque named binary blob supplied by the caller (video or subtitle).
///
/// Content is never inspected; the name is used verbatim as the virtual
/// filesystem path when the blob is staged into the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// File name including extension, e.g. `clip.mp4`.
    pub name: String,
    /// Raw file content.
    pub bytes: Bytes,
}

impl MediaFile {
    /// Create a media file from a name and raw bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Byte length of the content.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// An in-memory fetched resource tagged with its MIME type.
///
/// The Rust analogue of a blob URL: a temporary in-memory reference usable
/// wherever the engine expects a network resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Raw resource content.
    pub bytes: Bytes,
    /// MIME type, e.g. `application/wasm`.
    pub mime: String,
}

impl Blob {
    /// Create a blob from raw bytes and a MIME type.
    pub fn new(bytes: impl Into<Bytes>, mime: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime: mime.into(),
        }
    }
}

/// The product of a successful burn job: the output blob plus the download
/// name and MIME type derived from the input video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Download name, `<video-stem>-burned.<video-ext>`.
    pub name: String,
    /// MIME type, `video/<video-ext>`.
    pub mime: String,
    /// Burned video content.
    pub bytes: Bytes,
}
