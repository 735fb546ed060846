//! Output-name and MIME derivation from the input video name.

/// The name with its final `.<ext>` suffix removed. A name without a dot is
/// all stem.
pub fn stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// The final extension, without the dot. Empty when the name has no dot.
pub fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => "",
    }
}

/// Download name for the burned output: `<stem>-burned.<ext>`, or just
/// `<stem>-burned` when the video name carries no extension.
pub fn output_name(video_name: &str) -> String {
    let ext = extension(video_name);
    if ext.is_empty() {
        format!("{}-burned", stem(video_name))
    } else {
        format!("{}-burned.{}", stem(video_name), ext)
    }
}

/// MIME type for the burned output: `video/<ext>`, falling back to a
/// generic binary type when the video name carries no extension.
pub fn mime_type(video_name: &str) -> String {
    let ext = extension(video_name);
    if ext.is_empty() {
        "application/octet-stream".to_string()
    } else {
        format!("video/{ext}")
    }
}
