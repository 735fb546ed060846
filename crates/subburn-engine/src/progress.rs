//! Parser for the engine's diagnostic stream.
//!
//! The engine core reports the source duration in its log banner
//! (`Duration: HH:MM:SS.cc, ...`) and, when run with `-progress`, emits
//! key/value blocks terminated by a `progress=` line. [`ProgressParser`]
//! folds both into encode-completion fractions.

/// Incremental line parser producing `0.0..1.0` progress fractions.
///
/// Feed every diagnostic line to [`push`](ProgressParser::push); it returns
/// `Some(fraction)` at the end of each progress block once the source
/// duration is known, and `Some(1.0)` on the terminal block. Fractions are
/// not clamped; the engine may briefly over-report when the duration banner
/// under-states the stream length.
#[derive(Debug, Default)]
pub struct ProgressParser {
    duration_secs: Option<f64>,
    out_time_us: Option<i64>,
}

impl ProgressParser {
    /// Create a parser with no known duration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one diagnostic line, returning a fraction when a progress
    /// block completes.
    pub fn push(&mut self, line: &str) -> Option<f64> {
        let trimmed = line.trim_start();

        if let Some(rest) = trimmed.strip_prefix("Duration:") {
            // Only the first banner counts; later inputs (e.g. the subtitle
            // stream) would otherwise overwrite the video duration.
            if self.duration_secs.is_none() {
                self.duration_secs = parse_timestamp(rest.split(',').next().unwrap_or(""));
            }
        } else if let Some(val) = trimmed.strip_prefix("out_time_us=") {
            self.out_time_us = val.trim().parse::<i64>().ok();
        } else if let Some(state) = trimmed.strip_prefix("progress=") {
            if state.trim() == "end" {
                return Some(1.0);
            }
            if let (Some(out_us), Some(dur)) = (self.out_time_us, self.duration_secs) {
                if dur > 0.0 {
                    return Some(out_us as f64 / 1_000_000.0 / dur);
                }
            }
        }

        None
    }
}

/// Parse an `HH:MM:SS.cc` timestamp into seconds.
fn parse_timestamp(s: &str) -> Option<f64> {
    let mut parts = s.trim().split(':');
    let hours = parts.next()?.parse::<f64>().ok()?;
    let minutes = parts.next()?.parse::<f64>().ok()?;
    let seconds = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}
