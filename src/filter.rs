//! Burn-command argv construction.

use subburn_core::BurnConfig;

/// Build the argv for one burn command.
///
/// Both inputs are passed as `-i` flags; the burn happens in the `-vf`
/// subtitle filter, which references the staged subtitle by its virtual
/// filesystem name, scans `fonts_dir` for the staged font, and forces the
/// configured style onto every line. The output name is the trailing token.
pub fn burn_args(
    video_name: &str,
    subtitle_name: &str,
    output_name: &str,
    config: &BurnConfig,
) -> Vec<String> {
    let filter = format!(
        "subtitles={}:fontsdir={}:force_style='{}'",
        subtitle_name,
        config.fonts_dir,
        config.style.force_style(),
    );

    vec![
        "-i".to_string(),
        video_name.to_string(),
        "-i".to_string(),
        subtitle_name.to_string(),
        "-vf".to_string(),
        filter,
        output_name.to_string(),
    ]
}
