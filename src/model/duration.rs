//! Duration formatting for position and track length

/// Format seconds as `"<H>h<M>m<S>s"`.
///
/// Hours and minutes are truncated; seconds keep any fractional part of the
/// input.
pub fn format_duration(total_seconds: f64) -> String {
    let seconds = total_seconds % 60.0;
    let minutes = (total_seconds / 60.0).floor() % 60.0;
    let hours = (total_seconds / 3600.0).floor();
    format!("{}h{}m{}s", hours as u64, minutes as u64, seconds)
}
