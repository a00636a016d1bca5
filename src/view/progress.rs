//! Now-playing panel with progress gauge

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::{PlaybackInfo, TransportState};

pub fn render_progress_bar(
    frame: &mut Frame,
    area: Rect,
    playback: &PlaybackInfo,
) {
    let icon = if playback.is_playing() { "▶" } else { "⏸" };

    let mut status_text = format!(" {} {}", icon, playback.title);
    if !playback.creator.is_empty() {
        status_text.push_str(&format!(" | {}", playback.creator));
    }
    if !playback.album.is_empty() {
        status_text.push_str(&format!(" ({})", playback.album));
    }

    let transport_text = match playback.transport {
        TransportState::Playing => "Playing",
        TransportState::Paused => "Paused",
        TransportState::Stopped => "Stopped",
        TransportState::Other => "Unknown",
    };
    let volume_text = match playback.volume {
        Some(volume) => format!("Vol: {}", volume),
        None => "Vol: -".to_string(),
    };
    let track_text = if playback.track_label.is_empty() {
        "Track: -".to_string()
    } else {
        format!("Track: {}", playback.track_label)
    };

    let time_str = format!(
        "{} / {} (-{})",
        playback.elapsed, playback.duration, playback.remaining
    );

    let title = format!("{} ", status_text);
    let controls_info = format!(" {} | {} | {} ", track_text, transport_text, volume_text);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(playback.progress_ratio)
        .label(time_str);

    frame.render_widget(gauge, area);
}
