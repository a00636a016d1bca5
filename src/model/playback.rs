//! Now-playing values derived from the store for rendering

use super::duration::format_duration;
use super::store::DeviceStateStore;
use super::sync_state::SyncState;
use super::types::{TransportState, Volume};

/// Complete playback information for rendering the UI
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackInfo {
    pub title: String,
    pub creator: String,
    pub album: String,
    /// `"<track>/<queue size>"`
    pub track_label: String,
    pub duration: String,
    pub elapsed: String,
    pub remaining: String,
    /// Fraction of the track played, in `0.0..=1.0`
    pub progress_ratio: f64,
    pub transport: TransportState,
    pub volume: Option<Volume>,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            title: "No track playing".to_string(),
            creator: String::new(),
            album: String::new(),
            track_label: String::new(),
            duration: format_duration(0.0),
            elapsed: format_duration(0.0),
            remaining: format_duration(0.0),
            progress_ratio: 0.0,
            transport: TransportState::Other,
            volume: None,
        }
    }
}

impl PlaybackInfo {
    pub fn derive(store: &DeviceStateStore, sync: &SyncState) -> Self {
        let mut info = Self {
            transport: store.transport_state(),
            volume: store.volume(),
            ..Self::default()
        };

        if let Some(position) = store.position() {
            let remaining = (position.track_duration - position.rel_time).max(0.0);
            info.title = position.title.clone();
            info.creator = position.creator.clone();
            info.album = position.album.clone();
            info.track_label = format!("{}/{}", position.track, sync.last_queue_size);
            info.duration = format_duration(position.track_duration);
            info.elapsed = format_duration(position.rel_time);
            info.remaining = format_duration(remaining);
            info.progress_ratio = if position.track_duration > 0.0 {
                (position.rel_time / position.track_duration).clamp(0.0, 1.0)
            } else {
                0.0
            };
        }

        info
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }
}
