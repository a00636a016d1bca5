//! Core type definitions for device state and UI state

use serde::Deserialize;

/// Which pane of the UI currently receives navigation keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Queue,
    Library,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Queue => ActiveSection::Library,
            ActiveSection::Library => ActiveSection::Queue,
        }
    }
}

/// One entry of the play queue, as delivered by `get-queue-contents`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackInfo {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "ParentID")]
    pub parent_id: String,
    #[serde(rename = "TrackURI")]
    pub uri: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "Creator")]
    pub creator: String,
    #[serde(rename = "Album")]
    pub album: String,
}

/// A node of the library taxonomy (genre, artist, album or track)
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LibraryNode {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "Creator")]
    pub creator: String,
}

impl LibraryNode {
    /// Containers can be opened to reveal further nodes; items are leaves.
    pub fn is_container(&self) -> bool {
        self.class.starts_with("object.container")
    }
}

/// Playback position, as delivered by `get-position-info`
///
/// Times are in seconds. `track` is 1-based.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PositionInfo {
    #[serde(rename = "Track")]
    pub track: u32,
    #[serde(rename = "TrackDuration")]
    pub track_duration: f64,
    #[serde(rename = "RelTime")]
    pub rel_time: f64,
    #[serde(rename = "TrackURI")]
    pub uri: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Creator")]
    pub creator: String,
    #[serde(rename = "Album")]
    pub album: String,
}

impl PositionInfo {
    /// 0-based queue index of the current track, if the device reported one.
    pub fn queue_index(&self) -> Option<usize> {
        (self.track as usize).checked_sub(1)
    }
}

/// Raw transport info, as delivered by `get-transport-info`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportInfo {
    #[serde(rename = "CurrentTransportState")]
    pub current_transport_state: String,
    #[serde(rename = "CurrentTransportStatus")]
    pub current_transport_status: String,
    #[serde(rename = "CurrentSpeed")]
    pub current_speed: String,
}

/// Transport state of the device
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportState {
    Stopped,
    Paused,
    Playing,
    #[default]
    Other,
}

impl TransportState {
    pub fn from_device(state: &str) -> Self {
        match state {
            "STOPPED" => TransportState::Stopped,
            "PAUSED_PLAYBACK" => TransportState::Paused,
            "PLAYING" => TransportState::Playing,
            _ => TransportState::Other,
        }
    }

    pub fn is_playing(self) -> bool {
        self == TransportState::Playing
    }
}

impl From<&TransportInfo> for TransportState {
    fn from(info: &TransportInfo) -> Self {
        TransportState::from_device(&info.current_transport_state)
    }
}

/// Device volume, in the device's own range
pub type Volume = u16;

/// Selection state of the terminal UI
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    /// Index into the rendered queue rows, not into the device queue
    pub queue_selected: usize,
    pub show_help_popup: bool,
}
