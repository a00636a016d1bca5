//! Model module - Device state and derived display data
//!
//! This module contains the data structures the sync loop keeps up to date.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Wire types and small enums (tracks, position, transport)
//! - `store`: Last-known device snapshot and the last-error slot
//! - `sync_state`: Poll counter and queue anchor
//! - `queue_window`: Rotated queue display anchored at the playing track
//! - `duration`: `HhMmSs` formatting
//! - `playback`: Now-playing values derived for rendering
//! - `library`: Library taxonomy browser state

mod types;
mod store;
mod sync_state;
mod queue_window;
mod duration;
mod playback;
mod library;

pub use types::{
    ActiveSection, LibraryNode, PositionInfo, TrackInfo, TransportInfo, TransportState,
    UiState, Volume,
};

pub use store::DeviceStateStore;
pub use sync_state::SyncState;
pub use queue_window::{QueueRow, QueueWindow};
pub use playback::PlaybackInfo;
pub use library::LibraryBrowser;
