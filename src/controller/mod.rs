//! Controller module - The sync loop and everything that drives it
//!
//! `SyncLoop` owns the device snapshot, the polling state, the last rendered
//! queue window and the requests still in flight. Operations only dispatch
//! requests; replies are applied one at a time as the caller drives
//! [`SyncLoop::next_reply`]. It is organized into submodules by responsibility:
//!
//! - `refresh`: Dispatching requests, timer ticks and applying replies
//! - `playback`: User commands (jump, remove, volume, transport)
//! - `navigation`: Selection movement and library browsing
//! - `input`: Key event handling

mod refresh;
mod playback;
mod navigation;
mod input;

use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;

use crate::config::Config;
use crate::gateway::CommandGateway;
use crate::model::{
    DeviceStateStore, LibraryBrowser, PlaybackInfo, QueueWindow, SyncState, UiState,
};

/// Lifecycle of the loop. There is no terminal state: the session ends by
/// no longer calling [`SyncLoop::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncPhase {
    /// Nothing fetched yet
    Idle,
    /// Initial refresh done; ticks are accepted
    Polling,
}

/// Tunables for polling and commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncSettings {
    pub poll_interval: Duration,
    /// Fetch the queue on every k-th tick
    pub queue_refresh_every: u64,
    pub volume_step: u16,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            queue_refresh_every: 5,
            volume_step: 5,
        }
    }
}

impl From<&Config> for SyncSettings {
    fn from(config: &Config) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.sync.poll_interval_ms.max(1)),
            queue_refresh_every: config.sync.queue_refresh_every.max(1),
            volume_step: config.ui.volume_step,
        }
    }
}

pub use refresh::Completion;

pub struct SyncLoop<T> {
    gateway: Rc<CommandGateway<T>>,
    /// Dispatched requests whose replies have not been applied yet
    pending: FuturesUnordered<LocalBoxFuture<'static, Completion>>,
    store: DeviceStateStore,
    sync: SyncState,
    library: LibraryBrowser,
    ui: UiState,
    window: QueueWindow,
    phase: SyncPhase,
    settings: SyncSettings,
    should_quit: bool,
}

impl<T> SyncLoop<T> {
    pub fn new(gateway: CommandGateway<T>, settings: SyncSettings) -> Self {
        Self {
            gateway: Rc::new(gateway),
            pending: FuturesUnordered::new(),
            store: DeviceStateStore::new(),
            sync: SyncState::default(),
            library: LibraryBrowser::new(),
            ui: UiState::default(),
            window: QueueWindow::default(),
            phase: SyncPhase::Idle,
            settings,
            should_quit: false,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    pub fn store(&self) -> &DeviceStateStore {
        &self.store
    }

    pub fn sync_state(&self) -> &SyncState {
        &self.sync
    }

    /// The queue rows as last rendered; user commands resolve against this.
    pub fn window(&self) -> &QueueWindow {
        &self.window
    }

    pub fn library(&self) -> &LibraryBrowser {
        &self.library
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui
    }

    pub fn playback_info(&self) -> PlaybackInfo {
        PlaybackInfo::derive(&self.store, &self.sync)
    }

    /// Number of requests whose replies have not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }

    /// Re-derive the queue window from the current queue and anchor.
    ///
    /// The selection follows the track it was on, not the screen row.
    fn rerender_queue(&mut self) {
        let selected_absolute = self
            .window
            .rows()
            .get(self.ui.queue_selected)
            .map(|row| row.absolute_index);

        self.window = QueueWindow::render(self.store.queue(), self.sync.current_track_index);

        self.ui.queue_selected = selected_absolute
            .and_then(|abs| {
                self.window
                    .rows()
                    .iter()
                    .position(|row| row.absolute_index == abs)
            })
            .unwrap_or(0)
            .min(self.window.len().saturating_sub(1));
    }
}
