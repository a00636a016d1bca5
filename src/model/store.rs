//! Last-known snapshot of the device's state
//!
//! Each `apply_*` takes the reply of one request. A failed reply records its
//! message in the last-error slot and leaves the previous value untouched; a
//! successful reply replaces the whole field at once.

use super::sync_state::SyncState;
use super::types::{PositionInfo, TrackInfo, TransportInfo, TransportState, Volume};
use crate::error::{GatewayError, Reply};

/// The single last-error display slot
#[derive(Clone, Debug, Default)]
struct ErrorSlot {
    message: Option<String>,
    recorded_in: u64,
}

#[derive(Clone, Debug, Default)]
pub struct DeviceStateStore {
    volume: Option<Volume>,
    transport_info: Option<TransportInfo>,
    position: Option<PositionInfo>,
    queue: Vec<TrackInfo>,
    error: ErrorSlot,
    /// Last batch id handed out
    last_batch: u64,
    /// Batch the replies being applied belong to
    applying: u64,
}

impl DeviceStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Error slot
    // ========================================================================

    /// Start a new group of requests (one tick, or one user command) and
    /// return its id. Replies applied afterwards belong to it until
    /// [`enter_batch`](Self::enter_batch) says otherwise.
    ///
    /// Successes only clear errors recorded by an earlier group.
    pub fn begin_batch(&mut self) -> u64 {
        self.last_batch += 1;
        self.applying = self.last_batch;
        self.last_batch
    }

    /// Attribute the replies applied next to `batch`. Replies of several
    /// batches may be in flight at once and land in any order.
    pub fn enter_batch(&mut self, batch: u64) {
        self.applying = batch;
    }

    pub fn set_error(&mut self, message: String) {
        self.error = ErrorSlot {
            message: Some(message),
            recorded_in: self.applying,
        };
    }

    pub fn clear_error(&mut self) {
        self.error = ErrorSlot::default();
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.message.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.message.is_some()
    }

    fn record_success(&mut self) {
        if self.error.message.is_some() && self.error.recorded_in < self.applying {
            self.clear_error();
        }
    }

    fn record_failure(&mut self, method: &str, error: &GatewayError) {
        tracing::warn!(method, error = %error, "Device request failed");
        self.set_error(error.to_string());
    }

    /// Route a reply through the error slot and hand back its value, if any.
    pub fn settle<T>(&mut self, method: &str, reply: Reply<T>) -> Option<T> {
        match reply {
            Ok(value) => {
                self.record_success();
                value
            }
            Err(e) => {
                self.record_failure(method, &e);
                None
            }
        }
    }

    /// Route the outcome of a command that carries no useful value.
    pub fn settle_command(&mut self, method: &str, result: &Result<(), GatewayError>) -> bool {
        match result {
            Ok(()) => {
                self.record_success();
                true
            }
            Err(e) => {
                self.record_failure(method, e);
                false
            }
        }
    }

    // ========================================================================
    // Device state
    // ========================================================================

    pub fn apply_volume(&mut self, reply: Reply<Volume>) {
        if let Some(volume) = self.settle("get-volume", reply) {
            self.volume = Some(volume);
        }
    }

    /// Also moves the queue anchor to the reported track.
    pub fn apply_position_info(&mut self, reply: Reply<PositionInfo>, sync: &mut SyncState) {
        if let Some(position) = self.settle("get-position-info", reply) {
            sync.current_track_index = position.queue_index().unwrap_or(0);
            self.position = Some(position);
        }
    }

    pub fn apply_transport_info(&mut self, reply: Reply<TransportInfo>) {
        if let Some(info) = self.settle("get-transport-info", reply) {
            self.transport_info = Some(info);
        }
    }

    pub fn apply_queue(&mut self, reply: Reply<Vec<TrackInfo>>, sync: &mut SyncState) {
        if let Some(queue) = self.settle("get-queue-contents", reply) {
            sync.last_queue_size = queue.len();
            self.queue = queue;
        }
    }

    pub fn volume(&self) -> Option<Volume> {
        self.volume
    }

    pub fn transport_state(&self) -> TransportState {
        self.transport_info
            .as_ref()
            .map(TransportState::from)
            .unwrap_or_default()
    }

    pub fn is_playing(&self) -> bool {
        self.transport_state().is_playing()
    }

    pub fn position(&self) -> Option<&PositionInfo> {
        self.position.as_ref()
    }

    pub fn queue(&self) -> &[TrackInfo] {
        &self.queue
    }
}
