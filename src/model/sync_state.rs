//! Polling bookkeeping owned by the sync loop

/// State that drives queue windowing and poll throttling.
///
/// It has no counterpart on the device.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncState {
    /// 0-based queue index of the current track
    pub current_track_index: usize,
    /// Length of the queue at the last successful queue fetch
    pub last_queue_size: usize,
    /// Timer ticks since polling started
    pub poll_count: u64,
}

impl SyncState {
    /// Advance the tick counter and report whether this tick also fetches the queue.
    pub fn advance(&mut self, queue_refresh_every: u64) -> bool {
        self.poll_count += 1;
        self.poll_count % queue_refresh_every.max(1) == 0
    }
}
