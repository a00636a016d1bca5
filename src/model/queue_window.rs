//! Rotated queue view anchored at the currently playing track
//!
//! The device reports the absolute index of the current track. The queue is
//! displayed starting from that track and wrapping around, so the rows shown
//! are a rotation of the device queue. Each row remembers its absolute index
//! so that jump and remove commands address the right device position.

use super::types::TrackInfo;

/// One displayed queue row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueRow {
    /// 1-based position in the rotated display; 1 is the anchor track
    pub display_position: usize,
    /// 0-based position in the device queue
    pub absolute_index: usize,
    pub track: TrackInfo,
}

impl QueueRow {
    /// The device's 1-based queue position for this row.
    pub fn track_number(&self) -> u32 {
        (self.absolute_index + 1) as u32
    }
}

/// The last rendered queue display and its mapping back to device positions
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueWindow {
    rows: Vec<QueueRow>,
}

impl QueueWindow {
    /// Render `queue` rotated so that `anchor` comes first.
    ///
    /// An anchor past the end (the queue shrank since the index was
    /// reported) falls back to the identity order.
    pub fn render(queue: &[TrackInfo], anchor: usize) -> Self {
        let anchor = if anchor < queue.len() { anchor } else { 0 };

        let rows = (anchor..queue.len())
            .chain(0..anchor)
            .enumerate()
            .map(|(rank, absolute_index)| QueueRow {
                display_position: rank + 1,
                absolute_index,
                track: queue[absolute_index].clone(),
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[QueueRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row shown at a 1-based display position.
    pub fn row(&self, display_position: usize) -> Option<&QueueRow> {
        display_position
            .checked_sub(1)
            .and_then(|rank| self.rows.get(rank))
    }
}
