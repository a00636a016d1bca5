//! User commands: queue jumps and removals, volume, transport

use crate::gateway::{Command, Transport};
use crate::model::Volume;

use super::SyncLoop;
use super::refresh::RefreshPlan;

/// Upper bound of the volume slider
const MAX_VOLUME: Volume = 100;

impl<T: Transport + 'static> SyncLoop<T> {
    /// Jump to the track shown at `display_position` (1-based) in the last
    /// rendered queue window.
    pub fn jump_to_track(&mut self, display_position: usize) {
        let Some(row) = self.window.row(display_position) else {
            tracing::warn!(display_position, rows = self.window.len(), "No queue row to jump to");
            return;
        };
        let track_number = row.track_number();
        tracing::debug!(display_position, track_number, "Jumping to queue entry");

        self.run_command(Command::seek_track(track_number), RefreshPlan::after_command(false));
    }

    /// Remove the track shown at `display_position` (1-based) in the last
    /// rendered queue window.
    pub fn remove_track(&mut self, display_position: usize) {
        let Some(row) = self.window.row(display_position) else {
            tracing::warn!(display_position, rows = self.window.len(), "No queue row to remove");
            return;
        };
        let track_number = row.track_number();
        tracing::debug!(display_position, track_number, title = %row.track.title, "Removing queue entry");

        self.run_command(
            Command::remove_track_from_queue(track_number),
            RefreshPlan::after_command(true),
        );
    }

    pub fn set_volume(&mut self, value: Volume) {
        self.run_command(Command::set_volume(value), RefreshPlan::after_command(false));
    }

    pub fn volume_up(&mut self) {
        let current = self.store.volume().unwrap_or(0);
        let new_volume = current.saturating_add(self.settings.volume_step).min(MAX_VOLUME);
        self.set_volume(new_volume);
    }

    pub fn volume_down(&mut self) {
        let current = self.store.volume().unwrap_or(0);
        let new_volume = current.saturating_sub(self.settings.volume_step);
        self.set_volume(new_volume);
    }

    /// Pause when the device is playing, otherwise play.
    pub fn toggle_playback(&mut self) {
        let is_playing = self.store.is_playing();
        tracing::debug!(is_playing, "Toggling playback");

        let command = if is_playing { Command::pause() } else { Command::play() };
        self.run_command(command, RefreshPlan::after_command(false));
    }

    pub fn stop(&mut self) {
        self.run_command(Command::stop(), RefreshPlan::after_command(false));
    }

    pub fn next_track(&mut self) {
        self.run_command(Command::next(), RefreshPlan::after_command(false));
    }

    pub fn previous_track(&mut self) {
        self.run_command(Command::previous(), RefreshPlan::after_command(false));
    }

    /// Dispatch a command; once the device accepts it the regular refresh
    /// path runs so the display matches what the next poll would show.
    fn run_command(&mut self, command: Command, plan: RefreshPlan) {
        tracing::debug!(method = command.method, "Sending command");
        self.send_command(command, plan);
    }
}
