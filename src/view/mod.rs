//! View module - UI rendering
//!
//! Renders what the sync loop last derived; nothing here talks to the device.
//!
//! - `utils`: Shared helpers (column widths, scrollable lists)
//! - `layout`: Library column and status line
//! - `queue`: Rotated queue table
//! - `progress`: Now-playing panel
//! - `overlays`: Help popup

mod utils;
mod layout;
mod queue;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{LibraryBrowser, PlaybackInfo, QueueWindow, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        playback: &PlaybackInfo,
        window: &QueueWindow,
        library: &LibraryBrowser,
        ui_state: &UiState,
        last_error: Option<&str>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Now playing
                Constraint::Min(0),    // Queue + library
                Constraint::Length(1), // Status / error line
            ])
            .split(frame.area());

        progress::render_progress_bar(frame, chunks[0], playback);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(65), // Queue
                Constraint::Percentage(35), // Library
            ])
            .split(chunks[1]);

        queue::render_queue(frame, main_chunks[0], window, ui_state);
        layout::render_library(frame, main_chunks[1], library, ui_state);

        layout::render_status_line(frame, chunks[2], last_error);

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
