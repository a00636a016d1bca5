//! Key event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::gateway::Transport;
use crate::model::ActiveSection;

use super::SyncLoop;

impl<T: Transport + 'static> SyncLoop<T> {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.ui.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?')) {
                self.toggle_help_popup();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.set_should_quit(true),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.set_should_quit(true)
            }
            KeyCode::Char('h') | KeyCode::Char('?') => self.toggle_help_popup(),
            KeyCode::Esc => self.dismiss_error(),
            KeyCode::Tab | KeyCode::BackTab => self.cycle_section(),
            KeyCode::Up => self.move_selection_up(),
            KeyCode::Down => self.move_selection_down(),
            KeyCode::Char(' ') => self.toggle_playback(),
            KeyCode::Char('s') => self.stop(),
            KeyCode::Char('n') => self.next_track(),
            KeyCode::Char('p') => self.previous_track(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.volume_up(),
            KeyCode::Char('-') => self.volume_down(),
            KeyCode::Char('r') => self.reload_library(),
            KeyCode::Enter => match self.ui.active_section {
                ActiveSection::Queue => {
                    if let Some(position) = self.selected_display_position() {
                        self.jump_to_track(position);
                    }
                }
                ActiveSection::Library => self.open_library_node(),
            },
            KeyCode::Char('d') | KeyCode::Delete => {
                if self.ui.active_section == ActiveSection::Queue {
                    if let Some(position) = self.selected_display_position() {
                        self.remove_track(position);
                    }
                }
            }
            KeyCode::Backspace => {
                if self.ui.active_section == ActiveSection::Library {
                    self.library_back();
                }
            }
            _ => {}
        }
    }
}
