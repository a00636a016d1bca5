//! Selection movement and library browsing

use crate::gateway::Transport;
use crate::model::ActiveSection;

use super::SyncLoop;

impl<T> SyncLoop<T> {
    pub fn cycle_section(&mut self) {
        self.ui.active_section = self.ui.active_section.next();
    }

    pub fn move_selection_up(&mut self) {
        match self.ui.active_section {
            ActiveSection::Queue => {
                self.ui.queue_selected = self.ui.queue_selected.saturating_sub(1);
            }
            ActiveSection::Library => self.library.move_up(),
        }
    }

    pub fn move_selection_down(&mut self) {
        match self.ui.active_section {
            ActiveSection::Queue => {
                if self.ui.queue_selected + 1 < self.window.len() {
                    self.ui.queue_selected += 1;
                }
            }
            ActiveSection::Library => self.library.move_down(),
        }
    }

    /// 1-based display position of the selected queue row.
    pub fn selected_display_position(&self) -> Option<usize> {
        self.window
            .rows()
            .get(self.ui.queue_selected)
            .map(|row| row.display_position)
    }

    pub fn library_back(&mut self) {
        self.library.back();
    }

    pub fn toggle_help_popup(&mut self) {
        self.ui.show_help_popup = !self.ui.show_help_popup;
    }

    pub fn dismiss_error(&mut self) {
        if self.store.has_error() {
            tracing::debug!("Error dismissed");
            self.store.clear_error();
        }
    }
}

impl<T: Transport + 'static> SyncLoop<T> {
    /// Open the selected library node; its children show up one level down
    /// once they arrive.
    pub fn open_library_node(&mut self) {
        let depth = self.library.depth();
        let Some(node) = self
            .library
            .current()
            .and_then(|level| level.selected_node())
            .cloned()
        else {
            return;
        };

        if !node.is_container() {
            tracing::debug!(id = %node.id, "Library item has no children");
            return;
        }

        tracing::debug!(id = %node.id, depth, "Opening library node");
        self.fetch_children(depth, node);
    }

    /// Fetch the genre list again, resetting the browser to its root.
    pub fn reload_library(&mut self) {
        self.fetch_genres();
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{settle, sync_loop};
    use crate::model::ActiveSection;
    use serde_json::json;

    #[tokio::test]
    async fn open_genre_requests_children_by_id() {
        let (mut sync, transport) = sync_loop();
        sync.initialize();
        settle(&mut sync).await;
        sync.cycle_section();
        assert_eq!(sync.ui_state().active_section, ActiveSection::Library);

        sync.open_library_node();
        settle(&mut sync).await;

        let sent = transport.sent("get-direct-children");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].param("root"), Some("A:GENRE/Jazz"));
        assert_eq!(sync.library().depth(), 1);
        assert_eq!(sync.library().current().unwrap().title, "Jazz");

        sync.library_back();
        assert_eq!(sync.library().depth(), 0);
    }

    #[tokio::test]
    async fn leaf_nodes_are_not_opened() {
        let (mut sync, transport) = sync_loop();
        transport.respond(
            "get-all-genres",
            json!({ "Value": [ { "ID": "T:1", "Title": "Song", "Class": "object.item.audioItem.musicTrack" } ] }),
        );
        sync.initialize();
        settle(&mut sync).await;
        sync.open_library_node();
        settle(&mut sync).await;
        assert_eq!(transport.count("get-direct-children"), 0);
    }

    #[tokio::test]
    async fn browse_failure_keeps_current_level() {
        let (mut sync, transport) = sync_loop();
        sync.initialize();
        settle(&mut sync).await;
        transport.fail("get-direct-children", "Error in call to get-direct-children: 701");

        sync.open_library_node();
        settle(&mut sync).await;
        assert_eq!(sync.library().depth(), 0);
        assert!(sync.store().has_error());
    }

    #[tokio::test]
    async fn queue_selection_is_bounded_by_window() {
        let (mut sync, _) = sync_loop();
        sync.initialize();
        settle(&mut sync).await;
        for _ in 0..10 {
            sync.move_selection_down();
        }
        assert_eq!(sync.selected_display_position(), Some(3));
        for _ in 0..10 {
            sync.move_selection_up();
        }
        assert_eq!(sync.selected_display_position(), Some(1));
    }

    #[tokio::test]
    async fn reload_library_resets_to_genres() {
        let (mut sync, transport) = sync_loop();
        sync.initialize();
        settle(&mut sync).await;
        sync.open_library_node();
        settle(&mut sync).await;
        sync.reload_library();
        settle(&mut sync).await;
        assert_eq!(sync.library().depth(), 0);
        assert_eq!(transport.count("get-all-genres"), 2);
    }

    #[tokio::test]
    async fn children_for_an_abandoned_level_are_dropped() {
        let (mut sync, transport) = sync_loop();
        sync.initialize();
        settle(&mut sync).await;

        sync.cycle_section();
        sync.open_library_node();
        settle(&mut sync).await;
        assert_eq!(sync.library().depth(), 1);

        // Open the artist, then go back to the genres before the reply lands.
        sync.open_library_node();
        sync.library_back();
        settle(&mut sync).await;

        assert_eq!(transport.count("get-direct-children"), 2);
        assert_eq!(sync.library().depth(), 0);
        assert_eq!(sync.library().current().unwrap().title, "Genres");
    }

    #[tokio::test]
    async fn dismiss_clears_error() {
        let (mut sync, transport) = sync_loop();
        transport.fail("get-volume", "boom");
        sync.initialize();
        settle(&mut sync).await;
        sync.dismiss_error();
        assert!(!sync.store().has_error());
    }
}
