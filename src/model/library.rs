//! Library taxonomy browser (genre → artist → album → track)

use super::types::LibraryNode;

/// One column of the browser
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LibraryLevel {
    pub title: String,
    pub nodes: Vec<LibraryNode>,
    pub selected: usize,
}

impl LibraryLevel {
    fn new(title: impl Into<String>, nodes: Vec<LibraryNode>) -> Self {
        Self {
            title: title.into(),
            nodes,
            selected: 0,
        }
    }

    pub fn selected_node(&self) -> Option<&LibraryNode> {
        self.nodes.get(self.selected)
    }
}

/// Stack of opened library levels; the root is the genre list
#[derive(Clone, Debug, Default)]
pub struct LibraryBrowser {
    levels: Vec<LibraryLevel>,
}

impl LibraryBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole browser with a fresh genre list.
    pub fn set_genres(&mut self, genres: Vec<LibraryNode>) {
        self.levels = vec![LibraryLevel::new("Genres", genres)];
    }

    /// Show `children` one level below `parent_depth`, dropping anything deeper.
    pub fn set_children(&mut self, parent_depth: usize, title: String, children: Vec<LibraryNode>) {
        if parent_depth >= self.levels.len() {
            tracing::debug!(parent_depth, "Ignoring children for a level that is no longer open");
            return;
        }
        self.levels.truncate(parent_depth + 1);
        self.levels.push(LibraryLevel::new(title, children));
    }

    /// Close the deepest level. The genre list is never closed.
    pub fn back(&mut self) -> bool {
        if self.levels.len() > 1 {
            self.levels.pop();
            true
        } else {
            false
        }
    }

    pub fn levels(&self) -> &[LibraryLevel] {
        &self.levels
    }

    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    pub fn current(&self) -> Option<&LibraryLevel> {
        self.levels.last()
    }

    pub fn move_up(&mut self) {
        if let Some(level) = self.levels.last_mut() {
            level.selected = level.selected.saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        if let Some(level) = self.levels.last_mut() {
            if level.selected + 1 < level.nodes.len() {
                level.selected += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, container: bool) -> LibraryNode {
        LibraryNode {
            id: id.to_string(),
            title: id.to_string(),
            class: if container {
                "object.container".to_string()
            } else {
                "object.item.audioItem.musicTrack".to_string()
            },
            ..Default::default()
        }
    }

    #[test]
    fn descend_and_back() {
        let mut browser = LibraryBrowser::new();
        browser.set_genres(vec![node("Jazz", true), node("Rock", true)]);
        browser.move_down();
        assert_eq!(browser.current().and_then(|l| l.selected_node()).map(|n| n.id.as_str()), Some("Rock"));

        browser.set_children(0, "Rock".to_string(), vec![node("Artist", true)]);
        assert_eq!(browser.depth(), 1);
        assert_eq!(browser.current().map(|l| l.title.as_str()), Some("Rock"));

        assert!(browser.back());
        assert!(!browser.back());
        assert_eq!(browser.current().map(|l| l.selected), Some(1));
    }

    #[test]
    fn opening_a_shallower_node_drops_deeper_levels() {
        let mut browser = LibraryBrowser::new();
        browser.set_genres(vec![node("Jazz", true)]);
        browser.set_children(0, "Jazz".to_string(), vec![node("Miles", true)]);
        browser.set_children(1, "Miles".to_string(), vec![node("Kind of Blue", true)]);
        browser.set_children(0, "Jazz".to_string(), vec![node("Coltrane", true)]);
        assert_eq!(browser.levels().len(), 2);
        assert_eq!(browser.levels()[1].nodes[0].id, "Coltrane");
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut browser = LibraryBrowser::new();
        browser.move_down();
        browser.set_genres(vec![node("Jazz", true)]);
        browser.move_down();
        browser.move_up();
        browser.move_up();
        assert_eq!(browser.current().map(|l| l.selected), Some(0));
    }
}
