//! Utility functions for rendering UI components

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Calculate width needed for index column (log10(n) + padding)
pub fn calculate_num_width(item_count: usize) -> usize {
    if item_count == 0 {
        2
    } else {
        let digits = (item_count as f64).log10().floor() as usize + 1;
        digits + 1
    }
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    // No room for an ellipsis
    if max_width < 3 {
        let clipped: String = s.chars().take(max_width).collect();
        return format!("{:<width$}", clipped, width = max_width);
    }
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// Column widths for queue rows
/// Returns (num_width, creator_width, album_width, title_width)
pub fn calculate_queue_column_widths(content_width: usize, item_count: usize) -> (usize, usize, usize, usize) {
    // Format: " {num}   {creator}   {album}   {title}"
    let num_width = calculate_num_width(item_count);
    let fixed_width = 1 + num_width + 3 + 3 + 3;
    let remaining_width = content_width.saturating_sub(fixed_width);
    let creator_width = (remaining_width * 25) / 100;
    let album_width = (remaining_width * 30) / 100;
    let title_width = remaining_width.saturating_sub(creator_width + album_width);

    (num_width, creator_width, album_width, title_width)
}
