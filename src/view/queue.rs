//! Queue table rendering
//!
//! Rows come from the rotated [`QueueWindow`], so the first row is always the
//! track the device is playing.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding},
    Frame,
};

use crate::model::{ActiveSection, QueueRow, QueueWindow, UiState};
use super::utils::{calculate_queue_column_widths, render_scrollable_list, truncate_string};

pub fn render_queue(frame: &mut Frame, area: Rect, window: &QueueWindow, ui_state: &UiState) {
    let is_focused = ui_state.active_section == ActiveSection::Queue;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let content_width = area.width.saturating_sub(4) as usize;
    let mut list_items = render_queue_items(window.rows(), ui_state.queue_selected, is_focused, content_width);

    if window.is_empty() {
        list_items.push(
            ListItem::new("       Queue is empty")
                .style(Style::default().fg(Color::DarkGray))
        );
    }

    let queue_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Queue ({}) ", window.len()))
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    // +1 for the header row
    render_scrollable_list(frame, area, list_items, ui_state.queue_selected + 1, queue_block);
}

fn render_queue_items(
    rows: &[QueueRow],
    selected_index: usize,
    is_focused: bool,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    let (num_width, creator_width, album_width, title_width) =
        calculate_queue_column_widths(content_width, rows.len());

    let mut items: Vec<ListItem<'static>> = vec![
        ListItem::new(format!(
            " {:<num_width$}   {:<creator_width$}   {:<album_width$}   {:<title_width$}",
            "#", "Artist", "Album", "Title",
        ))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    ];

    let row_items = rows.iter().enumerate().map(|(i, row)| {
        let is_now_playing = row.display_position == 1;
        let style = if i == selected_index && is_focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if is_now_playing {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if i == selected_index {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let playing_indicator = if is_now_playing { "▶" } else { " " };
        let track_num = format!("{}{:<num_width$}", playing_indicator, row.display_position);

        ListItem::new(format!(
            "{}   {}   {}   {}",
            track_num,
            truncate_string(&row.track.creator, creator_width),
            truncate_string(&row.track.album, album_width),
            truncate_string(&row.track.title, title_width),
        ))
        .style(style)
    });

    items.extend(row_items);
    items
}
