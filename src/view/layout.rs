//! Layout rendering (library column, status line)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, LibraryBrowser, UiState};
use super::utils::render_scrollable_list;

pub fn render_library(frame: &mut Frame, area: Rect, library: &LibraryBrowser, ui_state: &UiState) {
    let is_focused = ui_state.active_section == ActiveSection::Library;

    let breadcrumb = library
        .levels()
        .iter()
        .map(|level| level.title.as_str())
        .collect::<Vec<_>>()
        .join(" › ");

    let (items, selected): (Vec<ListItem>, usize) = match library.current() {
        Some(level) if !level.nodes.is_empty() => {
            let items = level
                .nodes
                .iter()
                .enumerate()
                .map(|(i, node)| {
                    let style = if i == level.selected && is_focused {
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD)
                    } else if i == level.selected {
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    let marker = if node.is_container() { "▸ " } else { "  " };
                    ListItem::new(format!("{}{}", marker, node.title)).style(style)
                })
                .collect();
            (items, level.selected)
        }
        Some(_) => (
            vec![ListItem::new("Nothing here").style(Style::default().fg(Color::DarkGray))],
            0,
        ),
        None => (
            vec![ListItem::new("Loading...").style(Style::default().fg(Color::DarkGray))],
            0,
        ),
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let title = if breadcrumb.is_empty() {
        " Library ".to_string()
    } else {
        format!(" {} ", breadcrumb)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    render_scrollable_list(frame, area, items, selected, block);
}

/// Bottom line: the last device error if there is one, otherwise a key hint
pub fn render_status_line(frame: &mut Frame, area: Rect, last_error: Option<&str>) {
    let line = match last_error {
        Some(message) => Line::from(vec![
            Span::styled(
                " Error: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(message.to_string(), Style::default().fg(Color::Red)),
            Span::styled("  (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(
            " Space play/pause · n/p next/prev · +/- volume · Enter jump/open · d remove · h help · q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}
