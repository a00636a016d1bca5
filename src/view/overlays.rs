//! Overlay rendering (help popup)

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

/// Key bindings grouped by what they act on
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Playback",
        &[
            ("Space", "play / pause"),
            ("s", "stop"),
            ("n / p", "next / previous track"),
            ("+ / -", "volume up / down"),
        ],
    ),
    (
        "Queue",
        &[
            ("Enter", "jump to the selected track"),
            ("d / Del", "remove the selected track"),
        ],
    ),
    (
        "Library",
        &[
            ("Enter", "open the selected entry"),
            ("Backspace", "up one level"),
            ("r", "reload genres"),
        ],
    ),
    (
        "General",
        &[
            ("Tab", "switch queue / library"),
            ("↑ / ↓", "move selection"),
            ("Esc", "dismiss the error"),
            ("h / ?", "toggle this help"),
            ("q", "quit"),
        ],
    ),
];

const KEY_COLUMN: usize = 10;

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, (section, bindings)) in HELP_SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            *section,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        lines.extend(bindings.iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("  {:<KEY_COLUMN$}", key),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(*desc),
            ])
        }));
    }
    lines
}

/// Centered area sized to the content, clipped to the frame
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    popup
}

pub fn render_help_popup(frame: &mut Frame) {
    let lines = help_lines();

    // Borders plus one column of padding on each side
    let width = lines.iter().map(Line::width).max().unwrap_or(0) as u16 + 4;
    let height = lines.len() as u16 + 2;
    let area = popup_area(frame.area(), width, height);

    frame.render_widget(Clear, area);

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Keys ")
            .title_bottom(Line::from(" Esc to close ").right_aligned())
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(help, area);
}
