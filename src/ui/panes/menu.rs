//! Menus and the search-target prompt

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

/// Render a vertical menu with `selected` highlighted
pub fn render_menu_pane(frame: &mut Frame, area: Rect, title: &str, items: &[&str], selected: usize) {
    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(DEFAULT_THEME.primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            let marker = if i == selected { "▶ " } else { "  " };
            ListItem::new(Line::from(Span::styled(format!("{}{}", marker, item), style)))
        })
        .collect();

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_focused))
        .padding(Padding::uniform(1));
    frame.render_widget(List::new(list_items).block(block), area);
}

/// Render the target entry prompt above the values being searched
pub fn render_target_prompt(frame: &mut Frame, area: Rect, algorithm: &str, input: &str, values: &[i64]) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let prompt = Paragraph::new(vec![
        Line::from(Span::styled(
            "Enter a number to search, then press Enter",
            Style::default().fg(DEFAULT_THEME.comment),
        )),
        Line::from(vec![
            Span::styled("Target: ", Style::default().fg(DEFAULT_THEME.fg)),
            Span::styled(
                format!("{}_", input),
                Style::default()
                    .fg(DEFAULT_THEME.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .block(
        Block::default()
            .title(format!(" {} ", algorithm))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DEFAULT_THEME.border_focused)),
    );
    frame.render_widget(prompt, rows[0]);

    let shown: Vec<String> = values.iter().map(i64::to_string).collect();
    let values = Paragraph::new(shown.join("  "))
        .style(Style::default().fg(DEFAULT_THEME.fg))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Values ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DEFAULT_THEME.border_normal)),
        );
    frame.render_widget(values, rows[1]);
}
