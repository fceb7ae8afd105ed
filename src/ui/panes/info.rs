//! Info panel: complexity, counters, pacing and the frame message

use crate::catalog::Algorithm;
use crate::frame::{self as viz, Action};
use crate::pacing::SpeedTier;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Render the info panel for the current frame (if any)
pub fn render_info_pane(
    frame: &mut Frame,
    area: Rect,
    algorithm: Algorithm,
    shown: Option<&viz::Frame>,
    tier: SpeedTier,
    muted: bool,
) {
    let complexity = algorithm.complexity();
    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default().fg(DEFAULT_THEME.fg);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Time   ", label),
            Span::styled(complexity.time, value),
        ]),
        Line::from(vec![
            Span::styled("Space  ", label),
            Span::styled(complexity.space, value),
        ]),
        Line::from(Span::styled(
            complexity.concept,
            Style::default().fg(DEFAULT_THEME.secondary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Speed  ", label),
            Span::styled(tier.to_string(), value),
            Span::styled(if muted { "  (muted)" } else { "" }, label),
        ]),
    ];

    if let Some(shown) = shown {
        let metrics = shown.metrics;
        lines.push(Line::from(vec![
            Span::styled("Steps  ", label),
            Span::styled(metrics.steps.to_string(), value),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Cmp    ", label),
            Span::styled(metrics.comparisons.to_string(), value),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Writes ", label),
            Span::styled(metrics.writes.to_string(), value),
        ]));
        if let Some(trace) = shown.trace {
            let color = match trace.action {
                Action::Try => DEFAULT_THEME.highlight,
                Action::Commit => DEFAULT_THEME.success,
                Action::Rollback => DEFAULT_THEME.error,
            };
            lines.push(Line::from(vec![
                Span::styled("Depth  ", label),
                Span::styled(trace.depth.to_string(), Style::default().fg(color)),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            shown.message.clone(),
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        )));
        if let Some(outcome) = &shown.outcome {
            let color = if outcome.is_success() {
                DEFAULT_THEME.success
            } else {
                DEFAULT_THEME.error
            };
            lines.push(Line::from(Span::styled(
                outcome.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
    }

    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::horizontal(1));
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
