//! The main visualization pane
//!
//! Dispatches on the frame's [`PrimaryState`]: sequences become a bar chart,
//! graphs a canvas, grids and DP tables a table widget. Highlights and
//! pointers are drawn on top; the `lift` pointer raises the highlighted bar.

use crate::catalog::Algorithm;
use crate::frame::graph::{Graph, LAYOUT_Y};
use crate::frame::{self as viz, Mark, Position, PrimaryState};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Bar, BarChart, BarGroup, Block, Borders, Cell, Row, Table,
    },
    Frame,
};

const CANVAS_WIDTH: f64 = 1000.0;
const CANVAS_HEIGHT: f64 = 600.0;
const NODE_RADIUS: f64 = 18.0;

/// Render one frame of `algorithm`
pub fn render_frame_pane(frame: &mut Frame, area: Rect, algorithm: Algorithm, shown: &viz::Frame) {
    let border = if shown.terminal {
        outcome_color(shown)
    } else {
        DEFAULT_THEME.border_normal
    };
    let block = Block::default()
        .title(format!(" {} ", algorithm.name()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    match &shown.state {
        PrimaryState::Sequence(values) => render_bars(frame, area, block, shown, values, None),
        PrimaryState::Selection { values, chosen } => {
            render_bars(frame, area, block, shown, values, Some(chosen))
        }
        PrimaryState::Graph { graph, distances } => {
            render_graph(frame, area, block, shown, graph, distances)
        }
        PrimaryState::Grid(rows) => render_grid(frame, area, block, shown, algorithm, rows),
        PrimaryState::Table {
            cells,
            row_labels,
            col_labels,
        } => render_table(frame, area, block, shown, cells, row_labels, col_labels),
    }
}

fn outcome_color(shown: &viz::Frame) -> Color {
    match &shown.outcome {
        Some(outcome) if outcome.is_success() => DEFAULT_THEME.success,
        Some(_) => DEFAULT_THEME.error,
        None => DEFAULT_THEME.border_normal,
    }
}

/// Pointer roles sitting on index `i`, by first letter
fn pointer_label(shown: &viz::Frame, i: usize) -> String {
    shown
        .pointers
        .iter()
        .filter(|(role, _)| *role != "lift")
        .filter_map(|(role, at)| match at {
            Position::Linear(at) if at.round() as usize == i && at >= 0.0 => role.chars().next(),
            _ => None,
        })
        .collect()
}

fn render_bars(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    shown: &viz::Frame,
    values: &[i64],
    chosen: Option<&Vec<bool>>,
) {
    let lift = shown.pointers.linear("lift").unwrap_or(0.0).max(0.0) as u64;
    let finished_ok = shown.terminal && shown.outcome.as_ref().is_some_and(|o| o.is_success());

    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let highlighted = shown.highlights(Mark::Index(i));
            let picked = chosen.is_some_and(|c| c.get(i).copied().unwrap_or(false));
            let color = if highlighted && finished_ok {
                DEFAULT_THEME.success
            } else if highlighted {
                DEFAULT_THEME.highlight
            } else if picked {
                DEFAULT_THEME.visited
            } else if finished_ok && shown.kind == viz::FrameKind::ComparisonSort {
                DEFAULT_THEME.success
            } else {
                DEFAULT_THEME.bar
            };
            let height = value.max(0) as u64 + if highlighted { lift } else { 0 };
            Bar::default()
                .value(height)
                .text_value(value.to_string())
                .label(Line::from(Span::styled(
                    pointer_label(shown, i),
                    Style::default().fg(DEFAULT_THEME.pointer),
                )))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let n = values.len().max(1) as u16;
    let bar_width = (area.width.saturating_sub(2) / n).saturating_sub(1).max(1);
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(chart, area);
}

fn render_graph(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    shown: &viz::Frame,
    graph: &Graph,
    distances: &[Option<u64>],
) {
    let current = match shown.pointers.get("current") {
        Some(Position::Node(node)) => Some(node),
        _ => None,
    };
    // Layout y grows downward, canvas y grows upward
    let flip = |y: i32| CANVAS_HEIGHT - f64::from(y) + f64::from(LAYOUT_Y.0) / 2.0;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, CANVAS_WIDTH])
        .y_bounds([0.0, CANVAS_HEIGHT])
        .paint(|ctx| {
            for edge in graph.edges() {
                let (a, b) = (&graph.nodes()[edge.a], &graph.nodes()[edge.b]);
                ctx.draw(&CanvasLine {
                    x1: f64::from(a.x),
                    y1: flip(a.y),
                    x2: f64::from(b.x),
                    y2: flip(b.y),
                    color: DEFAULT_THEME.comment,
                });
                ctx.print(
                    f64::from(a.x + b.x) / 2.0,
                    (flip(a.y) + flip(b.y)) / 2.0,
                    Span::styled(edge.weight.to_string(), Style::default().fg(DEFAULT_THEME.secondary)),
                );
            }
            ctx.layer();
            for node in graph.nodes() {
                let color = if current == Some(node.id) {
                    DEFAULT_THEME.highlight
                } else if shown.highlights(Mark::Node(node.id)) {
                    DEFAULT_THEME.visited
                } else {
                    DEFAULT_THEME.primary
                };
                let (x, y) = (f64::from(node.x), flip(node.y));
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: NODE_RADIUS,
                    color,
                });
                let label = match distances.get(node.id).copied().flatten() {
                    Some(d) => format!("{}:{}", node.id, d),
                    None => node.id.to_string(),
                };
                ctx.print(
                    x,
                    y,
                    Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                );
            }
        });
    frame.render_widget(canvas, area);
}

/// Text and colors for one grid cell of a constraint search
fn grid_cell(algorithm: Algorithm, row: usize, col: usize, value: i64) -> (String, Style) {
    match algorithm {
        Algorithm::NQueens => {
            let bg = if (row + col) % 2 == 0 {
                DEFAULT_THEME.current_line_bg
            } else {
                DEFAULT_THEME.wall
            };
            let text = if value == 1 { " ♛ " } else { "   " };
            (text.to_string(), Style::default().fg(DEFAULT_THEME.path).bg(bg))
        }
        Algorithm::RatInMaze => match value {
            crate::backtrack::maze::WALL => ("███".to_string(), Style::default().fg(DEFAULT_THEME.wall)),
            crate::backtrack::maze::PATH => (" ● ".to_string(), Style::default().fg(DEFAULT_THEME.path)),
            _ => (" · ".to_string(), Style::default().fg(DEFAULT_THEME.comment)),
        },
        _ => {
            let text = if value == 0 {
                " · ".to_string()
            } else {
                format!(" {} ", value)
            };
            (text, Style::default().fg(DEFAULT_THEME.fg))
        }
    }
}

fn render_grid(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    shown: &viz::Frame,
    algorithm: Algorithm,
    rows: &[Vec<i64>],
) {
    let cols = rows.first().map_or(0, Vec::len);
    let table_rows = rows.iter().enumerate().map(|(r, row)| {
        Row::new(row.iter().enumerate().map(|(c, &value)| {
            let (text, mut style) = grid_cell(algorithm, r, c, value);
            if shown.highlights(Mark::Cell { row: r, col: c }) {
                style = style.fg(Color::Black).bg(DEFAULT_THEME.highlight);
            }
            Cell::from(text).style(style)
        }))
    });
    let table = Table::new(table_rows, vec![Constraint::Length(3); cols])
        .block(block)
        .column_spacing(0);
    frame.render_widget(table, area);
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    shown: &viz::Frame,
    cells: &[Vec<Option<i64>>],
    row_labels: &[String],
    col_labels: &[String],
) {
    let label_style = Style::default()
        .fg(DEFAULT_THEME.pointer)
        .add_modifier(Modifier::BOLD);
    let arrow = match shown.pointers.get("arrow") {
        Some(Position::Cell { row, col }) => Some((row, col)),
        _ => None,
    };

    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(col_labels.iter().map(|l| Cell::from(l.as_str()).style(label_style))),
    );
    let rows = cells.iter().enumerate().map(|(r, row)| {
        let label = row_labels.get(r).map_or("", String::as_str);
        Row::new(
            std::iter::once(Cell::from(label).style(label_style)).chain(row.iter().enumerate().map(
                |(c, value)| {
                    let text = value.map_or_else(|| "∞".to_string(), |v| v.to_string());
                    let style = if arrow == Some((r, c)) {
                        Style::default().fg(Color::Black).bg(DEFAULT_THEME.highlight)
                    } else {
                        Style::default().fg(DEFAULT_THEME.fg)
                    };
                    Cell::from(text).style(style)
                },
            )),
        )
    });

    let width = cells
        .iter()
        .flatten()
        .map(|v| v.map_or(1, |v| v.to_string().len()))
        .chain(col_labels.iter().map(String::len))
        .max()
        .unwrap_or(1) as u16
        + 1;
    let label_width = row_labels.iter().map(String::len).max().unwrap_or(1) as u16 + 1;
    let widths = std::iter::once(Constraint::Length(label_width))
        .chain(std::iter::repeat(Constraint::Length(width)).take(col_labels.len()));

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
