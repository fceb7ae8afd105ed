//! Renderer boundary and the headless text renderer

use crate::errors::RenderError;
use crate::frame::{Frame, Mark, PrimaryState, Position};
use std::io::Write;

/// Draws frames. Called once per frame, before the next frame is produced.
pub trait Renderer {
    fn render(&mut self, frame: &Frame) -> Result<(), RenderError>;
}

/// Writes one line per frame; grids and tables are dumped in full on the terminal frame
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    show_cosmetic: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        TextRenderer {
            out,
            show_cosmetic: false,
        }
    }

    /// Also print cosmetic frames (pointer slides, lift animation)
    pub fn show_cosmetic(mut self, show: bool) -> Self {
        self.show_cosmetic = show;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, frame: &Frame) -> Result<(), RenderError> {
        if frame.is_cosmetic() && !self.show_cosmetic {
            return Ok(());
        }

        let marker = if frame.terminal {
            "■"
        } else if frame.is_cosmetic() {
            "·"
        } else {
            "▶"
        };
        write!(
            self.out,
            "{} #{:<4} {:<48} {}",
            marker,
            frame.seq,
            frame.message,
            summarize_state(frame)
        )?;
        if !frame.pointers.is_empty() {
            write!(self.out, "  {}", format_pointers(frame))?;
        }
        writeln!(
            self.out,
            "  [cmp {} / wr {} / step {}]",
            frame.metrics.comparisons, frame.metrics.writes, frame.metrics.steps
        )?;

        if frame.terminal {
            for line in dump_state(&frame.state) {
                writeln!(self.out, "    {}", line)?;
            }
            if let Some(outcome) = &frame.outcome {
                writeln!(self.out, "    => {}", outcome)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

fn summarize_state(frame: &Frame) -> String {
    match &frame.state {
        PrimaryState::Sequence(values) => values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if frame.highlights(Mark::Index(i)) {
                    format!("[{}]", v)
                } else {
                    v.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
        PrimaryState::Selection { values, chosen } => values
            .iter()
            .zip(chosen)
            .map(|(v, &c)| if c { format!("+{}", v) } else { v.to_string() })
            .collect::<Vec<_>>()
            .join(" "),
        PrimaryState::Grid(rows) => {
            let filled = rows.iter().flatten().filter(|&&v| v != 0).count();
            format!("grid {}x{} ({} set)", rows.len(), rows.first().map_or(0, Vec::len), filled)
        }
        PrimaryState::Graph { graph, .. } => {
            let visited: Vec<String> = frame
                .highlighted
                .iter()
                .filter_map(|m| match m {
                    Mark::Node(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect();
            format!("{} nodes, visited {{{}}}", graph.len(), visited.join(","))
        }
        PrimaryState::Table { cells, .. } => {
            format!("table {}x{}", cells.len(), cells.first().map_or(0, Vec::len))
        }
    }
}

fn format_pointers(frame: &Frame) -> String {
    frame
        .pointers
        .iter()
        .map(|(role, at)| match at {
            Position::Linear(i) if i.fract() == 0.0 => format!("{}={}", role, i),
            Position::Linear(i) => format!("{}={:.2}", role, i),
            Position::Cell { row, col } => format!("{}=({},{})", role, row, col),
            Position::Node(n) => format!("{}=#{}", role, n),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn dump_state(state: &PrimaryState) -> Vec<String> {
    match state {
        PrimaryState::Grid(rows) => rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect(),
        PrimaryState::Table { cells, .. } => cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| v.map_or_else(|| "∞".to_string(), |v| v.to_string()))
                    .map(|s| format!("{:>5}", s))
                    .collect::<String>()
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameKind, Outcome, Success};

    #[test]
    fn text_renderer_marks_highlights_and_outcome() {
        let mut renderer = TextRenderer::new(Vec::new());
        let frame = Frame::logical(FrameKind::LinearScan, PrimaryState::Sequence(vec![4, 7, 9]))
            .highlight([Mark::Index(1)])
            .pointer("i", Position::Linear(1.0))
            .message("Checking index 1...")
            .finish(Outcome::Success(Success::Found { index: 1 }));
        renderer.render(&frame).expect("render");
        let text = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert!(text.contains("4 [7] 9"), "got: {}", text);
        assert!(text.contains("i=1"), "got: {}", text);
        assert!(text.contains("=> found at index 1"), "got: {}", text);
    }

    #[test]
    fn cosmetic_frames_hidden_by_default() {
        let mut renderer = TextRenderer::new(Vec::new());
        let frame = Frame::cosmetic(FrameKind::RangeSearch, PrimaryState::Sequence(vec![1]));
        renderer.render(&frame).expect("render");
        assert!(renderer.into_inner().is_empty());
    }
}
