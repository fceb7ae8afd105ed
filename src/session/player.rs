//! History-backed playback and the headless driving loop
//!
//! [`Player`] pairs a frame source with a [`FrameHistory`]. Stepping forward
//! replays a recorded frame when one exists and otherwise pulls the next
//! frame from the source; stepping backward only ever reads history. The
//! source itself is never rewound. A frame the history has no room for is
//! held back and offered again, so recorded runs never have gaps.
//!
//! [`drive`] is the plain control loop used by the headless binary mode:
//! pull a frame, pace it, render it, forward its cue.

use super::{Renderer, RunContext, Session, SoundSink};
use crate::errors::{EngineError, EngineResult};
use crate::frame::history::FrameHistory;
use crate::frame::{Frame, Outcome};
use crate::sources::FrameSource;
use std::time::Duration;

/// Steps through one run, recording every frame it produces
pub struct Player {
    source: Box<dyn FrameSource>,
    run: RunContext,
    history: FrameHistory,
    /// Frame pulled from the source that did not fit in history
    pending: Option<Frame>,
    /// Index of the frame currently shown (None before the first step)
    position: Option<usize>,
}

impl Player {
    pub fn new(source: Box<dyn FrameSource>, run: RunContext, history_limit: usize) -> Self {
        Player {
            source,
            run,
            history: FrameHistory::new(history_limit),
            pending: None,
            position: None,
        }
    }

    /// Step forward (replay from history, or produce the next frame)
    pub fn step_forward(&mut self) -> EngineResult<&Frame> {
        let next = self.position.map_or(0, |p| p + 1);

        if next >= self.history.len() {
            if self.is_finished() {
                return Err(EngineError::Exhausted);
            }
            let frame = match self.pending.take() {
                Some(frame) => frame,
                None => self
                    .source
                    .next_frame(&mut self.run)
                    .ok_or(EngineError::Exhausted)?,
            };
            if let Err(err) = self.history.check_room(&frame) {
                tracing::warn!(seq = frame.seq, %err, "history full, holding frame");
                self.pending = Some(frame);
                return Err(err);
            }
            if frame.terminal {
                tracing::info!(
                    kind = frame.kind.label(),
                    frames = frame.seq + 1,
                    outcome = ?frame.outcome,
                    "run finished"
                );
            }
            self.history.push(frame)?;
        }

        self.position = Some(next);
        self.history.get(next).ok_or(EngineError::Exhausted)
    }

    /// Step backward through recorded frames
    pub fn step_backward(&mut self) -> EngineResult<&Frame> {
        match self.position {
            Some(p) if p > 0 => {
                self.position = Some(p - 1);
                self.history.get(p - 1).ok_or(EngineError::AtStart)
            }
            _ => Err(EngineError::AtStart),
        }
    }

    /// Jump back to the first recorded frame
    pub fn rewind_to_start(&mut self) -> EngineResult<&Frame> {
        if self.history.is_empty() {
            return Err(EngineError::AtStart);
        }
        self.position = Some(0);
        self.history.get(0).ok_or(EngineError::AtStart)
    }

    /// Run forward to the terminal frame; returns how many steps were taken
    pub fn jump_to_end(&mut self) -> EngineResult<usize> {
        let mut stepped = 0;
        loop {
            match self.step_forward() {
                Ok(_) => stepped += 1,
                Err(EngineError::Exhausted) => return Ok(stepped),
                Err(err) => return Err(err),
            }
        }
    }

    pub fn current(&self) -> Option<&Frame> {
        self.position.and_then(|p| self.history.get(p))
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Frames recorded so far
    pub fn recorded(&self) -> usize {
        self.history.len()
    }

    /// Whether the terminal frame has been produced
    pub fn is_finished(&self) -> bool {
        self.history.last().is_some_and(|f| f.terminal)
    }

    /// Whether the current frame is the newest one produced
    pub fn at_frontier(&self) -> bool {
        match self.position {
            Some(p) => p + 1 == self.history.len(),
            None => self.history.is_empty(),
        }
    }

    pub fn history(&self) -> &FrameHistory {
        &self.history
    }

    pub fn request_quit(&mut self) {
        self.run.request_quit();
    }
}

/// What a driven run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub logical_steps: u64,
    pub outcome: Option<Outcome>,
    pub render_failures: usize,
}

/// Drive a source to completion: pace, render and cue every frame.
///
/// Render and sound failures are logged and counted but never stop the run.
pub fn drive(
    source: &mut dyn FrameSource,
    session: &Session,
    run: &mut RunContext,
    renderer: &mut dyn Renderer,
    sound: &mut dyn SoundSink,
    mut sleep: impl FnMut(Duration),
) -> RunSummary {
    let span = tracing::info_span!("drive", kind = source.kind().label());
    let _guard = span.enter();

    let mut summary = RunSummary::default();
    while let Some(frame) = source.next_frame(run) {
        summary.frames += 1;

        if let Err(err) = renderer.render(&frame) {
            summary.render_failures += 1;
            tracing::warn!(seq = frame.seq, %err, "render failed");
        }
        if let Some(cue) = frame.cue {
            session.play_cue(sound, cue);
        }
        sleep(session.pacing.delay_for(&frame));

        if frame.terminal {
            summary.outcome = frame.outcome.clone();
        }
    }
    summary.logical_steps = run.steps();

    tracing::info!(
        frames = summary.frames,
        steps = summary.logical_steps,
        outcome = ?summary.outcome,
        "run complete"
    );
    summary
}
