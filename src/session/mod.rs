//! Session and run context, plus the collaborator boundaries
//!
//! - [`Session`]: state scoped to one algorithm-menu session (speed tier, mute)
//! - [`RunContext`]: state scoped to one run (step counter, frame sequence
//!   numbers, quit probe); passed explicitly into every
//!   [`FrameSource::next_frame`](crate::sources::FrameSource::next_frame) call
//! - [`player`]: history-backed stepping and the headless driving loop
//! - [`render`]: the [`Renderer`] boundary and a plain-text renderer
//! - [`sound`]: the [`SoundSink`] boundary
//!
//! Nothing here is process-wide: the shell owns one `Session` and creates a
//! fresh `RunContext` per run.

pub mod player;
pub mod render;
pub mod sound;

pub use player::{drive, Player, RunSummary};
pub use render::{Renderer, TextRenderer};
pub use sound::{Bell, Silent, SoundSink};

use crate::config::Config;
use crate::frame::{Cue, Frame};
use crate::pacing::{PacingController, SpeedTier};
use std::fmt;

/// Pacing and sound settings for one menu session
#[derive(Debug, Clone)]
pub struct Session {
    pub pacing: PacingController,
    muted: bool,
    defaults: (SpeedTier, bool),
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Session {
            pacing: PacingController::new(config.speed),
            muted: config.muted,
            defaults: (config.speed, config.muted),
        }
    }

    /// Back to configured defaults, at the start of a menu session
    pub fn reset(&mut self) {
        self.pacing.set_tier(self.defaults.0);
        self.muted = self.defaults.1;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Fresh per-run context; the step counter starts at zero
    pub fn begin_run(&self) -> RunContext {
        RunContext::new()
    }

    /// Forward a cue to the sound sink unless muted. Sink failures are logged and dropped.
    pub fn play_cue(&self, sink: &mut dyn SoundSink, cue: Cue) {
        if self.muted {
            return;
        }
        if let Err(err) = sink.play(cue) {
            tracing::warn!(?cue, %err, "sound cue dropped");
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(&Config::default())
    }
}

type QuitProbe = Box<dyn FnMut() -> bool>;

/// Per-run counters handed to frame sources
pub struct RunContext {
    next_seq: u64,
    steps: u64,
    quit: bool,
    quit_probe: Option<QuitProbe>,
}

impl RunContext {
    pub fn new() -> Self {
        RunContext {
            next_seq: 0,
            steps: 0,
            quit: false,
            quit_probe: None,
        }
    }

    /// Context whose sources may poll `probe` for a quit request mid-search
    pub fn with_quit_probe(probe: impl FnMut() -> bool + 'static) -> Self {
        RunContext {
            quit_probe: Some(Box::new(probe)),
            ..RunContext::new()
        }
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Poll the quit probe. Once quit is seen it stays set.
    pub fn should_quit(&mut self) -> bool {
        if !self.quit {
            if let Some(probe) = self.quit_probe.as_mut() {
                self.quit = probe();
            }
        }
        self.quit
    }

    /// Assign the next sequence number and, for logical steps, advance the step counter
    pub fn stamp(&mut self, mut frame: Frame) -> Frame {
        if frame.is_logical() && !frame.terminal {
            self.steps += 1;
        }
        frame.seq = self.next_seq;
        frame.metrics.steps = self.steps;
        self.next_seq += 1;
        frame
    }

    /// Logical steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("next_seq", &self.next_seq)
            .field("steps", &self.steps)
            .field("quit", &self.quit)
            .field("quit_probe", &self.quit_probe.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameKind, PrimaryState};

    #[test]
    fn stamping_counts_only_logical_steps() {
        let mut run = RunContext::new();
        let state = PrimaryState::Sequence(vec![1]);
        let a = run.stamp(Frame::logical(FrameKind::LinearScan, state.clone()));
        let b = run.stamp(Frame::cosmetic(FrameKind::LinearScan, state.clone()));
        let c = run.stamp(Frame::logical(FrameKind::LinearScan, state));
        assert_eq!((a.seq, b.seq, c.seq), (0, 1, 2));
        assert_eq!((a.metrics.steps, b.metrics.steps, c.metrics.steps), (1, 1, 2));
        assert_eq!(run.steps(), 2);
    }

    #[test]
    fn quit_probe_latches() {
        let mut calls = 0;
        let mut run = RunContext::with_quit_probe(move || {
            calls += 1;
            calls >= 2
        });
        assert!(!run.should_quit());
        assert!(run.should_quit());
        assert!(run.should_quit());
    }

    #[test]
    fn reset_restores_defaults_but_tier_survives_runs() {
        let mut session = Session::default();
        session.pacing.set_tier(SpeedTier::Fast);
        session.toggle_mute();
        let _run = session.begin_run();
        assert_eq!(session.pacing.tier(), SpeedTier::Fast);
        session.reset();
        assert_eq!(session.pacing.tier(), SpeedTier::Medium);
        assert!(!session.is_muted());
    }
}
