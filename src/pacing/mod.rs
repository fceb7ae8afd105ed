//! Pacing: how long each frame stays on screen
//!
//! The [`PacingController`] owns the current [`SpeedTier`] and answers
//! [`delay_for`](PacingController::delay_for) one frame at a time, so a tier
//! change applies to the next frame paced and never to frames already shown.
//!
//! It also defines the cosmetic sub-animations used by the search sources:
//! [`interpolate`] for pointer slides and [`lift_offsets`] for the "pop" of a
//! found bar. Both only produce cosmetic frames and never feed back into
//! algorithm decisions.

use crate::frame::Frame;
use std::fmt;
use std::time::Duration;

/// Dwell time for cosmetic (transition) frames
pub const TRANSITION_DELAY: Duration = Duration::from_millis(30);

/// Dwell time for the terminal frame of a run
pub const TERMINAL_HOLD: Duration = Duration::from_millis(800);

/// Sub-steps used when sliding search pointers
pub const SLIDE_STEPS: usize = 8;

/// Lift height reached by the celebration animation
pub const LIFT_HEIGHT: u32 = 30;

/// Lift increment per celebration frame
pub const LIFT_STEP: u32 = 3;

/// Named speed setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedTier {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl SpeedTier {
    /// Per-step delay in milliseconds
    pub fn delay_ms(self) -> u64 {
        match self {
            SpeedTier::Slow => 500,
            SpeedTier::Medium => 200,
            SpeedTier::Fast => 50,
        }
    }

    pub fn delay(self) -> Duration {
        Duration::from_millis(self.delay_ms())
    }

    /// Keyboard shortcut mapping: '1' slow, '2' medium, '3' fast
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(SpeedTier::Slow),
            '2' => Some(SpeedTier::Medium),
            '3' => Some(SpeedTier::Fast),
            _ => None,
        }
    }
}

impl fmt::Display for SpeedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpeedTier::Slow => "Slow",
            SpeedTier::Medium => "Medium",
            SpeedTier::Fast => "Fast",
        };
        f.write_str(name)
    }
}

/// Decides how long each frame is shown
#[derive(Debug, Clone, Default)]
pub struct PacingController {
    tier: SpeedTier,
}

impl PacingController {
    pub fn new(tier: SpeedTier) -> Self {
        PacingController { tier }
    }

    pub fn tier(&self) -> SpeedTier {
        self.tier
    }

    pub fn set_tier(&mut self, tier: SpeedTier) {
        if tier != self.tier {
            tracing::debug!(from = %self.tier, to = %tier, "speed tier changed");
        }
        self.tier = tier;
    }

    /// Delay for a specific frame
    pub fn delay_for(&self, frame: &Frame) -> Duration {
        if frame.terminal {
            TERMINAL_HOLD
        } else if frame.is_cosmetic() {
            TRANSITION_DELAY
        } else {
            self.tier.delay()
        }
    }
}

/// Linear interpolation from `start` towards `end` in `steps` increments.
///
/// Returns `steps` positions; the last one equals `end`.
pub fn interpolate(start: f64, end: f64, steps: usize) -> Vec<f64> {
    (1..=steps)
        .map(|t| start + (end - start) * (t as f64 / steps as f64))
        .collect()
}

/// Offsets for the lift celebration: 0, 3, ..., 27
pub fn lift_offsets() -> impl Iterator<Item = u32> {
    (0..LIFT_HEIGHT).step_by(LIFT_STEP as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameKind, PrimaryState};

    #[test]
    fn tiers_map_to_fixed_delays() {
        assert_eq!(SpeedTier::Slow.delay_ms(), 500);
        assert_eq!(SpeedTier::Medium.delay_ms(), 200);
        assert_eq!(SpeedTier::Fast.delay_ms(), 50);
        assert_eq!(SpeedTier::default(), SpeedTier::Medium);
        assert_eq!(SpeedTier::from_key('3'), Some(SpeedTier::Fast));
        assert_eq!(SpeedTier::from_key('9'), None);
    }

    #[test]
    fn interpolation_ends_on_target() {
        let steps = interpolate(0.0, 4.0, 8);
        assert_eq!(steps.len(), 8);
        assert_eq!(steps[0], 0.5);
        assert_eq!(steps[7], 4.0);
        assert!(steps.windows(2).all(|w| w[0] < w[1]));
        assert!(interpolate(2.0, 2.0, 3).iter().all(|&p| p == 2.0));
    }

    #[test]
    fn lift_has_ten_frames() {
        let offsets: Vec<u32> = lift_offsets().collect();
        assert_eq!(offsets.len(), 10);
        assert_eq!(offsets.first(), Some(&0));
        assert_eq!(offsets.last(), Some(&27));
    }

    #[test]
    fn tier_change_applies_to_next_frame() {
        let frame = Frame::logical(FrameKind::LinearScan, PrimaryState::Sequence(vec![1]));
        let mut pacing = PacingController::default();
        let before = pacing.delay_for(&frame);
        pacing.set_tier(SpeedTier::Fast);
        assert_eq!(before, Duration::from_millis(200));
        assert_eq!(pacing.delay_for(&frame), Duration::from_millis(50));

        let cosmetic = Frame::cosmetic(FrameKind::LinearScan, PrimaryState::Sequence(vec![1]));
        assert_eq!(pacing.delay_for(&cosmetic), TRANSITION_DELAY);
    }
}
