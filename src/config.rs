//! Session configuration
//!
//! Built from the command line in `main.rs` and handed to
//! [`Session::new`](crate::session::Session::new). Everything here is a
//! starting default: the speed tier and mute flag can change during a session
//! and go back to these values on [`Session::reset`](crate::session::Session::reset).

use crate::frame::history::DEFAULT_HISTORY_LIMIT;
use crate::pacing::SpeedTier;

#[derive(Debug, Clone)]
pub struct Config {
    /// Speed tier at the start of each menu session
    pub speed: SpeedTier,
    /// Mute flag at the start of each menu session
    pub muted: bool,
    /// Seed for generated workloads (random arrays, graphs, matrices)
    pub seed: u64,
    /// Byte budget for the per-run frame history
    pub history_limit: usize,
    /// Skip pacing delays entirely (headless runs)
    pub no_delay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            speed: SpeedTier::Medium,
            muted: false,
            seed: 0x5eed,
            history_limit: DEFAULT_HISTORY_LIMIT,
            no_delay: false,
        }
    }
}
