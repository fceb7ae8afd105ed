//! Sound cue sinks
//!
//! The engine only emits abstract [`Cue`]s; whether anything is audible is
//! up to the sink. A failing sink never changes a run.

use crate::errors::SoundError;
use crate::frame::Cue;
use std::io::Write;

pub trait SoundSink {
    fn play(&mut self, cue: Cue) -> Result<(), SoundError>;
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: Cue) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Rings the terminal bell on success and error cues; clicks are silent
#[derive(Debug)]
pub struct Bell<W: Write> {
    out: W,
}

impl<W: Write> Bell<W> {
    pub fn new(out: W) -> Self {
        Bell { out }
    }
}

impl<W: Write> SoundSink for Bell<W> {
    fn play(&mut self, cue: Cue) -> Result<(), SoundError> {
        match cue {
            Cue::Click => Ok(()),
            Cue::Success | Cue::Error => {
                self.out.write_all(b"\x07")?;
                self.out.flush()?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_rings_only_for_outcomes() {
        let mut bell = Bell::new(Vec::new());
        bell.play(Cue::Click).expect("click");
        bell.play(Cue::Success).expect("success");
        bell.play(Cue::Error).expect("error");
        assert_eq!(bell.out, b"\x07\x07".to_vec());
    }
}
