// Frame history for stepping back through a run

use super::Frame;
use crate::errors::{EngineError, EngineResult};

/// Default history budget (64 MB)
pub const DEFAULT_HISTORY_LIMIT: usize = 64 * 1024 * 1024;

/// Keeps every frame a run has produced, within a memory budget
#[derive(Debug)]
pub struct FrameHistory {
    frames: Vec<Frame>,
    max_memory: usize,
    current_memory: usize,
}

impl FrameHistory {
    pub fn new(max_memory: usize) -> Self {
        FrameHistory {
            frames: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Check that `frame` fits the remaining budget without recording it
    pub fn check_room(&self, frame: &Frame) -> EngineResult<()> {
        let frame_size = frame.estimated_size();
        if self.current_memory + frame_size > self.max_memory {
            return Err(EngineError::HistoryLimitExceeded {
                current: self.current_memory,
                requested: frame_size,
                limit: self.max_memory,
            });
        }
        Ok(())
    }

    /// Add a frame to history
    pub fn push(&mut self, frame: Frame) -> EngineResult<()> {
        self.check_room(&frame)?;
        let frame_size = frame.estimated_size();

        debug_assert!(
            self.frames.last().map_or(true, |last| last.seq < frame.seq),
            "frames must arrive in increasing seq order"
        );

        self.current_memory += frame_size;
        self.frames.push(frame);
        Ok(())
    }

    /// Get a frame by index
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

impl Default for FrameHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
