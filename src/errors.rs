//! Error types for the visualization engine
//!
//! [`EngineError`] covers the conditions that fail fast to the shell: bad
//! inputs rejected before a frame source is built, malformed graphs, and
//! history navigation past either end of a run.
//!
//! "Not found" and "no solution" are not errors. Those are
//! terminal [`Outcome`](crate::frame::Outcome)s carried by the last frame.
//!
//! [`RenderError`] and [`SoundError`] belong to the external collaborators and
//! never feed back into algorithm state.

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by frame sources and playback
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Input rejected before entering a frame source
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Edge list references a node that does not exist, or a start node is out of range
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    /// Frame history budget exceeded
    #[error("frame history limit exceeded: {current} + {requested} > {limit} bytes")]
    HistoryLimitExceeded {
        current: usize,
        requested: usize,
        limit: usize,
    },

    /// Stepped forward past the terminal frame
    #[error("run finished: no more frames")]
    Exhausted,

    /// Stepped backward past the first frame
    #[error("already at the first frame")]
    AtStart,
}

impl EngineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn malformed_graph(msg: impl Into<String>) -> Self {
        Self::MalformedGraph(msg.into())
    }
}

/// Failure reported by a [`Renderer`](crate::session::Renderer)
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("render i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("renderer unavailable: {0}")]
    Unavailable(String),
}

/// Failure reported by a [`SoundSink`](crate::session::SoundSink)
#[derive(thiserror::Error, Debug)]
pub enum SoundError {
    #[error("sound i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sound device unavailable")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(EngineError::invalid_input("x")
            .to_string()
            .contains("invalid input:"));
        assert!(EngineError::malformed_graph("x")
            .to_string()
            .contains("malformed graph:"));
        let err = EngineError::HistoryLimitExceeded {
            current: 10,
            requested: 5,
            limit: 12,
        };
        assert_eq!(
            err.to_string(),
            "frame history limit exceeded: 10 + 5 > 12 bytes"
        );
    }

    #[test]
    fn render_error_preserves_io_source() {
        let err = RenderError::from(std::io::Error::other("boom"));
        assert!(err.to_string().contains("boom"));
    }
}
