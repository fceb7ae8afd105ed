//! # Introduction
//!
//! stepviz animates classic algorithms one step at a time. Every algorithm is
//! a [`sources::FrameSource`]: a state machine that, on each call, advances by
//! exactly one logical step and hands back an immutable [`frame::Frame`]
//! describing what to draw. A shell paces, renders and sounds those frames; a
//! [`frame::history::FrameHistory`] records them so playback can move backward
//! as well as forward.
//!
//! ## Pipeline
//!
//! ```text
//! Catalog → FrameSource → Frame → Pacing → Renderer / SoundSink
//!                           ↓
//!                      FrameHistory (step back / forward)
//! ```
//!
//! 1. [`catalog`]: the closed [`catalog::Algorithm`] set and its default
//!    [`catalog::Scenario`] workloads.
//! 2. [`sources`]: searching, sorting, graph traversal and DP table fills.
//! 3. [`backtrack`]: explicit-stack backtracking with try/commit/rollback
//!    frames (N-Queens, Sudoku, rat in a maze, subset sum).
//! 4. [`frame`]: the frame data model and the bounded frame history.
//! 5. [`pacing`]: speed tiers, per-frame dwell, interpolation and lift offsets.
//! 6. [`session`]: session/run context, the renderer and sound boundaries,
//!    history-backed playback and the headless driving loop.
//! 7. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use stepviz::catalog::{Algorithm, Scenario};
//! use stepviz::sources::run_to_end;
//!
//! let scenario = Scenario::seeded(7);
//! let mut source = Algorithm::BubbleSort.source(&scenario, None).unwrap();
//! let frames = run_to_end(&mut source);
//! assert!(frames.last().unwrap().terminal);
//! ```

pub mod backtrack;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod frame;
pub mod pacing;
pub mod session;
pub mod sources;
pub mod ui;
