//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: screens (family menu, algorithm menu, target entry, run),
//!   keyboard event loop, auto-play pacing
//! - **[`panes`]**: stateless render functions for each visible pane (menu,
//!   visualization, info panel, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`Config`](crate::config::Config) and a sound sink, then call [`App::run`]
//! to start the event loop.
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
