//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`menu`]: family/algorithm menus and the search-target prompt
//! - [`visual`]: the frame itself (bars, graph canvas, grid, DP table)
//! - [`info`]: complexity panel, counters and the frame message
//! - [`status`]: Status bar with keybindings and playback state
//!
//! Each pane module exports a `render_*` function that only reads the frame
//! and the app state it is handed.

pub mod info;
pub mod menu;
pub mod status;
pub mod visual;

pub use info::render_info_pane;
pub use menu::{render_menu_pane, render_target_prompt};
pub use status::render_status_bar;
pub use visual::render_frame_pane;
