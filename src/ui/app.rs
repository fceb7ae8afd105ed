//! Main TUI application state and logic

use super::panes::status::Playback;
use crate::catalog::{Algorithm, Family, Scenario};
use crate::config::Config;
use crate::errors::EngineError;
use crate::pacing::SpeedTier;
use crate::session::{Player, Session, SoundSink};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which screen is showing
pub enum Screen {
    /// Top-level family menu
    Families { selected: usize },
    /// Algorithms of one family
    Algorithms { family: Family, selected: usize },
    /// Search-target entry before a search run
    Target { algorithm: Algorithm, input: String },
    /// A run in progress (or finished, waiting for retry)
    Run(RunView),
}

/// Playback state of one run
pub struct RunView {
    pub algorithm: Algorithm,
    pub target: Option<i64>,
    pub player: Player,
    /// Whether auto-play mode is active
    pub is_playing: bool,
    /// Last time a frame was advanced in play mode
    pub last_step: Instant,
}

/// The main application state
pub struct App {
    pub screen: Screen,
    pub session: Session,
    pub scenario: Scenario,
    history_limit: usize,
    sound: Box<dyn SoundSink>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(config: &Config, sound: Box<dyn SoundSink>) -> Self {
        App {
            screen: Screen::Families { selected: 0 },
            session: Session::new(config),
            scenario: Scenario::seeded(config.seed),
            history_limit: config.history_limit,
            sound,
            should_quit: false,
            status_message: String::from("Pick an algorithm family"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.tick();

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(15))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Advance auto-play once the current frame has been shown long enough
    fn tick(&mut self) {
        let Screen::Run(view) = &mut self.screen else {
            return;
        };
        if !view.is_playing {
            return;
        }
        let dwell = view
            .player
            .current()
            .map_or(Duration::ZERO, |f| self.session.pacing.delay_for(f));
        if view.last_step.elapsed() < dwell {
            return;
        }
        view.last_step = Instant::now();
        match view.player.step_forward() {
            Ok(frame) => {
                let cue = frame.cue;
                if let Some(cue) = cue {
                    self.session.play_cue(self.sound.as_mut(), cue);
                }
            }
            Err(EngineError::Exhausted) => {
                view.is_playing = false;
                self.status_message = "Finished: r to retry, Esc for menu".to_string();
            }
            Err(err) => {
                view.is_playing = false;
                tracing::warn!(%err, "playback stopped");
                self.status_message = format!("Error: {}", err);
            }
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        match &self.screen {
            Screen::Families { selected } => {
                let items: Vec<&str> = Family::ALL.iter().map(|f| f.name()).collect();
                super::panes::render_menu_pane(frame, pane_area, "Algorithm Visualizer", &items, *selected);
                super::panes::render_status_bar(frame, status_area, &self.status_message, None, Playback::Menu);
            }
            Screen::Algorithms { family, selected } => {
                let items: Vec<&str> = family.algorithms().map(Algorithm::name).collect();
                super::panes::render_menu_pane(frame, pane_area, family.name(), &items, *selected);
                super::panes::render_status_bar(frame, status_area, &self.status_message, None, Playback::Menu);
            }
            Screen::Target { algorithm, input } => {
                super::panes::render_target_prompt(
                    frame,
                    pane_area,
                    algorithm.name(),
                    input,
                    &self.scenario.search_values,
                );
                super::panes::render_status_bar(frame, status_area, &self.status_message, None, Playback::Menu);
            }
            Screen::Run(view) => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
                    .split(pane_area);

                let current = view.player.current();
                if let Some(shown) = current {
                    super::panes::render_frame_pane(frame, columns[0], view.algorithm, shown);
                }
                super::panes::render_info_pane(
                    frame,
                    columns[1],
                    view.algorithm,
                    current,
                    self.session.pacing.tier(),
                    self.session.is_muted(),
                );

                let playback = if view.is_playing {
                    Playback::Playing
                } else if view.player.is_finished() && view.player.at_frontier() {
                    Playback::Finished
                } else {
                    Playback::Paused
                };
                let position = view.player.position().map(|p| (p, view.player.recorded()));
                super::panes::render_status_bar(frame, status_area, &self.status_message, position, playback);
            }
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        if let KeyCode::Char('q') | KeyCode::Char('Q') = key.code {
            if let Screen::Run(view) = &mut self.screen {
                view.player.request_quit();
            }
            self.should_quit = true;
            return;
        }

        match &mut self.screen {
            Screen::Families { selected } => match key.code {
                KeyCode::Up => *selected = (*selected + Family::ALL.len() - 1) % Family::ALL.len(),
                KeyCode::Down => *selected = (*selected + 1) % Family::ALL.len(),
                KeyCode::Enter => {
                    let family = Family::ALL[*selected];
                    // A new menu session starts from the configured pacing and mute
                    self.session.reset();
                    self.status_message = format!("{}: pick an algorithm", family.name());
                    self.screen = Screen::Algorithms {
                        family,
                        selected: 0,
                    };
                }
                KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            Screen::Algorithms { family, selected } => {
                let count = family.algorithms().count();
                match key.code {
                    KeyCode::Up => *selected = (*selected + count - 1) % count,
                    KeyCode::Down => *selected = (*selected + 1) % count,
                    KeyCode::Enter => {
                        if let Some(algorithm) = family.algorithms().nth(*selected) {
                            if algorithm.needs_target() {
                                self.status_message = "Type a target".to_string();
                                self.screen = Screen::Target {
                                    algorithm,
                                    input: String::new(),
                                };
                            } else {
                                self.start_run(algorithm, None);
                            }
                        }
                    }
                    KeyCode::Esc => {
                        let selected = Family::ALL.iter().position(|f| *f == *family).unwrap_or(0);
                        self.status_message = "Pick an algorithm family".to_string();
                        self.screen = Screen::Families { selected };
                    }
                    _ => {}
                }
            }
            Screen::Target { algorithm, input } => match key.code {
                KeyCode::Char(c @ '0'..='9') if input.len() < 9 => input.push(c),
                KeyCode::Char('-') if input.is_empty() => input.push('-'),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Enter => match input.parse::<i64>() {
                    Ok(target) => {
                        let algorithm = *algorithm;
                        self.start_run(algorithm, Some(target));
                    }
                    Err(_) => self.status_message = "Enter a whole number".to_string(),
                },
                KeyCode::Esc => {
                    let algorithm = *algorithm;
                    self.back_to_algorithms(algorithm.family(), algorithm);
                }
                _ => {}
            },
            Screen::Run(view) => match key.code {
                KeyCode::Char(c @ '1'..='3') => {
                    if let Some(tier) = SpeedTier::from_key(c) {
                        self.session.pacing.set_tier(tier);
                        self.status_message = format!("Speed: {}", tier);
                    }
                }
                KeyCode::Char('m') | KeyCode::Char('M') => {
                    let muted = self.session.toggle_mute();
                    self.status_message = if muted { "Muted" } else { "Sound on" }.to_string();
                }
                KeyCode::Char(' ') => {
                    view.is_playing = !view.is_playing;
                    view.last_step = Instant::now();
                    self.status_message = if view.is_playing { "Playing..." } else { "Paused" }.to_string();
                }
                KeyCode::Right => {
                    view.is_playing = false;
                    self.status_message = match view.player.step_forward() {
                        Ok(frame) => frame.message.clone(),
                        Err(err) => format!("Cannot step forward: {}", err),
                    };
                }
                KeyCode::Left => {
                    view.is_playing = false;
                    self.status_message = match view.player.step_backward() {
                        Ok(frame) => frame.message.clone(),
                        Err(err) => format!("Cannot step backward: {}", err),
                    };
                }
                KeyCode::Enter => {
                    view.is_playing = false;
                    self.status_message = match view.player.jump_to_end() {
                        Ok(_) => "Jumped to end".to_string(),
                        Err(err) => format!("Error: {}", err),
                    };
                }
                KeyCode::Backspace => {
                    view.is_playing = false;
                    self.status_message = match view.player.rewind_to_start() {
                        Ok(_) => "Jumped to start".to_string(),
                        Err(err) => format!("Cannot rewind: {}", err),
                    };
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    let (algorithm, target) = (view.algorithm, view.target);
                    self.start_run(algorithm, target);
                }
                KeyCode::Esc => {
                    view.player.request_quit();
                    let algorithm = view.algorithm;
                    self.back_to_algorithms(algorithm.family(), algorithm);
                }
                _ => {}
            },
        }
    }

    fn back_to_algorithms(&mut self, family: Family, algorithm: Algorithm) {
        let selected = family.algorithms().position(|a| a == algorithm).unwrap_or(0);
        self.status_message = format!("{}: pick an algorithm", family.name());
        self.screen = Screen::Algorithms { family, selected };
    }

    /// Build a fresh source and start playing it
    fn start_run(&mut self, algorithm: Algorithm, target: Option<i64>) {
        match algorithm.source(&self.scenario, target) {
            Ok(source) => {
                let player = Player::new(source, self.session.begin_run(), self.history_limit);
                self.status_message = format!("Running {}", algorithm.name());
                self.screen = Screen::Run(RunView {
                    algorithm,
                    target,
                    player,
                    is_playing: true,
                    last_step: Instant::now()
                        .checked_sub(Duration::from_secs(1))
                        .unwrap_or(Instant::now()),
                });
            }
            Err(err) => {
                tracing::warn!(%err, algorithm = algorithm.slug(), "could not start run");
                self.status_message = format!("Error: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Silent;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_rewind_before_first_frame_reports_error() {
        let mut app = App::new(&Config::default(), Box::new(Silent));
        app.start_run(Algorithm::BubbleSort, None);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.status_message, "Cannot rewind: already at the first frame");

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.status_message, "Jumped to start");
        let Screen::Run(view) = &app.screen else {
            panic!("expected a run screen");
        };
        assert_eq!(view.player.position(), Some(0));
    }
}
