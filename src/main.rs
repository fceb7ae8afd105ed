// stepviz: step-by-step algorithm visualizer for the terminal

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use stepviz::catalog::{Algorithm, Scenario};
use stepviz::config::Config;
use stepviz::frame::history::DEFAULT_HISTORY_LIMIT;
use stepviz::pacing::SpeedTier;
use stepviz::session::{drive, Bell, Session, Silent, SoundSink, TextRenderer};
use stepviz::ui::App;

#[derive(Parser, Debug)]
#[command(name = "stepviz", version, about = "Watch classic algorithms run one step at a time")]
struct Cli {
    /// Starting speed tier.
    #[arg(long, value_enum, default_value_t = SpeedChoice::Medium)]
    speed: SpeedChoice,

    /// Start with sound cues muted.
    #[arg(long)]
    mute: bool,

    /// Seed for the generated arrays, graph and distance matrix.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Run one algorithm without the TUI, printing each frame (e.g. `bubble`, `dijkstra`, `n-queens`).
    #[arg(long, value_name = "ALGORITHM", value_parser = parse_algorithm)]
    headless: Option<Algorithm>,

    /// Search target for `linear` and `binary`.
    #[arg(long, allow_negative_numbers = true)]
    target: Option<i64>,

    /// Skip pacing delays in headless mode.
    #[arg(long)]
    no_delay: bool,

    /// Also print cosmetic (animation) frames in headless mode.
    #[arg(long)]
    show_cosmetic: bool,

    /// Frame history budget in MiB.
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT / (1024 * 1024))]
    history_mb: usize,

    /// Write logs to this file (the TUI otherwise logs nothing).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SpeedChoice {
    Slow,
    Medium,
    Fast,
}

impl From<SpeedChoice> for SpeedTier {
    fn from(choice: SpeedChoice) -> Self {
        match choice {
            SpeedChoice::Slow => SpeedTier::Slow,
            SpeedChoice::Medium => SpeedTier::Medium,
            SpeedChoice::Fast => SpeedTier::Fast,
        }
    }
}

fn parse_algorithm(s: &str) -> Result<Algorithm, String> {
    s.parse::<Algorithm>().map_err(|_| {
        let known: Vec<&str> = Algorithm::ALL.iter().map(|a| a.slug()).collect();
        format!("unknown algorithm '{}' (expected one of: {})", s, known.join(", "))
    })
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            speed: self.speed.into(),
            muted: self.mute,
            seed: self.seed,
            history_limit: self.history_mb.saturating_mul(1024 * 1024),
            no_delay: self.no_delay,
        }
    }
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(false);

    match (&cli.log_file, cli.headless.is_some()) {
        (Some(path), _) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .init(),
        (None, true) => builder.with_writer(io::stderr).init(),
        // Logging to the terminal would draw over the TUI
        (None, false) => {}
    }
    Ok(())
}

fn run_headless(algorithm: Algorithm, cli: &Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::seeded(config.seed);
    let mut source = algorithm.source(&scenario, cli.target)?;
    let session = Session::new(config);
    let mut run = session.begin_run();

    let stdout = io::stdout();
    let mut renderer = TextRenderer::new(stdout.lock()).show_cosmetic(cli.show_cosmetic);
    let mut sound: Box<dyn SoundSink> = if config.muted {
        Box::new(Silent)
    } else {
        Box::new(Bell::new(io::stderr()))
    };

    let no_delay = config.no_delay;
    let summary = drive(
        source.as_mut(),
        &session,
        &mut run,
        &mut renderer,
        sound.as_mut(),
        |dwell: Duration| {
            if !no_delay {
                std::thread::sleep(dwell);
            }
        },
    );

    if summary.render_failures > 0 {
        eprintln!("Warning: {} frame(s) failed to render", summary.render_failures);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    let config = cli.config();

    if let Some(algorithm) = cli.headless {
        if let Err(e) = run_headless(algorithm, &cli, &config) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(&config, Box::new(Bell::new(io::stdout())));
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
