mod app;
mod cli;
mod command;
mod config;
mod consts;
mod game;
mod util;
use crate::app::App;
use crate::cli::{Arguments, Invocation};
use crate::config::{Config, ConfigError};
use crate::game::Game;
use anyhow::Context;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use log::{info, warn, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("autosnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = match Invocation::from_env()? {
        Invocation::Run(args) => args,
        Invocation::Help => {
            print!("{}", cli::USAGE);
            return Ok(());
        }
        Invocation::Version => {
            println!("{}", cli::VERSION);
            return Ok(());
        }
    };
    let config = load_config(&args)?;
    let mut settings = config.settings();
    if let Some(autopilot) = args.autopilot {
        settings.autopilot = autopilot;
    }
    init_logging(
        args.log_file.or(config.log.file),
        args.log_level.unwrap_or(config.log.level),
    )?;
    let rng = match args.seed {
        Some(seed) => {
            info!("Seeding food placement with {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    let game = Game::new(settings, rng);

    // Ask before entering the alternate screen, since the query temporarily
    // switches the terminal in and out of raw mode
    let enhanceable = matches!(supports_keyboard_enhancement(), Ok(true));
    let terminal = ratatui::init();
    let key_releases = enhanceable && enable_key_releases();
    let r = App::new(game, key_releases).run(terminal);
    if key_releases {
        if let Err(e) = execute!(io::stdout(), PopKeyboardEnhancementFlags) {
            warn!("Failed to restore keyboard reporting mode: {e}");
        }
    }
    ratatui::restore();
    match r {
        Ok(Some(best)) => {
            println!("Best score: {best}");
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e).context("terminal I/O failed"),
    }
}

fn load_config(args: &Arguments) -> anyhow::Result<Config> {
    let r = match args.config {
        Some(ref path) => Config::load(path, false),
        None => match Config::default_path() {
            Ok(path) => Config::load(&path, true),
            Err(ConfigError::NoPath) => Ok(Config::default()),
            Err(e) => Err(e),
        },
    };
    r.context("failed to load configuration")
}

/// Send log messages to `file` if one was given.  Logging to the terminal
/// would garble the game display.
fn init_logging(file: Option<PathBuf>, level: LevelFilter) -> anyhow::Result<()> {
    let Some(path) = file else {
        return Ok(());
    };
    let fp = fs_err::File::create(path).context("failed to open log file")?;
    let cfg = simplelog::ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    simplelog::WriteLogger::init(level, cfg, fp).context("failed to initialize logging")?;
    Ok(())
}

/// Ask the terminal to report key releases, which boost needs in order to
/// stop when the space bar is let go.  Returns whether this succeeded.
fn enable_key_releases() -> bool {
    execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok()
}
