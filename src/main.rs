use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, error, info};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use term_snake::config::AppConfig;
use term_snake::console::{self, CrosstermConsole};
use term_snake::modes::HumanMode;
use term_snake::render::{GlyphStyle, required_size};

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Snake for the terminal")]
struct Cli {
    /// JSON config file; command-line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds per tick
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Drawing style
    #[arg(long, value_enum)]
    glyphs: Option<GlyphStyle>,

    /// File holding the high score
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Don't read or write the high score
    #[arg(long)]
    no_high_score: bool,

    /// Log file (the terminal is taken by the game)
    #[arg(long, default_value = "term_snake.log")]
    log_file: PathBuf,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(width) = self.width {
            config.game.grid_width = width;
        }
        if let Some(height) = self.height {
            config.game.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.game.tick_interval_ms = tick_ms;
        }
        if let Some(glyphs) = self.glyphs {
            config.glyphs = glyphs;
        }
        if let Some(path) = &self.high_score_file {
            config.high_score_file = path.clone();
        }
        if self.no_high_score {
            config.persist_high_score = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level, Config::default(), file).context("Failed to set up logging")?;
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.app_config()?;
    info!("Starting with {:?}", config);

    let console = CrosstermConsole::open(config.glyphs, required_size(&config.game))?;
    let mut human_mode = HumanMode::new(config.game.clone(), console, config.high_score_store());
    human_mode.run()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("term_snake: {:#}", e);
        return ExitCode::FAILURE;
    }

    // The console is dropped inside run(), so the terminal is back to normal here
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("term_snake: {:#}", e);
            ExitCode::from(console::exit_code(&e))
        }
    }
}
