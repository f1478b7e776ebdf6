use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use range_trainer::config::{Pacing, TrainerConfig};
use range_trainer::drill::DrillSettings;
use range_trainer::storage::{load_ranges, FileStore, Persister};
use range_trainer::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::error::Error;
use std::io::{self, IsTerminal, Stdout};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "range-trainer", version)]
#[command(about = "Edit preflop range charts and drill them at a six-max table")]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory where ranges are stored
    #[arg(long)]
    storage_dir: Option<PathBuf>,
    /// Seed for reproducible deals
    #[arg(long)]
    seed: Option<u64>,
    /// Log file (default: range-trainer.log in the storage directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// off, error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,
    /// Skip the pacing delays between practice steps
    #[arg(long)]
    fast: bool,
}

impl Cli {
    fn into_config(self) -> Result<TrainerConfig, Box<dyn Error>> {
        let mut cfg = match &self.config {
            Some(path) => TrainerConfig::load(path)?,
            None => TrainerConfig::default(),
        };
        if let Some(dir) = self.storage_dir {
            cfg.storage_dir = dir;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if self.log_file.is_some() {
            cfg.log_file = self.log_file;
        }
        if let Some(level) = self.log_level {
            cfg.log_level = level;
        }
        if self.fast {
            cfg.pacing = Pacing::instant();
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cfg = Cli::parse().into_config()?;
    if !io::stdout().is_terminal() {
        println!(
            "range-trainer requires a real terminal (TTY).\nRun in Terminal and press q to quit. Version: {}",
            range_trainer::VERSION
        );
        return Ok(());
    }
    range_trainer::logging::init(&cfg.log_path(), cfg.level_filter()?)?;

    let store = FileStore::new(&cfg.storage_dir);
    let ranges = load_ranges(&store);
    let persister = Persister::spawn(store, cfg.persist_debounce())?;
    let mut app = AppState::new(ranges, Some(persister), DrillSettings::from(&cfg));

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(50);
    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    app.shutdown();
    log::info!("ranges flushed, exiting");
    res?;
    Ok(())
}
