mod app;
mod context;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod playback;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use context::PageContext;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{ColorTheme, QueueVariant, TaskList};
use persistence::{
    config_file, ensure_dir, get_data_dir, init_local_data_dir, load_config, log_file, save_config,
    AppConfig, JsonFileStore, SharedStore,
};
use playback::{probe_player_api, MpvFactory, QueueController};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "satori")]
#[command(about = "A calm, terminal-based focus dashboard with an interval timer, tasks and music", long_about = None)]
struct Cli {
    /// Use this data directory instead of the nearest .satori directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .satori directory in the current directory
    Init,
    /// Append a YouTube link to the music or movie queue
    Add {
        /// Queue to add to: music or movies
        queue: QueueVariant,
        /// YouTube link
        url: String,
    },
    /// Add a task to the checklist
    Task {
        /// Task text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Set the colour theme
    Theme {
        /// Theme name, e.g. green, indigo, stone
        name: ColorTheme,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_data_dir()?;
            let config_path = config_file(&data_dir);
            if !config_path.exists() {
                save_config(&config_path, &AppConfig::default())?;
            }
            println!("Initialized satori directory: {}", data_dir.display());
            println!();
            println!("Satori will now keep its settings, tasks and queues here.");
            println!("Run 'satori' to open the dashboard.");
            Ok(())
        }
        Some(Commands::Add { queue, url }) => {
            let data_dir = resolve_data_dir(cli.data_dir)?;
            let config = load_config(config_file(&data_dir))?;
            let store = open_store(&data_dir)?;
            let factory = Rc::new(MpvFactory::new(config.player_command.clone()));

            let mut controller = QueueController::new(queue, store, factory, config.default_volume);
            controller.add_item(&url)?;
            println!("Added to {} queue ({} items)", queue.name(), controller.len());
            Ok(())
        }
        Some(Commands::Task { text }) => {
            let data_dir = resolve_data_dir(cli.data_dir)?;
            let mut tasks = TaskList::load(open_store(&data_dir)?);
            let task = tasks.add(&text.join(" "))?;
            println!("Added task: {}", task.text);
            Ok(())
        }
        Some(Commands::Theme { name }) => {
            let data_dir = resolve_data_dir(cli.data_dir)?;
            let ctx = PageContext::load(open_store(&data_dir)?);
            ctx.set_theme(name);
            println!("Theme set to {}", name);
            Ok(())
        }
        None => {
            let data_dir = resolve_data_dir(cli.data_dir)?;
            run_tui(&data_dir)
        }
    }
}

fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => ensure_dir(dir),
        None => ensure_dir(get_data_dir()?),
    }
}

fn open_store(data_dir: &Path) -> Result<SharedStore> {
    let store = JsonFileStore::open(data_dir)
        .with_context(|| format!("Failed to open store in {}", data_dir.display()))?;
    Ok(Rc::new(store))
}

fn run_tui(data_dir: &Path) -> Result<()> {
    let config = load_config(config_file(data_dir))?;
    logging::init_logging(&log_file(data_dir))?;
    tracing::info!("Using data directory {}", data_dir.display());

    let store = open_store(data_dir)?;
    let factory = Rc::new(MpvFactory::new(config.player_command.clone()));
    let chime = notifications::build_chime(&config.chime_command);
    let mut app = AppState::new(store, &config, factory, chime);

    probe_player_api(&app.ctx, &config.player_command);
    app.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Stop every player before handing the terminal back
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!("Dashboard exited with error: {:#}", err);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}
