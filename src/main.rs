mod app;
mod domain;
mod error;
mod input;
mod persistence;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{
    calendar_projection, detail_panel, list_projection, DetailPanel, ListView, Projection, TaskId, YearMonth,
};
use persistence::{
    config_file, ensure_dir, get_data_dir, init_local_data_dir, load_config, log_file, save_config, AppConfig,
    BlobStore, FileBlobStore, MemoryBlobStore, TaskStore,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long to wait for a key before re-checking the date
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "haru")]
#[command(about = "A terminal to-do manager with a chronological list and a month calendar", long_about = None)]
struct Cli {
    /// Use this data directory instead of ./.haru or ~/.haru
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep tasks in memory only; nothing is written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    /// View to open the terminal UI in (list or calendar)
    #[arg(long)]
    view: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .haru directory in the current directory
    Init,
    /// Add a task
    Add {
        text: String,
        /// Target date (YYYY-MM-DD). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Print all tasks sorted by date
    List,
    /// Print a month grid
    Calendar {
        /// Month to show (YYYY-MM). Defaults to the current month.
        #[arg(short, long)]
        month: Option<String>,
        /// Also list the tasks of this day (YYYY-MM-DD)
        #[arg(short, long)]
        select: Option<String>,
    },
    /// Toggle completion of a task
    Toggle { id: i64 },
    /// Delete a task
    Remove {
        id: i64,
        /// Confirm the deletion; without it nothing is removed
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let data_dir = init_local_data_dir()?;
        save_config(config_file(&data_dir), &AppConfig::default())?;
        println!("Initialized haru directory: {}", data_dir.display());
        println!();
        println!("haru will now use this local directory for task storage.");
        println!("Run 'haru' to open your tasks.");
        return Ok(());
    }

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => get_data_dir()?,
    };
    ensure_dir(&data_dir)?;
    init_logging(&data_dir)?;

    let config = load_config(config_file(&data_dir))?;
    let blob: Box<dyn BlobStore> = if cli.ephemeral {
        Box::new(MemoryBlobStore::new())
    } else {
        Box::new(FileBlobStore::new(&data_dir))
    };
    let store = TaskStore::load(blob, &config.storage_key);
    let today = chrono::Local::now().date_naive();
    let mut app = AppState::new(store, today);

    match cli.command {
        None => {
            let start_view = match cli.view.as_deref() {
                Some(name) => Projection::from_name(name)
                    .with_context(|| format!("Unknown view '{}'. Use list or calendar", name))?,
                None => config.start_view,
            };
            eprintln!("Using haru directory: {}", data_dir.display());
            app.switch_view(start_view);
            run_tui(&mut app)
        }
        Some(command) => run_command(&mut app, command),
    }
}

/// Route tracing output to <data_dir>/haru.log; the terminal belongs to the UI
fn init_logging(data_dir: &Path) -> Result<()> {
    let path = log_file(data_dir);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn run_command(app: &mut AppState, command: Commands) -> Result<()> {
    match command {
        // Handled in main before the store is opened
        Commands::Init => {}
        Commands::Add { text, date } => {
            let id = app.add_task(&text, date.as_deref().unwrap_or(""))?;
            println!("Added task {}", id);
        }
        Commands::List => match list_projection(app.store.tasks()) {
            ListView::Empty { message } => println!("{}", message),
            ListView::Rows(rows) => {
                for row in rows {
                    let check = if row.completed { "[✓]" } else { "[ ]" };
                    println!("{:>15}  {} {}  ({})", row.id.0, check, row.text, row.date_label);
                }
            }
        },
        Commands::Calendar { month, select } => {
            let month = match month {
                Some(s) => YearMonth::parse(&s)
                    .with_context(|| format!("Invalid month '{}'. Use YYYY-MM", s))?,
                None => YearMonth::of(app.today),
            };
            let selected = select.as_deref().map(app::parse_date_input).transpose()?.flatten();
            print_calendar(app, month, selected);
        }
        Commands::Toggle { id } => {
            if app.toggle_complete(TaskId(id))? {
                let completed = app.store.get(TaskId(id)).map(|t| t.completed).unwrap_or_default();
                println!("Task {} is now {}", id, if completed { "done" } else { "open" });
            } else {
                println!("No task with id {}", id);
            }
        }
        Commands::Remove { id, yes } => {
            let id = TaskId(id);
            let Some(pending) = app.request_delete(id).cloned() else {
                println!("No task with id {}", id);
                return Ok(());
            };
            if yes {
                app.confirm_delete(id)?;
                println!("Removed \"{}\"", pending.text);
            } else {
                app.decline_delete();
                println!("{} \"{}\" (pass --yes to confirm)", app::DELETE_PROMPT, pending.text);
            }
        }
    }
    Ok(())
}

/// Plain-text rendering of the calendar projection
fn print_calendar(app: &AppState, month: YearMonth, selected: Option<chrono::NaiveDate>) {
    let view = calendar_projection(app.store.tasks(), month, selected);

    println!("{}", view.title);
    println!("{}", view.headers.map(|h| format!("{:^5}", h)).join(""));
    for week in view.weeks() {
        let line: String = week
            .iter()
            .map(|cell| {
                let marker = match (cell.selected, cell.in_month) {
                    (true, _) => '*',
                    (false, false) => '.',
                    (false, true) => ' ',
                };
                let count = cell.summaries.len() + cell.more.unwrap_or(0);
                if count > 0 {
                    format!("{}{:>2}({})", marker, cell.day, count)
                } else {
                    format!("{}{:>2}   ", marker, cell.day)
                }
            })
            .collect();
        println!("{}", line);
    }

    if selected.is_some() {
        println!();
        match detail_panel(app.store.tasks(), selected) {
            DetailPanel::NoSelection { message } => println!("{}", message),
            DetailPanel::Empty { heading, message } => {
                println!("{}", heading);
                println!("  {}", message);
            }
            DetailPanel::Tasks { heading, rows } => {
                println!("{}", heading);
                for row in rows {
                    let check = if row.completed { "[✓]" } else { "[ ]" };
                    println!("  {} {}  #{}", check, row.text, row.id);
                }
            }
        }
    }
}

fn run_tui(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "terminal UI stopped");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        app.refresh_today(chrono::Local::now().date_naive());

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }
    }
}
