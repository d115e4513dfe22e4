mod api;
mod app;
mod config;
mod domain;
mod input;
mod logging;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use api::{Completion, Dispatcher, HttpTodoApi};
use app::AppState;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use clap::{Parser, Subcommand};
use config::Settings;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{completion_box, filter_tasks, format_deadline, EditSession, FilterMode, Task, TaskId, TaskStore, Theme};
use input::KeyOutcome;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::UnboundedReceiver;

const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Parser)]
#[command(name = "tododeck")]
#[command(about = "A terminal client for a remote to-do list", long_about = None)]
struct Cli {
    /// Server base URL, overriding the settings file
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Settings file. Defaults to <config dir>/tododeck/config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default settings file
    Init,
    /// Print the task list
    List {
        #[arg(short, long, value_enum, default_value_t = FilterMode::All)]
        filter: FilterMode,
    },
    /// Create a task
    Add {
        #[arg(short, long)]
        title: String,
        /// Deadline in local time (YYYY-MM-DD HH:MM)
        #[arg(short, long)]
        deadline: String,
    },
    /// Flip the completed flag of a task
    Toggle { id: TaskId },
    /// Delete a task
    Remove { id: TaskId },
    /// Change title, deadline or completion of a task
    Edit {
        id: TaskId,
        #[arg(short, long)]
        title: Option<String>,
        /// Deadline in local time (YYYY-MM-DD HH:MM)
        #[arg(short, long)]
        deadline: Option<String>,
        #[arg(short, long, action = clap::ArgAction::Set)]
        completed: Option<bool>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_path = match cli.config {
        Some(path) => path,
        None => config::settings_file()?,
    };

    if let Some(Commands::Init) = cli.command {
        let settings = config::init_settings(&settings_path)?;
        println!("Wrote settings: {}", settings_path.display());
        println!("API: {}", settings.api_base_url);
        return Ok(());
    }

    let mut settings = config::load_settings(&settings_path)?;
    if let Some(url) = cli.api_url {
        settings.api_base_url = url;
    }

    match cli.command {
        None => run_tui(&settings),
        Some(command) => {
            logging::init_stderr_logging(&settings.log_filter)?;
            run_command(&settings, command)
        }
    }
}

fn build_api(settings: &Settings) -> Result<HttpTodoApi> {
    HttpTodoApi::new(&settings.api_base_url, settings.request_timeout())
        .with_context(|| format!("Failed to set up API client for {}", settings.api_base_url))
}

fn build_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

/// Parse a local "YYYY-MM-DD HH:MM" deadline
fn parse_deadline(input: &str) -> Result<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(input.trim(), DEADLINE_FORMAT)
        .with_context(|| format!("Invalid deadline '{}'. Use YYYY-MM-DD HH:MM", input))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("Deadline '{}' does not exist in the local time zone", input))
}

fn print_task(task: &Task) {
    println!(
        "{:>6}  {}  {:<40}  {}",
        task.id.to_string(),
        completion_box(task),
        task.title,
        format_deadline(task.deadline)
    );
}

/// One-shot subcommands over the same store operations the TUI uses
fn run_command(settings: &Settings, command: Commands) -> Result<()> {
    let api = build_api(settings)?;
    let runtime = build_runtime()?;
    let mut store = TaskStore::new();

    runtime.block_on(async {
        match command {
            // Handled before settings are loaded
            Commands::Init => {}
            Commands::List { filter } => {
                store.load(&api).await?;
                for task in filter_tasks(store.tasks(), filter) {
                    print_task(task);
                }
            }
            Commands::Add { title, deadline } => {
                let deadline = parse_deadline(&deadline)?;
                let task = store.add(&api, &title, Some(deadline)).await?;
                print_task(task);
            }
            Commands::Toggle { id } => {
                store.load(&api).await?;
                match store.toggle_completion(&api, &id).await? {
                    Some(task) => print_task(task),
                    None => println!("No task with id {}", id),
                }
            }
            Commands::Remove { id } => {
                store.remove(&api, &id).await?;
                println!("Removed task {}", id);
            }
            Commands::Edit {
                id,
                title,
                deadline,
                completed,
            } => {
                store.load(&api).await?;
                let task = store
                    .get(&id)
                    .with_context(|| format!("No task with id {}", id))?
                    .clone();

                let mut session = EditSession::default();
                session.begin_edit(&task);
                if let Some(draft) = session.draft_mut() {
                    if let Some(title) = title {
                        draft.title = title;
                    }
                    if let Some(deadline) = deadline {
                        draft.deadline = Some(parse_deadline(&deadline)?);
                    }
                    if let Some(completed) = completed {
                        draft.completed = completed;
                    }
                }

                store.commit_edit(&api, &mut session).await?;
                if let Some(task) = store.get(&id) {
                    print_task(task);
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    })
}

fn run_tui(settings: &Settings) -> Result<()> {
    let log_path = config::log_file()?;
    logging::init_file_logging(&log_path, &settings.log_filter)?;
    tracing::info!("starting against {}", settings.api_base_url);

    let runtime = build_runtime()?;
    let api = Arc::new(build_api(settings)?);
    let (dispatcher, mut completions) = Dispatcher::new(api, runtime.handle().clone());

    // Create app state
    let mut app = AppState::new(
        Theme::from_dark_mode(settings.dark_mode),
        settings.separate_time_step,
    );
    dispatcher.send(app.request_load());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, &dispatcher, &mut completions);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!("exiting with error: {:#}", err);
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    dispatcher: &Dispatcher,
    completions: &mut UnboundedReceiver<Completion>,
) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        ticker::drain_completions(completions, app);

        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout so completions keep flowing
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    match input::handle_key(app, key, Local::now()) {
                        KeyOutcome::Quit => return Ok(()),
                        KeyOutcome::Dispatch(request) => dispatcher.send(request),
                        KeyOutcome::Continue => {}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_deadline() {
        let deadline = parse_deadline(" 2024-03-01 14:30 ").unwrap();
        assert_eq!(deadline.naive_local().to_string(), "2024-03-01 14:30:00");
        assert_eq!(deadline.second(), 0);
    }

    #[test]
    fn test_parse_deadline_rejects_garbage() {
        assert!(parse_deadline("tomorrow").is_err());
        assert!(parse_deadline("2024-03-01").is_err());
    }

    #[test]
    fn test_cli_parses_edit() {
        let cli = Cli::try_parse_from([
            "tododeck",
            "--api-url",
            "http://localhost:8000",
            "edit",
            "7",
            "--title",
            "Renamed",
            "--completed",
            "true",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8000"));
        match cli.command {
            Some(Commands::Edit { id, title, deadline, completed }) => {
                assert_eq!(id, TaskId::Number(7));
                assert_eq!(title.as_deref(), Some("Renamed"));
                assert!(deadline.is_none());
                assert_eq!(completed, Some(true));
            }
            _ => panic!("expected edit"),
        }
    }

    #[test]
    fn test_cli_parses_numeric_toggle_id() {
        let cli = Cli::try_parse_from(["tododeck", "toggle", "7"]).unwrap();
        match cli.command {
            Some(Commands::Toggle { id }) => assert_eq!(id, TaskId::Number(7)),
            _ => panic!("expected toggle"),
        }

        let cli = Cli::try_parse_from(["tododeck", "remove", "abc"]).unwrap();
        match cli.command {
            Some(Commands::Remove { id }) => assert_eq!(id, TaskId::Text("abc".to_string())),
            _ => panic!("expected remove"),
        }
    }

    #[test]
    fn test_cli_parses_list_filter() {
        let cli = Cli::try_parse_from(["tododeck", "list", "--filter", "pending"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { filter: FilterMode::Pending })));

        let cli = Cli::try_parse_from(["tododeck"]).unwrap();
        assert!(cli.command.is_none());
    }
}
