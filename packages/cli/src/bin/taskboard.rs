use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;
use taskboard_cli::config::parse_tick_rate;
use taskboard_cli::{init_logging, install_panic_hook, Config, LogTarget};
use tracing::{error, info};

mod cli;

use cli::tasks::TasksCommands;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Taskboard - terminal task manager")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface (default)
    Tui {
        /// Tick rate in milliseconds
        #[arg(long)]
        tick_rate: Option<String>,
    },
    /// Write a JSON backup of all stored data
    Export {
        /// Directory for the backup file
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// List registered users
    Users,
    /// Manage tasks without the TUI
    #[command(subcommand)]
    Tasks(TasksCommands),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Configuration error:".red().bold(), e);
            process::exit(1);
        }
    };

    let command = cli.command.unwrap_or(Commands::Tui { tick_rate: None });
    let target = match command {
        Commands::Tui { .. } => LogTarget::File(config.log_file()),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = init_logging(&config.log_filter, target.clone()) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }
    install_panic_hook(&target);

    if let Err(e) = run_command(command, config).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Tui { tick_rate } => start_tui(config, tick_rate).await,
        Commands::Export { output_dir } => cli::data::export(&config, output_dir),
        Commands::Users => cli::data::list_users(&config),
        Commands::Tasks(tasks_cmd) => cli::tasks::handle_tasks_command(&config, tasks_cmd),
    }
}

async fn start_tui(mut config: Config, tick_rate: Option<String>) -> anyhow::Result<()> {
    use crossterm::{execute, terminal};

    if let Some(raw) = tick_rate {
        config.tick_rate = parse_tick_rate(&raw)?;
    }
    info!("Starting taskboard TUI with data in {}", config.data_dir.display());

    let mut app = match taskboard_tui::App::initialize(config.app_config()) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize taskboard: {}", e);
            eprintln!("{} {}", "Failed to initialize taskboard:".red().bold(), e);
            eprintln!("{} {}", "Details in".dimmed(), config.log_file().display());
            process::exit(1);
        }
    };

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let result = app.run(&mut terminal, config.tick_rate).await;

    // Always restore terminal, even if there was an error
    let cleanup_result = (|| -> anyhow::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    })();

    if let Err(cleanup_error) = cleanup_result {
        eprintln!("Terminal cleanup error: {}", cleanup_error);
    }

    result
}
