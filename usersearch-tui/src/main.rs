mod ui;

use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, EventStream};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};

use clap::Parser;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use tui::backend::CrosstermBackend;
use tui::Terminal;

use usersearch_app::Settings;
use usersearch_records::UserDirectory;

use crate::ui::{AppInterface, TuiError};

#[derive(Parser)]
#[clap(version = "0.1", about = "Search users and collect them as tags")]
struct Opts {
    /// Settings file to read instead of the one in the config directory.
    #[clap(short, long)]
    settings: Option<PathBuf>,
    /// User list to suggest from, in place of the bundled one.
    #[clap(short, long)]
    users: Option<PathBuf>,
    /// Directory for log files.
    #[clap(long)]
    log_dir: Option<PathBuf>,
    /// Name shown in the frame title.
    #[clap(short, long, default_value = "Users")]
    name: String,
    /// Print the effective settings as TOML and exit.
    #[clap(long)]
    print_settings: bool,
    /// Save the effective settings to the settings file and exit.
    #[clap(long)]
    save_settings: bool,
}

/// Logs go to a file: the terminal belongs to the interface.
fn init_logging(log_dir: Option<PathBuf>) -> WorkerGuard {
    let log_dir = log_dir
        .or_else(|| {
            dirs::data_local_dir().map(|mut path| {
                path.push("usersearch/logs");
                path
            })
        })
        .unwrap_or_else(|| PathBuf::from("."));
    let file_appender = tracing_appender::rolling::daily(log_dir, "usersearch.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn load_settings(path: Option<&PathBuf>) -> Settings {
    match path {
        Some(path) => match Settings::open(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::info!("Using default settings, {} unusable: {}", path.display(), e);
                Settings::default()
            }
        },
        None => Settings::default(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), TuiError> {
    let Opts {
        settings,
        users,
        log_dir,
        name,
        print_settings,
        save_settings,
    } = Opts::parse();

    let _log_guard = init_logging(log_dir);
    let settings_path = settings.or_else(Settings::default_path);
    let mut settings = load_settings(settings_path.as_ref());
    if let Some(users) = users {
        settings.data_settings.file = Some(users);
    }

    if print_settings {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    if save_settings {
        return match settings_path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                settings.write(&path)?;
                tracing::info!("Saved settings to {}", path.display());
                Ok(())
            }
            None => {
                eprintln!("No settings location, pass one with --settings");
                Ok(())
            }
        };
    }

    let directory = match &settings.data_settings.file {
        Some(path) => UserDirectory::open(path),
        None => UserDirectory::bundled(),
    };
    let directory = match directory {
        Ok(directory) => Arc::new(directory),
        Err(e) => {
            tracing::error!("Can not start without user data: {}", e);
            eprintln!("{}", e);
            return Err(e.into());
        }
    };

    // Goes before due to lifetime issues.
    let stdout = stdout();

    let backend = CrosstermBackend::new(&stdout);
    let mut terminal = Terminal::new(backend)?;
    crossterm::terminal::enable_raw_mode()?;
    execute!(
        &stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        cursor::Hide
    )?;

    let mut app = AppInterface::new(
        name,
        settings.interface_style,
        directory,
        settings.popup_settings,
        EventStream::new(),
    );
    let r = app.run(&mut terminal).await;
    drop(app);

    execute!(
        &stdout,
        cursor::Show,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    crossterm::terminal::disable_raw_mode()?;
    r
}
