use clap::Parser;
use std::io;
use std::path::PathBuf;

use todo_cli::{session, Config};
use todo_core::{RemoteStore, SyncController, TodoClient, UreqTransport};

#[derive(Parser)]
#[command(name = "todo")]
#[command(version)]
#[command(about = "A todo list backed by a remote todo service", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Base URL of the todo service
    #[arg(long)]
    base_url: Option<String>,

    /// User to select on startup
    #[arg(long, short)]
    user: Option<String>,

    /// Per-request timeout in seconds (0 disables it)
    #[arg(long)]
    timeout: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_cli=warn,todo_core=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration, then let flags win
    let mut config = Config::load(cli.config)?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(user) = cli.user {
        config.username = Some(user);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    tracing::debug!(?config, "configuration resolved");

    let store = RemoteStore::new(
        TodoClient::new(&config.base_url),
        UreqTransport::new(config.timeout()),
    );
    let mut controller = SyncController::new(store);

    if let Some(name) = config.username.as_deref() {
        if !controller.select_or_create_user(name) {
            eprintln!("Could not select user '{}', continuing without one", name);
        }
    }

    session::run(&mut controller, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
