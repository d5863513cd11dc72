//! Content Studio - preview harness for the content creator screen
//!
//! Seeds the session controller from fixture data and drives it from stdin
//! or a command script.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use content_studio::config::Config;
use content_studio::controller::SessionController;
use content_studio::error::StudioError;
use content_studio::fixtures::FixtureData;
use content_studio::model::SessionStatus;
use content_studio::notify::create_notifier;
use content_studio::repl::{self, Command};
use content_studio::studio::{Studio, StudioHandle};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file (defaults to the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fixture JSON to seed the session from
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Simulated generation delay in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Reject unknown voice clone and template ids
    #[arg(long)]
    strict: bool,

    /// Notifier backend (log, console)
    #[arg(long)]
    notifier: Option<String>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    apply_overrides(&mut config, &args);

    // Setup logging
    let level = if args.verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🎬 Content Studio v{} starting...", env!("CARGO_PKG_VERSION"));

    let fixture = match &config.fixture_path {
        Some(path) => FixtureData::load(path)?,
        None => FixtureData::builtin()?,
    };

    let controller = SessionController::new(fixture, &config);
    let handle = Studio::spawn(controller, create_notifier(&config));

    match &args.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open script {:?}", path))?;
            drive(&handle, BufReader::new(file), false).await?;
        }
        None => {
            println!("{}", repl::HELP);
            drive(&handle, BufReader::new(tokio::io::stdin()), true).await?;
        }
    }

    wait_for_generation(&handle).await;
    let controller = handle.shutdown().await?;
    info!(
        "👋 Exiting with status '{}' and {} templates",
        controller.status(),
        controller.templates().len()
    );
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(path) = &args.fixture {
        config.fixture_path = Some(path.clone());
    }
    if let Some(delay) = args.delay_ms {
        config.generation_delay_ms = delay;
    }
    if args.strict {
        config.strict_ids = true;
    }
    if let Some(notifier) = &args.notifier {
        config.notifier = notifier.clone();
    }
}

async fn drive<R>(handle: &StudioHandle, reader: R, interactive: bool) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        if interactive {
            print!("> ");
            std::io::Write::flush(&mut std::io::stdout())?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let command = match repl::parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                warn!("{}", e);
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Send(message) => match handle.request(message).await {
                Ok(()) => {}
                Err(StudioError::Closed) => return Err(StudioError::Closed.into()),
                Err(e) => println!("Error: {}", e),
            },
            Command::Show => print!("{}", repl::render(&handle.current(), handle.catalog())),
            Command::Voices => print!("{}", repl::render_voices(handle.catalog())),
            Command::Templates => print!("{}", repl::render_templates(&handle.current())),
            Command::Help => println!("{}", repl::HELP),
            Command::Quit => break,
        }
    }
    Ok(())
}

/// Let a pending generation finish so its notice is shown before exit
async fn wait_for_generation(handle: &StudioHandle) {
    let mut views = handle.subscribe();
    if views.borrow().session.status == SessionStatus::Generating {
        info!("⏳ Waiting for pending generation before exit");
        let _ = views
            .wait_for(|v| v.session.status != SessionStatus::Generating)
            .await;
    }
}
