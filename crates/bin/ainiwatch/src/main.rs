//! # ainiwatch — terminal view of the AINI dashboard
//!
//! Composition root that wires the reqwest adapter into the dashboard services.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Initialize logging
//! - Construct the HTTP adapter and inject it into `StatusClient`
//! - Run one command: watch (poll until Ctrl-C), status, settings, start, stop
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod render;
mod ticker;

use std::cell::RefCell;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use aini_adapter_http_reqwest::ReqwestStatusApi;
use aini_app::services::action_dispatcher::ActionDispatcher;
use aini_app::services::poll_scheduler::PollScheduler;
use aini_app::services::status_client::{RefreshMode, StatusClient};
use aini_app::session::DashboardSession;
use aini_domain::action::ServerAction;
use aini_domain::server::ServerKind;

use crate::config::Config;
use crate::ticker::IntervalTicker;

#[derive(Parser, Debug)]
#[command(version, about = "Watch and control the AINI app and gpu servers")]
struct Cli {
    /// Base URL of the dashboard API (overrides config and `AINI_API_URL`).
    #[arg(long)]
    url: Option<String>,

    /// Path to a TOML config file (defaults to `./ainiwatch.toml` if present).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Poll the status API and print every change until Ctrl-C (default).
    Watch,
    /// Fetch the status once and print it.
    Status,
    /// Print the backend settings.
    Settings {
        /// Show secret values instead of masking them.
        #[arg(long)]
        reveal: bool,
    },
    /// Start a server, then print the resynchronized status.
    Start { server: ServerKind },
    /// Stop a server, then print the resynchronized status.
    Stop { server: ServerKind },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.api.base_url = url;
        config.validate()?;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run(cli.command.unwrap_or(Command::Watch), &config))
}

async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let api = aini_adapter_http_reqwest::Config {
        base_url: config.api.base_url.clone(),
        timeout: config.http_timeout(),
    }
    .build()?;
    tracing::debug!(base_url = api.base_url(), "using dashboard API");

    let client = StatusClient::new(api);
    let session = DashboardSession::new();

    match command {
        Command::Watch => watch(client, session, config.poll_interval()).await,
        Command::Status => {
            client.refresh(&session, RefreshMode::Visible).await?;
            print!("{}", render::dashboard(&session.state()).as_str());
            Ok(())
        }
        Command::Settings { reveal } => {
            let settings = client.fetch_settings().await?;
            print!("{}", render::settings(&settings, reveal));
            Ok(())
        }
        Command::Start { server } => act(client, session, server, ServerAction::Start).await,
        Command::Stop { server } => act(client, session, server, ServerAction::Stop).await,
    }
}

async fn watch(
    client: StatusClient<ReqwestStatusApi>,
    session: DashboardSession,
    interval: Duration,
) -> anyhow::Result<()> {
    let last_frame = RefCell::new(None);
    session.on_change(move |state| {
        let frame = render::dashboard(state);
        if last_frame.borrow().as_ref() != Some(&frame) {
            println!("{}", frame.as_str());
            last_frame.replace(Some(frame));
        }
    });

    let scheduler = PollScheduler::new(client, session);
    let (handle, task) = scheduler.activate(IntervalTicker::new(interval));
    tokio::task::spawn_local(task);
    tracing::info!(interval_secs = interval.as_secs(), "watching dashboard, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    handle.deactivate();
    tracing::info!("stopped");
    Ok(())
}

async fn act(
    client: StatusClient<ReqwestStatusApi>,
    session: DashboardSession,
    server: ServerKind,
    action: ServerAction,
) -> anyhow::Result<()> {
    let dispatcher = ActionDispatcher::new(client, session.clone());
    let outcome = dispatcher.perform_action(server, action).await;
    print!("{}", render::dashboard(&session.state()).as_str());
    Ok(outcome?)
}
