use chainview::app::{App, Endpoints};
use chainview::config::{validate_endpoint, Config};
use chainview::{logging, ui};

use anyhow::Result;
use clap::{Parser, Subcommand};
use ratatui::{
    crossterm::{
        event::{self, Event, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use std::io::stdout;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "chainview", version, about = "Terminal explorer for GraphQL-indexed blockchains")]
struct Cli {
    /// GraphQL HTTP endpoint of the indexer
    #[arg(long, env = "CHAINVIEW_GRAPHQL_ENDPOINT")]
    endpoint: Option<String>,

    /// GraphQL websocket endpoint for live updates
    #[arg(long, env = "CHAINVIEW_GRAPHQL_WS_ENDPOINT")]
    ws_endpoint: Option<String>,

    /// Log filter, e.g. `debug` or `chainview=trace`
    #[arg(long, env = "CHAINVIEW_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Save the indexer endpoint to the config file
    SetEndpoint {
        url: String,
        /// Websocket endpoint for subscriptions
        #[arg(long)]
        ws: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;

    let _log_guard = logging::init(&Config::config_dir()?, cli.log_level.as_deref())?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting chainview");

    match cli.command {
        Some(Command::SetEndpoint { url, ws }) => {
            validate_endpoint(&url, &["http", "https"])?;
            if let Some(ws) = ws.as_deref().filter(|s| !s.is_empty()) {
                validate_endpoint(ws, &["ws", "wss"])?;
            }
            config.set_endpoint(url.clone(), ws.clone())?;
            println!("GraphQL endpoint set to: {url}");
            if let Some(ws) = ws.filter(|s| !s.is_empty()) {
                println!("Websocket endpoint set to: {ws}");
            }
            if let Some(path) = config.path() {
                println!("Config saved to: {}", path.display());
            }
        }
        None => {
            let endpoints = Endpoints::resolve(cli.endpoint, cli.ws_endpoint, &config);
            run_tui(config, endpoints).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: Config, endpoints: Option<Endpoints>) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(config, endpoints);
    let result = run_event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    if let Err(e) = &result {
        error!(error = %e, "event loop failed");
    }
    result
}

async fn run_event_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Keep the runtime free for the query tasks between polls.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        } else {
            tokio::task::yield_now().await;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
