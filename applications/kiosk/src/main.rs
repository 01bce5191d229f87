/// Slideshow Kiosk - headless slideshow player
use clap::Parser;
use slideshow_kiosk::{forward_commands, ConsoleSurface, KioskConfig};
use slideshow_playback::{Session, SlideshowBackend, Surface};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "slideshow-kiosk")]
#[command(about = "Headless slideshow player", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./kiosk.toml if present)
    #[arg(short, long, env = "KIOSK_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL, optionally with a query string of overrides
    #[arg(long)]
    backend_url: Option<String>,

    /// Config overrides, e.g. "SLIDESHOW_INTERVAL=5&WEATHER_ENABLED=true"
    #[arg(long)]
    query: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "slideshow_kiosk=info,slideshow_playback=info,slideshow_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config =
        KioskConfig::load(cli.config.as_deref())?.with_overrides(cli.backend_url, cli.query);
    config.validate()?;

    tracing::info!("Starting slideshow kiosk");
    tracing::info!("Backend: {}", config.backend.url);
    tracing::info!("Screen: {}x{}", config.display.width, config.display.height);

    let backend: Arc<dyn SlideshowBackend> = Arc::new(config.backend_client()?);
    let surface: Arc<dyn Surface> = Arc::new(ConsoleSurface::new(
        config.screen_size(),
        config.display.image_output.clone(),
    ));
    let session = Session::new(backend, surface, config.session_options());

    // Operator commands
    let (actions_tx, mut actions) = mpsc::channel(8);
    tokio::spawn(forward_commands(BufReader::new(tokio::io::stdin()), actions_tx));

    // Event trace
    let mut events = session.events().subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::debug!(?event, "Playback event"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Event trace fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    loop {
        tokio::select! {
            reason = session.run(&mut actions) => {
                tracing::info!(?reason, "Page reload");
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
