//! Tour guide console entry point.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tourguide_cli::commands::{Command, CommandError};
use tourguide_cli::config::CliConfig;
use tourguide_cli::console::{
    ConsoleMap, ConsoleNotifier, ConsolePermissions, ConsolePositionProvider, ConsoleRecognizer,
    ConsoleSynthesizer,
};
use tourguide_cli::error::AppError;
use tourguide_client::HttpTourBackend;
use tourguide_core::clock::SystemClock;
use tourguide_session::application::runtime::{TourProviders, TourRuntime};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = CliConfig::from_env()?;
    info!(base_url = %config.base_url, "starting tour guide");

    let positions = Arc::new(ConsolePositionProvider::new());
    let recognizer = Arc::new(ConsoleRecognizer::new());
    let clock = Arc::new(SystemClock);
    let providers = TourProviders {
        backend: Arc::new(HttpTourBackend::new(config.base_url.as_str())?),
        permissions: Arc::new(ConsolePermissions),
        positions: positions.clone(),
        synthesizer: Arc::new(ConsoleSynthesizer),
        recognizer: recognizer.clone(),
        map: Arc::new(ConsoleMap),
        notifier: Arc::new(ConsoleNotifier),
        clock: clock.clone(),
    };
    let (runtime, handle) = TourRuntime::new(config.tour, providers);
    let tour = tokio::spawn(runtime.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                warn!(error = %e, "invalid command");
                continue;
            }
        };
        let quitting = command == Command::Quit;
        if let Err(e) = command.apply(&handle, &positions, &recognizer, clock.as_ref()) {
            warn!(error = %e, "tour is no longer running");
            break;
        }
        if quitting {
            break;
        }
    }

    // End of input leaves the tour as well.
    if handle.exit().is_err() {
        info!("tour already stopped");
    }
    drop(handle);
    let session = tour.await?;
    info!(
        entries = session.feed().len(),
        spoken = session.spoken().len(),
        "tour finished"
    );
    Ok(())
}
