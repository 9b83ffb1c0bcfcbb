//! Baby Diary admin dashboard binary.
//!
//! Usage: `babydiary-dashboard [config.toml]`

use std::str::FromStr;
use std::time::Duration;

use babydiary_admin_console::{load_config, ConsoleApp, ConsoleConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => ConsoleConfig::default(),
    }
    .apply_env(|key| std::env::var(key).ok());

    // Initialize tracing
    let level = tracing::Level::from_str(&config.log_level).unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let watch = config.dashboard.watch_interval_secs;
    let app = ConsoleApp::new(config)?;
    println!("{}", app.run_once(today()).await);

    let Some(secs) = watch else {
        return Ok(());
    };

    let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                app.refresh().await;
                println!("\n{}", app.render(today()));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                return Ok(());
            }
        }
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
