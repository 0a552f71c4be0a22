#![forbid(unsafe_code)]

mod document;
mod gui;
mod mutate;
mod ops;
mod path;
mod projection;
mod selection;
mod tree;

use anyhow::Result;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting no-code config builder");
    gui::run_gui()
}
