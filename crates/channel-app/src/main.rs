mod app;
mod cli;
mod listener;
mod logging;
mod replay;
mod settings;

use std::process::ExitCode;

use channel_config::ChannelConfig;
use winit::event_loop::EventLoop;

use crate::cli::Command;

fn main() -> ExitCode {
    let args = cli::parse();

    // The config file supplies the fallback log level, so load it first and
    // report the outcome once the subscriber is up.
    let loaded = match &args.config {
        Some(path) => channel_config::load_config_from(path),
        None => channel_config::load_config(),
    };
    let config_level = match &loaded {
        Ok(config) => settings::log_directive(config),
        Err(_) => settings::log_directive(&ChannelConfig::default()),
    };
    logging::init(&config_level, args.log_level.as_deref());

    tracing::info!("channel-bridge v{} starting...", env!("CARGO_PKG_VERSION"));
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        ChannelConfig::default()
    });

    match args.command {
        Command::Run { token, bundle } => {
            let bundle = settings::bundle(&config, bundle);
            tracing::info!(bundle = %bundle.base_dir().display(), "Opening channel window");

            let event_loop = match EventLoop::new() {
                Ok(event_loop) => event_loop,
                Err(e) => {
                    tracing::error!("Failed to create event loop: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let mut app = app::ChannelApp::new(config, token, bundle);
            if let Err(e) = event_loop.run_app(&mut app) {
                tracing::error!("Event loop error: {e}");
                return ExitCode::FAILURE;
            }
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }

        Command::Replay { input } => {
            let lines = match replay::read_lines(&input) {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::error!("Failed to read {}: {e}", input.display());
                    return ExitCode::FAILURE;
                }
            };
            let counts = replay::replay(lines, settings::bridge_settings(&config));
            if counts.failures > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}
