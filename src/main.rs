//! logpane - Entry Point

use clap::Parser;
use logpane::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
};
use logpane::logging::LogPaneLayer;
use logpane::source::{DemoGenerator, DEFAULT_DEMO_RATE_HZ};
use logpane::state::{LogPaneOptions, LogPaneState, LogSink};
use logpane::view::{ChannelRedraw, ColorConfig, PaneStyles};
use logpane::view_state::RedrawThrottle;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use tracing::info;

/// logpane - live log pane for tracing output
#[derive(Parser, Debug)]
#[command(name = "logpane")]
#[command(version)]
#[command(about = "Terminal log pane with bounded history, follow mode and line wrapping")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum number of log lines to keep
    #[arg(long)]
    pub history: Option<usize>,

    /// Start with line wrapping disabled
    #[arg(long)]
    pub no_wrap: bool,

    /// Start with follow mode disabled
    #[arg(long)]
    pub no_follow: bool,

    /// Generate fake device logs
    #[arg(long)]
    pub test_mode: bool,

    /// Fake device log frequency in lines per second
    #[arg(long, default_value_t = DEFAULT_DEMO_RATE_HZ, value_parser = parse_rate)]
    pub rate: f64,
}

fn parse_rate(value: &str) -> Result<f64, String> {
    let rate: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("rate must be greater than 0, got {value}"))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = load_config_with_precedence(args.config.clone())?;
        let merged = merge_config(config_file);
        let with_env = apply_env_overrides(merged);

        // Flags only override when explicitly set
        let wrap_override = args.no_wrap.then_some(false);
        let follow_override = args.no_follow.then_some(false);

        apply_cli_overrides(with_env, args.history, wrap_override, follow_override)
    };

    // Redraw requests travel from producer threads to the event loop
    let (redraw_tx, redraw_rx) = mpsc::channel();
    let throttle = RedrawThrottle::new(
        Arc::new(ChannelRedraw::new(redraw_tx)),
        config.redraw_interval(),
    );
    let sink = LogSink::new(config.history_capacity, throttle);

    logpane::logging::init(&config.log_file_path, Some(LogPaneLayer::new(sink.clone())))?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let _demo = if args.test_mode {
        Some(DemoGenerator::start(args.rate)?)
    } else {
        None
    };

    let styles = PaneStyles::with_color_config(ColorConfig::from_env());
    let options = LogPaneOptions {
        follow: config.follow,
        wrap_lines: config.line_wrap,
        show_toolbar: config.show_toolbar,
    };
    let pane = LogPaneState::new(sink, options, styles.selected_line);

    logpane::view::run_with_pane(pane, redraw_rx, styles)?;

    Ok(())
}
