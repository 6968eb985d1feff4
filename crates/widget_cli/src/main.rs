//! file_widget - encode local files the way the upload widget does
//!
//! Runs the widget's selection and preview flow on a single-threaded event
//! loop and prints the resulting file list and value.

mod app;
mod renderer;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "file_widget", version, about)]
pub struct Args {
    /// Files to select
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Configuration file (defaults to the per-user config)
    #[arg(long, env = "FILE_WIDGET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Multi-file mode: emit every encoded file instead of the first
    #[arg(long)]
    pub multiple: bool,

    /// Picker filter, e.g. "image/*,.pdf"
    #[arg(long)]
    pub accept: Option<String>,

    /// Document page to preview
    #[arg(long)]
    pub page: Option<u32>,

    /// Print the emitted value as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Do not write the JSON log file
    #[arg(long)]
    pub no_log_file: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = widget_core::WidgetConfig::load(args.config.as_deref())?;
    if args.no_log_file {
        config.logging.file = false;
    }

    // Keep the guard alive until exit so the file log is flushed
    let _log_guard = widget_log::init(&config.logging)?;

    tracing::info!("file_widget starting...");

    // The widget is single-threaded: one event loop, no worker threads
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(app::run(args, config))
}
