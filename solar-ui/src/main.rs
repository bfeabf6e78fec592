use std::path::PathBuf;

use clap::Parser;
use cursive::event::Event;
use tracing::info;

use solar_core::models::{PricingConfig, builtin_catalog};
use solar_ui::state::AppState;
use solar_ui::{csv_loader, logging, views};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Solar investment calculator and proposal generator.
///
/// Walks through the pricing worksheets for a single client and exports a
/// client-facing PDF proposal.
#[derive(Debug, Parser)]
struct Cli {
    /// Extend the panel catalog from a CSV file.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Explicit path to the wkhtmltopdf executable.
    /// Defaults to searching PATH and the usual install locations.
    #[arg(long)]
    wkhtmltopdf: Option<PathBuf>,

    /// Directory proposal PDFs are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let mut catalog = builtin_catalog();
    if let Some(path) = &cli.catalog {
        let extra = csv_loader::load_from_file(path)?;
        info!(count = extra.len(), "extending panel catalog from CSV");
        catalog.extend(extra);
    }

    let state = AppState::new(
        PricingConfig::default(),
        catalog,
        cli.wkhtmltopdf,
        cli.out_dir,
    );

    let mut siv = cursive::default();
    siv.set_user_data(state);
    siv.add_global_callback(Event::CtrlChar('q'), |s| s.quit());
    views::show_main_menu(&mut siv);

    // The TUI owns the terminal; keep log records off stdout while it runs.
    logging::set_stdout_enabled(false)?;
    siv.run();
    logging::set_stdout_enabled(true)?;

    info!("session ended");
    Ok(())
}
