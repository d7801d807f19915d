//! histrow - Entry Point

use clap::Parser;
use histrow::model::{AppError, CommitOrder};
use histrow::state::HistoryTableState;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// histrow - replay commit-history pages through the history table row model
#[derive(Parser, Debug)]
#[command(name = "histrow")]
#[command(version)]
#[command(about = "Build history table rows from JSONL pages of mainline commits")]
pub struct Args {
    /// Path to JSONL page file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Order of the commit to highlight
    #[arg(short, long)]
    pub selected: Option<u64>,

    /// Table width in pixels, used to compute the column limit
    #[arg(short, long, default_value_t = 1200.0)]
    pub width: f64,

    /// Toggle the folded row at this index after all pages are loaded (repeatable)
    #[arg(short, long)]
    pub expand: Vec<usize>,

    /// Variant column names, comma separated
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Column page to show (1-based)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub column_page: u32,

    /// Offset in minutes east of UTC used to split calendar days
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset: Option<i32>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = histrow::config::load_config_with_precedence(args.config.clone())?;
        let merged = histrow::config::merge_config(config_file);
        let with_env = histrow::config::apply_env_overrides(merged);
        histrow::config::apply_cli_overrides(with_env, args.utc_offset)
    };

    histrow::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let mut table = HistoryTableState::new(config.row_metrics()?, config.column_metrics())
        .with_selected_order(args.selected.map(CommitOrder::new));
    table.set_columns(args.columns.clone());
    table.resize(args.width);
    for _ in 1..args.column_page {
        table.next_column_page();
    }

    let mut source = histrow::source::detect_input_source(args.file.clone())?;
    for page in source.drain_pages()? {
        table.ingest_page(&page)?;
    }
    info!(
        pages = table.pages_ingested(),
        rows = table.item_count(),
        "Pages ingested"
    );

    for &index in &args.expand {
        table.toggle_row(index);
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(histrow::view::render_table(&table).as_bytes())?;
    stdout.flush()?;

    Ok(())
}
