use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use core_types::{Clock, Direction, NoteDraft, SystemClock, TradeDraft};
use journal::Journal;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use storage::JsonFileStore;
use transfer::{
    build_export, csv_filename, export_filename, parse_import, render_csv, report_filename,
    DiskSink, FileSink, TransferError,
};

/// The main entry point for the tradebook journal CLI.
fn main() {
    // Respect RUST_LOG; stay quiet by default.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A personal trading journal: record trades and notes, inspect
/// statistics, and export or import the full dataset.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the persisted journal data.
    #[arg(long, global = true, default_value = "journal-data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new trade.
    AddTrade(AddTradeArgs),
    /// Record a free-text journal note.
    AddNote {
        /// The note text.
        text: String,
    },
    /// List all recorded trades.
    List,
    /// List all journal notes, newest first.
    Notes,
    /// Show aggregate statistics and the cumulative P&L series.
    Stats,
    /// Export the full dataset (trades, notes, statistics) as JSON.
    Export(OutputArgs),
    /// Export the trade table as CSV.
    ExportCsv(OutputArgs),
    /// Generate the full performance report as JSON.
    Report(OutputArgs),
    /// Import a previously exported JSON file and merge it in.
    Import {
        /// The file to import.
        file: PathBuf,
        /// Skip the merge confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Parser)]
struct AddTradeArgs {
    /// Instrument identifier (e.g., "EURUSD").
    #[arg(long)]
    symbol: String,

    /// Position side: "long" or "short".
    #[arg(long)]
    direction: Direction,

    #[arg(long)]
    entry_price: Decimal,

    #[arg(long)]
    exit_price: Decimal,

    #[arg(long)]
    lot_size: Decimal,

    /// Realized profit or loss (negative for a loss).
    #[arg(long, allow_hyphen_values = true)]
    pnl: Decimal,

    /// Strategy label; omit if none applies.
    #[arg(long, default_value = "")]
    strategy: String,

    /// Timeframe label (e.g., "H1").
    #[arg(long)]
    timeframe: String,
}

#[derive(Parser)]
struct OutputArgs {
    /// Directory the generated file is written into.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

// ==============================================================================
// Command Dispatch
// ==============================================================================

fn run(cli: Cli) -> anyhow::Result<()> {
    let store = Arc::new(JsonFileStore::new(&cli.data_dir));
    let clock = Arc::new(SystemClock);
    let mut journal =
        Journal::load(store, clock.clone()).context("Failed to load the journal")?;

    match cli.command {
        Commands::AddTrade(args) => handle_add_trade(&mut journal, args),
        Commands::AddNote { text } => handle_add_note(&mut journal, text),
        Commands::List => handle_list(&journal),
        Commands::Notes => handle_notes(&journal),
        Commands::Stats => handle_stats(&journal),
        Commands::Export(args) => handle_export(&journal, clock.as_ref(), args),
        Commands::ExportCsv(args) => handle_export_csv(&journal, clock.as_ref(), args),
        Commands::Report(args) => handle_report(&journal, clock.as_ref(), args),
        Commands::Import { file, yes } => handle_import(&mut journal, &file, yes),
    }
}

fn handle_add_trade(journal: &mut Journal, args: AddTradeArgs) -> anyhow::Result<()> {
    let trade = journal.add_trade(TradeDraft {
        symbol: args.symbol,
        direction: args.direction,
        entry_price: args.entry_price,
        exit_price: args.exit_price,
        lot_size: args.lot_size,
        pnl: args.pnl,
        strategy: args.strategy,
        timeframe: args.timeframe,
    })?;
    println!("Recorded trade #{} ({} {})", trade.id, trade.symbol, trade.direction);
    Ok(())
}

fn handle_add_note(journal: &mut Journal, text: String) -> anyhow::Result<()> {
    let note = journal.add_note(NoteDraft { text })?;
    println!("Recorded note #{}", note.id);
    Ok(())
}

fn handle_list(journal: &Journal) -> anyhow::Result<()> {
    if journal.trades().is_empty() {
        println!("No trades recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Date", "Symbol", "Dir", "Entry", "Exit", "Lots", "P&L", "Strategy", "TF",
    ]);
    for trade in journal.trades() {
        table.add_row(vec![
            Cell::new(trade.date),
            Cell::new(&trade.symbol),
            Cell::new(trade.direction),
            Cell::new(trade.entry_price),
            Cell::new(trade.exit_price),
            Cell::new(trade.lot_size),
            Cell::new(trade.pnl),
            Cell::new(&trade.strategy),
            Cell::new(&trade.timeframe),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn handle_notes(journal: &Journal) -> anyhow::Result<()> {
    if journal.notes().is_empty() {
        println!("No notes recorded yet.");
        return Ok(());
    }
    for note in journal.notes() {
        println!("[{}] {}", note.timestamp.format("%Y-%m-%d %H:%M"), note.text);
    }
    Ok(())
}

fn handle_stats(journal: &Journal) -> anyhow::Result<()> {
    let stats = analytics::compute_stats(journal.trades());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Value"]);
    table.add_row(vec![Cell::new("Total trades"), Cell::new(stats.total_trades)]);
    table.add_row(vec![
        Cell::new("Win rate"),
        Cell::new(format!("{}%", stats.win_rate)),
    ]);
    table.add_row(vec![
        Cell::new("Total P&L"),
        Cell::new(format!("${}", stats.total_pnl)),
    ]);
    table.add_row(vec![
        Cell::new("Average trade"),
        Cell::new(format!("${}", stats.avg_trade)),
    ]);
    table.add_row(vec![Cell::new("Winning trades"), Cell::new(stats.winning_trades)]);
    table.add_row(vec![Cell::new("Losing trades"), Cell::new(stats.losing_trades)]);
    table.add_row(vec![
        Cell::new("Largest win"),
        Cell::new(format!("${}", stats.largest_win)),
    ]);
    table.add_row(vec![
        Cell::new("Largest loss"),
        Cell::new(format!("${}", stats.largest_loss)),
    ]);
    println!("{table}");

    let series = analytics::cumulative_pnl(journal.trades());
    if !series.is_empty() {
        let rendered: Vec<String> = series.iter().map(|p| format!("${p}")).collect();
        println!("Cumulative P&L: {}", rendered.join(" -> "));
    }
    Ok(())
}

fn handle_export(
    journal: &Journal,
    clock: &dyn Clock,
    args: OutputArgs,
) -> anyhow::Result<()> {
    let now = clock.now();
    let doc = build_export(journal.trades(), journal.notes(), now);
    let bytes = serde_json::to_vec_pretty(&doc)?;
    let filename = export_filename(now);
    DiskSink::new(&args.out).emit(&filename, &bytes)?;
    println!(
        "Exported {} trades and {} notes to {}",
        doc.trades.len(),
        doc.notes.len(),
        args.out.join(filename).display()
    );
    Ok(())
}

fn handle_export_csv(
    journal: &Journal,
    clock: &dyn Clock,
    args: OutputArgs,
) -> anyhow::Result<()> {
    let csv = match render_csv(journal.trades()) {
        Ok(csv) => csv,
        Err(TransferError::EmptyDataset) => {
            println!("No trades to export.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let now = clock.now();
    let filename = csv_filename(now);
    DiskSink::new(&args.out).emit(&filename, csv.as_bytes())?;
    println!(
        "Exported {} trades to {}",
        journal.trades().len(),
        args.out.join(filename).display()
    );
    Ok(())
}

fn handle_report(
    journal: &Journal,
    clock: &dyn Clock,
    args: OutputArgs,
) -> anyhow::Result<()> {
    let now = clock.now();
    let report = match analytics::build_report(journal.trades(), now) {
        Ok(report) => report,
        Err(analytics::AnalyticsError::EmptyDataset) => {
            println!("No trades to report on.");
            return Ok(());
        }
    };
    let bytes = serde_json::to_vec_pretty(&report)?;
    let filename = report_filename(now);
    DiskSink::new(&args.out).emit(&filename, &bytes)?;
    println!("Report written to {}", args.out.join(filename).display());
    Ok(())
}

fn handle_import(journal: &mut Journal, file: &PathBuf, yes: bool) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let payload = parse_import(&contents)?;

    if !yes {
        let prompt = format!(
            "File holds {} trades and {} notes. Merge into the current journal ({} trades)?",
            payload.trade_count(),
            payload.note_count(),
            journal.trades().len()
        );
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Import cancelled.");
            return Ok(());
        }
    }

    let added = journal.apply_import(&payload.trades, payload.notes.as_deref())?;
    println!("Import successful! New trades: {added}");
    Ok(())
}
