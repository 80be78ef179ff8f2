use crate::error::TransferError;
use analytics::{compute_stats, Stats};
use chrono::{DateTime, Utc};
use core_types::{Note, Trade};
use serde::{Deserialize, Serialize};

/// Version tag written into every export, bumped when the shape changes.
const EXPORT_VERSION: &str = "2.0";
const EXPORT_SOURCE: &str = "Trading Journal Demo";

/// Header row of the CSV export. Field names are kept as the original
/// journal wrote them so existing spreadsheets keep working.
const CSV_HEADER: &str = "Fecha,Símbolo,Dirección,Entrada,Salida,Lotes,P&L,Estrategia,Timeframe";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub export_date: DateTime<Utc>,
    pub version: String,
    pub source: String,
}

/// The full-dataset JSON export: metadata, the statistics block at export
/// time, and both collections in store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub metadata: ExportMetadata,
    pub statistics: Stats,
    pub trades: Vec<Trade>,
    pub notes: Vec<Note>,
}

/// Assembles the export document from store snapshots.
pub fn build_export(trades: &[Trade], notes: &[Note], now: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        metadata: ExportMetadata {
            export_date: now,
            version: EXPORT_VERSION.to_string(),
            source: EXPORT_SOURCE.to_string(),
        },
        statistics: compute_stats(trades),
        trades: trades.to_vec(),
        notes: notes.to_vec(),
    }
}

/// Renders the trade store as CSV, one row per trade in store order.
///
/// Only the date and strategy fields are double-quoted, matching the
/// format consumers of the original export already parse. An empty store
/// is rejected; no file should be produced for it.
pub fn render_csv(trades: &[Trade]) -> Result<String, TransferError> {
    if trades.is_empty() {
        return Err(TransferError::EmptyDataset);
    }

    let mut lines = Vec::with_capacity(trades.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for trade in trades {
        lines.push(format!(
            "\"{}\",{},{},{},{},{},{},\"{}\",{}",
            trade.date,
            trade.symbol,
            trade.direction,
            trade.entry_price,
            trade.exit_price,
            trade.lot_size,
            trade.pnl,
            trade.strategy,
            trade.timeframe,
        ));
    }
    Ok(lines.join("\n"))
}

pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("trading-journal-{}.json", now.format("%Y-%m-%d"))
}

pub fn csv_filename(now: DateTime<Utc>) -> String {
    format!("trades-{}.csv", now.format("%Y-%m-%d"))
}

pub fn report_filename(now: DateTime<Utc>) -> String {
    format!("trading-report-{}.json", now.format("%Y-%m-%d"))
}
