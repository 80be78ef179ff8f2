use crate::breakdown;
use crate::engine::{compute_stats, Stats};
use crate::error::AnalyticsError;
use chrono::{DateTime, Utc};
use core_types::Trade;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Header block for a generated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub report_date: DateTime<Utc>,
    /// "<first trade date> - <last trade date>", in store order.
    pub period: String,
    /// Whole days elapsed between the report date and the first trade's
    /// date, rounded up.
    pub total_days: i64,
}

/// The best/worst picks across the store's dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSection {
    pub best_symbol: Option<String>,
    pub worst_symbol: Option<String>,
    pub best_strategy: Option<String>,
    pub preferred_timeframe: Option<String>,
}

/// Sequence and ratio analysis over the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSection {
    pub consecutive_wins: usize,
    pub consecutive_losses: usize,
    pub monthly_performance: IndexMap<String, Decimal>,
    pub risk_reward: Decimal,
}

/// The full structured report written by the report action.
///
/// This is the final output of the report builder and the shape of the
/// `trading-report-*.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub metadata: ReportMetadata,
    pub summary: Stats,
    pub performance: PerformanceSection,
    pub analysis: AnalysisSection,
    pub trades: Vec<Trade>,
}

/// Assembles the full report from a trade store snapshot.
///
/// Requesting a report over an empty store is meaningless and is rejected
/// before any computation runs.
pub fn build_report(trades: &[Trade], now: DateTime<Utc>) -> Result<ReportDocument, AnalyticsError> {
    let first = trades.first().ok_or(AnalyticsError::EmptyDataset)?;
    let last = trades.last().ok_or(AnalyticsError::EmptyDataset)?;

    let first_day = first.date.and_time(chrono::NaiveTime::MIN).and_utc();
    let total_secs = (now - first_day).num_seconds();
    let total_days = total_secs / 86_400 + if total_secs % 86_400 > 0 { 1 } else { 0 };

    debug!(trades = trades.len(), total_days, "building report");

    Ok(ReportDocument {
        metadata: ReportMetadata {
            report_date: now,
            period: format!("{} - {}", first.date, last.date),
            total_days,
        },
        summary: compute_stats(trades),
        performance: PerformanceSection {
            best_symbol: breakdown::best_symbol(trades),
            worst_symbol: breakdown::worst_symbol(trades),
            best_strategy: breakdown::best_strategy(trades),
            preferred_timeframe: breakdown::preferred_timeframe(trades),
        },
        analysis: AnalysisSection {
            consecutive_wins: breakdown::max_consecutive(trades, true),
            consecutive_losses: breakdown::max_consecutive(trades, false),
            monthly_performance: breakdown::monthly_performance(trades),
            risk_reward: breakdown::risk_reward(trades),
        },
        trades: trades.to_vec(),
    })
}
