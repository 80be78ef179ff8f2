use core_types::Trade;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The aggregate metrics block shown on the dashboard and embedded in
/// every export.
///
/// Currency fields carry two decimal places and the win rate one; the
/// rounding already happened inside [`compute_stats`], so consumers can
/// serialize these values as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_trades: usize,
    pub win_rate: Decimal,
    #[serde(rename = "totalPnL")]
    pub total_pnl: Decimal,
    pub avg_trade: Decimal,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub largest_win: Decimal,
    pub largest_loss: Decimal,
}

impl Stats {
    /// Creates a new, zeroed-out Stats block. This is the documented
    /// result for an empty trade store.
    pub fn new() -> Self {
        Self {
            total_trades: 0,
            win_rate: Decimal::ZERO,
            total_pnl: Decimal::ZERO,
            avg_trade: Decimal::ZERO,
            winning_trades: 0,
            losing_trades: 0,
            largest_win: Decimal::ZERO,
            largest_loss: Decimal::ZERO,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the aggregate metrics for a trade store snapshot.
///
/// Zero-P&L trades count toward the total but toward neither the winning
/// nor the losing set, so `winning + losing <= total` always holds.
pub fn compute_stats(trades: &[Trade]) -> Stats {
    let mut stats = Stats::new();

    if trades.is_empty() {
        return stats;
    }

    let mut largest_win: Option<Decimal> = None;
    let mut largest_loss: Option<Decimal> = None;

    for trade in trades {
        stats.total_pnl += trade.pnl;

        if trade.is_win() {
            stats.winning_trades += 1;
            largest_win = Some(largest_win.map_or(trade.pnl, |w| w.max(trade.pnl)));
        } else if trade.is_loss() {
            stats.losing_trades += 1;
            largest_loss = Some(largest_loss.map_or(trade.pnl, |l| l.min(trade.pnl)));
        }
    }

    stats.total_trades = trades.len();
    stats.win_rate = (Decimal::from(stats.winning_trades) / Decimal::from(stats.total_trades)
        * Decimal::from(100))
    .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    stats.avg_trade = round_currency(stats.total_pnl / Decimal::from(stats.total_trades));
    stats.total_pnl = round_currency(stats.total_pnl);
    stats.largest_win = largest_win.map_or(Decimal::ZERO, round_currency);
    stats.largest_loss = largest_loss.map_or(Decimal::ZERO, round_currency);

    stats
}

/// The cumulative P&L series, one point per trade in store order.
///
/// This is the data behind the dashboard's equity-style chart; rendering
/// is someone else's job.
pub fn cumulative_pnl(trades: &[Trade]) -> Vec<Decimal> {
    let mut running = Decimal::ZERO;
    trades
        .iter()
        .map(|t| {
            running += t.pnl;
            running
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakdown;
    use core_types::Direction;
    use rust_decimal_macros::dec;

    fn trade(id: u64, pnl: Decimal) -> Trade {
        Trade {
            id,
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            symbol: "EURUSD".to_string(),
            direction: Direction::Long,
            entry_price: dec!(1.0850),
            exit_price: dec!(1.0900),
            lot_size: dec!(0.5),
            pnl,
            strategy: "Breakout".to_string(),
            timeframe: "H1".to_string(),
        }
    }

    #[test]
    fn empty_store_yields_all_zero_defaults() {
        let stats = compute_stats(&[]);
        assert_eq!(stats, Stats::new());
    }

    #[test]
    fn reference_scenario() {
        // 100, -50, -30, 200: the worked example from the reporting docs.
        let trades = vec![
            trade(1, dec!(100)),
            trade(2, dec!(-50)),
            trade(3, dec!(-30)),
            trade(4, dec!(200)),
        ];
        let stats = compute_stats(&trades);
        assert_eq!(stats.total_trades, 4);
        assert_eq!(stats.total_pnl, dec!(220.00));
        assert_eq!(stats.win_rate, dec!(50.0));
        assert_eq!(stats.avg_trade, dec!(55.00));
        assert_eq!(stats.largest_win, dec!(200.00));
        assert_eq!(stats.largest_loss, dec!(-50.00));
        assert_eq!(breakdown::risk_reward(&trades), dec!(3.75));
    }

    #[test]
    fn zero_pnl_counts_toward_neither_side() {
        let trades = vec![
            trade(1, dec!(10)),
            trade(2, Decimal::ZERO),
            trade(3, dec!(-5)),
        ];
        let stats = compute_stats(&trades);
        assert_eq!(stats.total_trades, 3);
        assert_eq!(stats.winning_trades, 1);
        assert_eq!(stats.losing_trades, 1);
        assert!(stats.winning_trades + stats.losing_trades <= stats.total_trades);
    }

    #[test]
    fn aggregation_rounds_once_at_output() {
        // Three thirds of a cent survive until the final rounding step.
        let trades = vec![
            trade(1, dec!(0.333)),
            trade(2, dec!(0.333)),
            trade(3, dec!(0.334)),
        ];
        let stats = compute_stats(&trades);
        assert_eq!(stats.total_pnl, dec!(1.00));
        assert_eq!(stats.avg_trade, dec!(0.33));
        assert_eq!(stats.win_rate, dec!(100.0));
    }

    #[test]
    fn cumulative_series_runs_in_store_order() {
        let trades = vec![
            trade(1, dec!(100)),
            trade(2, dec!(-50)),
            trade(3, dec!(-30)),
            trade(4, dec!(200)),
        ];
        assert_eq!(
            cumulative_pnl(&trades),
            vec![dec!(100), dec!(50), dec!(20), dec!(220)]
        );
        assert!(cumulative_pnl(&[]).is_empty());
    }

    #[test]
    fn stats_serialize_with_interchange_names() {
        let stats = compute_stats(&[trade(1, dec!(100))]);
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("totalPnL").is_some());
        assert!(json.get("winRate").is_some());
        assert!(json.get("avgTrade").is_some());
    }
}
