//! Per-dimension aggregation and sequence analysis over the trade store.
//!
//! Every reduction here uses a strict greater/less comparison, so a tie
//! keeps the first key encountered in store order. That matters for the
//! report's best/worst picks and is covered by tests.

use core_types::Trade;
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};

fn pnl_by<'a>(
    trades: &'a [Trade],
    key: impl Fn(&'a Trade) -> Option<&'a str>,
) -> IndexMap<&'a str, Decimal> {
    let mut sums: IndexMap<&str, Decimal> = IndexMap::new();
    for trade in trades {
        if let Some(k) = key(trade) {
            *sums.entry(k).or_insert(Decimal::ZERO) += trade.pnl;
        }
    }
    sums
}

fn arg_best(sums: &IndexMap<&str, Decimal>) -> Option<String> {
    let mut best: Option<(&str, Decimal)> = None;
    for (&key, &sum) in sums {
        match best {
            Some((_, best_sum)) if sum <= best_sum => {}
            _ => best = Some((key, sum)),
        }
    }
    best.map(|(key, _)| key.to_string())
}

fn arg_worst(sums: &IndexMap<&str, Decimal>) -> Option<String> {
    let mut worst: Option<(&str, Decimal)> = None;
    for (&key, &sum) in sums {
        match worst {
            Some((_, worst_sum)) if sum >= worst_sum => {}
            _ => worst = Some((key, sum)),
        }
    }
    worst.map(|(key, _)| key.to_string())
}

/// The symbol with the highest summed P&L, or `None` for an empty store.
pub fn best_symbol(trades: &[Trade]) -> Option<String> {
    arg_best(&pnl_by(trades, |t| Some(t.symbol.as_str())))
}

/// The symbol with the lowest summed P&L.
pub fn worst_symbol(trades: &[Trade]) -> Option<String> {
    arg_worst(&pnl_by(trades, |t| Some(t.symbol.as_str())))
}

/// The non-empty strategy label with the highest summed P&L. Trades with
/// no recorded strategy are excluded from the aggregation entirely.
pub fn best_strategy(trades: &[Trade]) -> Option<String> {
    arg_best(&pnl_by(trades, |t| {
        (!t.strategy.is_empty()).then_some(t.strategy.as_str())
    }))
}

/// The timeframe with the most trades.
pub fn preferred_timeframe(trades: &[Trade]) -> Option<String> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for trade in trades {
        *counts.entry(trade.timeframe.as_str()).or_insert(0) += 1;
    }
    let mut preferred: Option<(&str, usize)> = None;
    for (&tf, &count) in &counts {
        match preferred {
            Some((_, best)) if count <= best => {}
            _ => preferred = Some((tf, count)),
        }
    }
    preferred.map(|(tf, _)| tf.to_string())
}

/// The longest run of consecutive trades (in store order) whose win
/// classification matches `is_win`.
///
/// Classification is `(pnl > 0) == is_win`: a zero-P&L trade extends a
/// loss run when `is_win` is false and breaks a win run when it is true.
pub fn max_consecutive(trades: &[Trade], is_win: bool) -> usize {
    let mut max = 0;
    let mut current = 0;
    for trade in trades {
        if trade.is_win() == is_win {
            current += 1;
            max = max.max(current);
        } else {
            current = 0;
        }
    }
    max
}

/// Summed P&L per `YYYY-MM` bucket, keyed in first-seen order.
pub fn monthly_performance(trades: &[Trade]) -> IndexMap<String, Decimal> {
    let mut monthly: IndexMap<String, Decimal> = IndexMap::new();
    for trade in trades {
        *monthly.entry(trade.month_key()).or_insert(Decimal::ZERO) += trade.pnl;
    }
    monthly
}

/// Average winning P&L over the absolute average losing P&L, two decimal
/// places. Zero when there are no losing trades.
pub fn risk_reward(trades: &[Trade]) -> Decimal {
    let winners: Vec<Decimal> = trades.iter().filter(|t| t.is_win()).map(|t| t.pnl).collect();
    let losers: Vec<Decimal> = trades.iter().filter(|t| t.is_loss()).map(|t| t.pnl).collect();

    if losers.is_empty() {
        return Decimal::ZERO;
    }

    let avg_win = if winners.is_empty() {
        Decimal::ZERO
    } else {
        winners.iter().sum::<Decimal>() / Decimal::from(winners.len())
    };
    let avg_loss = (losers.iter().sum::<Decimal>() / Decimal::from(losers.len())).abs();

    (avg_win / avg_loss).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
