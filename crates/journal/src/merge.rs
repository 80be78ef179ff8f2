//! Reconciliation of an imported collection with the in-memory stores.
//!
//! Identity is the integer id: an incoming entity whose id already exists
//! is dropped, everything else is appended and the union is re-sorted.
//! Running the same merge twice therefore changes nothing the second time.

use core_types::{Note, Trade};
use std::collections::HashSet;

/// Merges `incoming` trades into `existing`, deduplicating by id and
/// re-sorting ascending by date. The sort is stable, so same-day trades
/// keep their relative order.
pub fn merge_trades(existing: &[Trade], incoming: &[Trade]) -> Vec<Trade> {
    let known: HashSet<u64> = existing.iter().map(|t| t.id).collect();
    let mut merged = existing.to_vec();
    merged.extend(incoming.iter().filter(|t| !known.contains(&t.id)).cloned());
    merged.sort_by_key(|t| t.date);
    merged
}

/// Merges `incoming` notes into `existing`, deduplicating by id and
/// re-sorting descending by timestamp (newest first).
pub fn merge_notes(existing: &[Note], incoming: &[Note]) -> Vec<Note> {
    let known: HashSet<u64> = existing.iter().map(|n| n.id).collect();
    let mut merged = existing.to_vec();
    merged.extend(incoming.iter().filter(|n| !known.contains(&n.id)).cloned());
    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    merged
}
