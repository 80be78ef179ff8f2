//! The journal's application state: the trade and note stores.
//!
//! `Journal` owns both in-memory collections and writes the full
//! serialized store back through the injected [`BlobStore`] after every
//! mutation, so a session can be resumed from persistence alone. All
//! operations are synchronous and run to completion; a failed operation
//! leaves both the in-memory and the persisted state untouched.

use chrono::NaiveDate;
use core_types::{Clock, IdGenerator, Note, NoteDraft, Trade, TradeDraft};
use serde::Serialize;
use std::sync::Arc;
use storage::{BlobStore, NOTES_KEY, TRADES_KEY};
use tracing::info;

pub mod error;
pub mod merge;

pub use error::JournalError;
pub use merge::{merge_notes, merge_trades};

pub struct Journal {
    trades: Vec<Trade>,
    notes: Vec<Note>,
    store: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
}

impl Journal {
    /// Restores both stores from persistence. A missing key is an empty
    /// collection, not an error.
    pub fn load(store: Arc<dyn BlobStore>, clock: Arc<dyn Clock>) -> Result<Self, JournalError> {
        let trades: Vec<Trade> = read_collection(store.as_ref(), TRADES_KEY)?;
        let notes: Vec<Note> = read_collection(store.as_ref(), NOTES_KEY)?;

        // Seed the id generator past everything already on disk so new
        // entities never collide with loaded ones.
        let mut ids = IdGenerator::new();
        for trade in &trades {
            ids.observe(trade.id);
        }
        for note in &notes {
            ids.observe(note.id);
        }

        Ok(Self {
            trades,
            notes,
            store,
            clock,
            ids,
        })
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Validates the draft, assigns identity and today's date, appends it
    /// to the trade store and persists the full collection.
    ///
    /// Single adds append without re-sorting; only a merge re-establishes
    /// full chronological order.
    pub fn add_trade(&mut self, draft: TradeDraft) -> Result<Trade, JournalError> {
        draft.validate()?;
        let id = self.ids.next(self.clock.as_ref());
        let date: NaiveDate = self.clock.now().date_naive();
        let trade = draft.into_trade(id, date);

        let mut next = self.trades.clone();
        next.push(trade.clone());
        self.persist(TRADES_KEY, &next)?;
        self.trades = next;

        info!(id = trade.id, symbol = %trade.symbol, "trade recorded");
        Ok(trade)
    }

    /// Validates the draft, assigns identity and a timestamp, prepends it
    /// to the note store (newest first) and persists the full collection.
    pub fn add_note(&mut self, draft: NoteDraft) -> Result<Note, JournalError> {
        draft.validate()?;
        let id = self.ids.next(self.clock.as_ref());
        let note = draft.into_note(id, self.clock.now());

        let mut next = self.notes.clone();
        next.insert(0, note.clone());
        self.persist(NOTES_KEY, &next)?;
        self.notes = next;

        info!(id = note.id, "note recorded");
        Ok(note)
    }

    /// Merges an imported dataset into both stores and persists them.
    /// Returns the number of newly added trades. A missing notes field in
    /// the import is simply skipped.
    pub fn apply_import(
        &mut self,
        incoming_trades: &[Trade],
        incoming_notes: Option<&[Note]>,
    ) -> Result<usize, JournalError> {
        let merged_trades = merge_trades(&self.trades, incoming_trades);
        let merged_notes = incoming_notes.map(|incoming| merge_notes(&self.notes, incoming));

        self.persist(TRADES_KEY, &merged_trades)?;
        if let Some(notes) = &merged_notes {
            self.persist(NOTES_KEY, notes)?;
        }

        let added = merged_trades.len() - self.trades.len();
        self.trades = merged_trades;
        if let Some(notes) = merged_notes {
            self.notes = notes;
        }

        for trade in &self.trades {
            self.ids.observe(trade.id);
        }
        for note in &self.notes {
            self.ids.observe(note.id);
        }

        info!(added, total = self.trades.len(), "import merged");
        Ok(added)
    }

    fn persist<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), JournalError> {
        let json = serde_json::to_string_pretty(items)?;
        self.store.set(key, &json)?;
        Ok(())
    }
}

fn read_collection<T: serde::de::DeserializeOwned>(
    store: &dyn BlobStore,
    key: &str,
) -> Result<Vec<T>, JournalError> {
    match store.get(key)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::{Direction, ManualClock};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use storage::MemoryStore;

    fn draft(symbol: &str, pnl: Decimal) -> TradeDraft {
        TradeDraft {
            symbol: symbol.to_string(),
            direction: Direction::Long,
            entry_price: dec!(1.0850),
            exit_price: dec!(1.0900),
            lot_size: dec!(0.5),
            pnl,
            strategy: "Breakout".to_string(),
            timeframe: "H1".to_string(),
        }
    }

    fn journal() -> (Journal, Arc<MemoryStore>, Arc<ManualClock>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        ));
        let journal = Journal::load(store.clone(), clock.clone()).unwrap();
        (journal, store, clock)
    }

    #[test]
    fn add_trade_appends_and_persists() {
        let (mut journal, store, _) = journal();
        let trade = journal.add_trade(draft("EURUSD", dec!(50))).unwrap();
        let expected: NaiveDate = "2024-01-15".parse().unwrap();
        assert_eq!(trade.date, expected);
        assert_eq!(journal.trades().len(), 1);

        let persisted = store.get(TRADES_KEY).unwrap().unwrap();
        let on_disk: Vec<Trade> = serde_json::from_str(&persisted).unwrap();
        assert_eq!(on_disk, journal.trades());
    }

    #[test]
    fn invalid_draft_mutates_nothing() {
        let (mut journal, store, _) = journal();
        assert!(journal.add_trade(draft("", dec!(50))).is_err());
        assert!(journal.trades().is_empty());
        assert!(store.get(TRADES_KEY).unwrap().is_none());
    }

    #[test]
    fn notes_are_prepended_newest_first() {
        let (mut journal, _, clock) = journal();
        journal
            .add_note(NoteDraft {
                text: "first".to_string(),
            })
            .unwrap();
        clock.set(Utc.with_ymd_and_hms(2024, 1, 16, 9, 0, 0).unwrap());
        journal
            .add_note(NoteDraft {
                text: "second".to_string(),
            })
            .unwrap();
        let texts: Vec<&str> = journal.notes().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[test]
    fn ids_stay_unique_across_trades_and_notes() {
        let (mut journal, _, _) = journal();
        let t = journal.add_trade(draft("EURUSD", dec!(1))).unwrap();
        let n = journal
            .add_note(NoteDraft {
                text: "entry".to_string(),
            })
            .unwrap();
        assert_ne!(t.id, n.id);
    }

    #[test]
    fn load_resumes_a_persisted_session() {
        let (mut journal, store, clock) = journal();
        journal.add_trade(draft("EURUSD", dec!(50))).unwrap();
        journal.add_trade(draft("GBPUSD", dec!(-20))).unwrap();

        let resumed = Journal::load(store, clock).unwrap();
        assert_eq!(resumed.trades(), journal.trades());
    }

    #[test]
    fn import_skips_existing_ids_and_reports_new_count() {
        let (mut journal, _, _) = journal();
        let existing = journal.add_trade(draft("EURUSD", dec!(50))).unwrap();

        let duplicate = existing.clone();
        let mut fresh = existing.clone();
        fresh.id += 1000;
        fresh.symbol = "GBPUSD".to_string();

        let added = journal
            .apply_import(&[duplicate, fresh], None)
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(journal.trades().len(), 2);
    }

    #[test]
    fn import_without_notes_leaves_note_store_alone() {
        let (mut journal, store, _) = journal();
        journal
            .add_note(NoteDraft {
                text: "keep me".to_string(),
            })
            .unwrap();
        let before = store.get(NOTES_KEY).unwrap();
        journal.apply_import(&[], None).unwrap();
        assert_eq!(store.get(NOTES_KEY).unwrap(), before);
        assert_eq!(journal.notes().len(), 1);
    }
}
