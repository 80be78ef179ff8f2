use crate::enums::Direction;
use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One executed position record.
///
/// Serialized field names follow the journal's interchange format
/// (camelCase), so exports remain readable by older tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Unique within a store, monotonically increasing by creation time.
    /// This is the deduplication key for merges.
    pub id: u64,
    /// Calendar date of the trade. Stored as an unambiguous sortable date;
    /// any locale-specific display string is derived at render time.
    pub date: NaiveDate,
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub lot_size: Decimal,
    /// Realized profit (positive) or loss (negative). Zero counts as
    /// neither a win nor a loss.
    pub pnl: Decimal,
    /// Empty string means "no strategy recorded".
    #[serde(default)]
    pub strategy: String,
    pub timeframe: String,
}

impl Trade {
    /// The `YYYY-MM` bucket key used for monthly performance aggregation.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Strictly positive P&L.
    pub fn is_win(&self) -> bool {
        self.pnl > Decimal::ZERO
    }

    /// Strictly negative P&L.
    pub fn is_loss(&self) -> bool {
        self.pnl < Decimal::ZERO
    }
}

/// User-supplied trade fields, before the journal assigns identity and date.
#[derive(Debug, Clone)]
pub struct TradeDraft {
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub lot_size: Decimal,
    pub pnl: Decimal,
    pub strategy: String,
    pub timeframe: String,
}

impl TradeDraft {
    /// Checks the required-field rules the entry form guarantees in the UI.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.symbol.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "symbol".to_string(),
                "must not be empty".to_string(),
            ));
        }
        if self.timeframe.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "timeframe".to_string(),
                "must not be empty".to_string(),
            ));
        }
        for (name, value) in [
            ("entryPrice", self.entry_price),
            ("exitPrice", self.exit_price),
            ("lotSize", self.lot_size),
        ] {
            if value <= Decimal::ZERO {
                return Err(CoreError::InvalidInput(
                    name.to_string(),
                    "must be a positive quantity".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Promotes the draft into a full `Trade` with journal-assigned identity.
    pub fn into_trade(self, id: u64, date: NaiveDate) -> Trade {
        Trade {
            id,
            date,
            symbol: self.symbol,
            direction: self.direction,
            entry_price: self.entry_price,
            exit_price: self.exit_price,
            lot_size: self.lot_size,
            pnl: self.pnl,
            strategy: self.strategy,
            timeframe: self.timeframe,
        }
    }
}

/// One free-text journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

/// User-supplied note text, before the journal assigns identity.
#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub text: String,
}

impl NoteDraft {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.text.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "text".to_string(),
                "must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_note(self, id: u64, timestamp: DateTime<Utc>) -> Note {
        Note {
            id,
            timestamp,
            text: self.text,
        }
    }
}
