use crate::error::TransferError;
use core_types::{Note, Trade};
use serde::Deserialize;
use tracing::debug;

/// The validated contents of a user-chosen import file.
///
/// Only `trades` is mandatory; a file without notes merges trades alone.
/// Extra top-level fields (metadata, statistics) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportPayload {
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub notes: Option<Vec<Note>>,
}

impl ImportPayload {
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn note_count(&self) -> usize {
        self.notes.as_ref().map_or(0, Vec::len)
    }
}

/// Parses and validates an import file.
///
/// Rejects the payload when the top-level `trades` field is absent or not
/// a sequence, before any entity deserialization, so the caller can abort
/// without touching the stores.
pub fn parse_import(contents: &str) -> Result<ImportPayload, TransferError> {
    let value: serde_json::Value = serde_json::from_str(contents)
        .map_err(|e| TransferError::InvalidFormat(e.to_string()))?;

    match value.get("trades") {
        None => {
            return Err(TransferError::InvalidFormat(
                "missing 'trades' field".to_string(),
            ));
        }
        Some(trades) if !trades.is_array() => {
            return Err(TransferError::InvalidFormat(
                "'trades' is not an array".to_string(),
            ));
        }
        Some(_) => {}
    }

    let payload: ImportPayload =
        serde_json::from_value(value).map_err(|e| TransferError::InvalidFormat(e.to_string()))?;
    debug!(
        trades = payload.trade_count(),
        notes = payload.note_count(),
        "import file parsed"
    );
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRADE_JSON: &str = r#"{
        "id": 1,
        "date": "2024-01-15",
        "symbol": "EURUSD",
        "direction": "long",
        "entryPrice": "1.0850",
        "exitPrice": "1.0900",
        "lotSize": "0.5",
        "pnl": "100",
        "strategy": "Breakout",
        "timeframe": "H1"
    }"#;

    #[test]
    fn accepts_a_full_export_document() {
        let contents = format!(
            r#"{{
                "metadata": {{"exportDate": "2024-03-01T12:00:00Z", "version": "2.0", "source": "Trading Journal Demo"}},
                "trades": [{TRADE_JSON}],
                "notes": [{{"id": 2, "timestamp": "2024-01-15T10:00:00Z", "text": "good entry"}}]
            }}"#
        );
        let payload = parse_import(&contents).unwrap();
        assert_eq!(payload.trade_count(), 1);
        assert_eq!(payload.note_count(), 1);
    }

    #[test]
    fn notes_field_is_optional() {
        let contents = format!(r#"{{"trades": [{TRADE_JSON}]}}"#);
        let payload = parse_import(&contents).unwrap();
        assert!(payload.notes.is_none());
        assert_eq!(payload.note_count(), 0);
    }

    #[test]
    fn empty_trades_array_is_valid() {
        let payload = parse_import(r#"{"trades": []}"#).unwrap();
        assert_eq!(payload.trade_count(), 0);
    }

    #[test]
    fn missing_trades_field_is_rejected() {
        let err = parse_import(r#"{"notes": []}"#).unwrap_err();
        assert!(matches!(err, TransferError::InvalidFormat(_)));
    }

    #[test]
    fn non_array_trades_field_is_rejected() {
        let err = parse_import(r#"{"trades": "lots"}"#).unwrap_err();
        assert!(matches!(err, TransferError::InvalidFormat(_)));
    }

    #[test]
    fn unparseable_json_is_rejected() {
        assert!(parse_import("not json").is_err());
    }

    #[test]
    fn numeric_prices_parse_as_well_as_strings() {
        let contents = r#"{"trades": [{
            "id": 1,
            "date": "2024-01-15",
            "symbol": "EURUSD",
            "direction": "buy",
            "entryPrice": 1.085,
            "exitPrice": 1.09,
            "lotSize": 0.5,
            "pnl": -12.5,
            "timeframe": "H1"
        }]}"#;
        let payload = parse_import(contents).unwrap();
        assert_eq!(payload.trades[0].strategy, "");
        assert_eq!(
            payload.trades[0].direction,
            core_types::Direction::Long
        );
    }
}
