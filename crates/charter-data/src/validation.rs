//! Validation utilities for parsed candles.
//!
//! The parser keeps rows with unparsable prices; these helpers let a caller
//! reject them before charting.

use charter_core::{CandleRecord, OHLCV};

/// Validate a candle has reasonable values.
pub fn validate_candle<C: OHLCV>(candle: &C) -> bool {
    candle.open().is_finite()
        && candle.high().is_finite()
        && candle.low().is_finite()
        && candle.close().is_finite()
        && candle.high() >= candle.low()
        && candle.open() > 0.0
        && candle.close() > 0.0
        && candle.low() > 0.0
}

/// Drop invalid candles in place, returning how many were removed.
pub fn retain_valid(candles: &mut Vec<CandleRecord>) -> usize {
    let before = candles.len();
    candles.retain(|c| validate_candle(c));
    let dropped = before - candles.len();
    if dropped > 0 {
        log::warn!("Dropped {} invalid candles", dropped);
    }
    dropped
}
