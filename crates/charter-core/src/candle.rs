//! Candle data structures for OHLCV data.

use serde::Serialize;

use crate::time::CandleTime;

/// OHLCV candle as produced by the text parser.
///
/// Records are built once per parse and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleRecord {
    pub time: CandleTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl CandleRecord {
    pub fn new(time: CandleTime, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Trait for types that provide OHLCV data.
pub trait OHLCV {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;
    fn volume(&self) -> u64;
}

impl OHLCV for CandleRecord {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }

    fn volume(&self) -> u64 {
        self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_time_untagged() {
        let candle = CandleRecord::new(
            CandleTime::DateLiteral("2025-09-05".to_string()),
            1965.2,
            1972.5,
            1960.1,
            1968.3,
            12000,
        );
        let json = serde_json::to_value(&candle).unwrap();
        assert_eq!(json["time"], "2025-09-05");
        assert_eq!(json["volume"], 12000);

        let candle = CandleRecord::new(CandleTime::EpochSeconds(1700000000), 1.0, 2.0, 0.5, 1.5, 0);
        let json = serde_json::to_value(&candle).unwrap();
        assert_eq!(json["time"], 1700000000);
    }
}
