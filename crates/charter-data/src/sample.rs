//! Bundled sample dataset.

use charter_core::CandleRecord;

use crate::csv::parse_candles;

/// Ten daily gold candles, newest first as the rows would be pasted.
pub const SAMPLE_CSV: &str = "time,open,high,low,close,volume
2025-09-05,1965.20,1972.50,1960.10,1968.30,12000
2025-09-04,1958.40,1966.00,1955.00,1964.50,9800
2025-09-03,1960.00,1965.50,1950.30,1957.20,15000
2025-09-02,1948.50,1962.00,1945.00,1958.00,20000
2025-09-01,1945.00,1955.00,1940.50,1950.30,18000
2025-08-31,1938.00,1948.50,1935.00,1945.10,22000
2025-08-30,1940.00,1945.50,1930.00,1938.40,16000
2025-08-29,1935.50,1942.00,1930.00,1940.00,14000
2025-08-28,1928.00,1938.00,1925.00,1935.50,12500
2025-08-27,1925.00,1932.50,1920.00,1928.00,13500";

/// Parse the bundled sample into candles, oldest first.
pub fn sample_candles() -> Vec<CandleRecord> {
    parse_candles(SAMPLE_CSV).unwrap_or_default()
}
