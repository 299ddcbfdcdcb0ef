//! Data loading utilities for charter.

pub mod csv;
pub mod export;
pub mod sample;
pub mod source;
pub mod validation;

pub use self::csv::{normalize_time, parse_candles, ColumnMap, DELIMITERS};
pub use export::{export_candles_csv, write_candles_csv};
pub use sample::{sample_candles, SAMPLE_CSV};
pub use source::{CsvLoader, DataSource, SampleSource, StdinSource, TextSource};
pub use validation::{retain_valid, validate_candle};
