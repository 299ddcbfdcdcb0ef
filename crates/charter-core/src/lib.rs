//! Core types for the charter application.
//!
//! This crate provides the fundamental candle data structures:
//! - `CandleRecord` - OHLCV candle data
//! - `CandleTime` - date literal, epoch seconds or unrecognized text
//! - `compare_times` - ordering used for parsed candle sequences

pub mod candle;
pub mod time;

pub use candle::{CandleRecord, OHLCV};
pub use time::{compare_times, CandleTime};
