//! Charter - load OHLCV text onto a candlestick chart surface.

pub mod session;
pub mod surface;

pub use session::{ChartSession, LoadError};
pub use surface::{ChartSurface, JsonSurface, SeriesPoint};
