//! Write normalized candles back out as CSV.

use std::io::Write;
use std::path::Path;

use charter_core::CandleRecord;

/// Write candles with a `time,open,high,low,close,volume` header.
pub fn write_candles_csv<W: Write>(candles: &[CandleRecord], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for candle in candles {
        wtr.serialize(candle)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write candles to a file, replacing it if present.
pub fn export_candles_csv<P: AsRef<Path>>(candles: &[CandleRecord], path: P) -> anyhow::Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_candles_csv(candles, file)?;
    log::info!("Exported {} candles to {}", candles.len(), path.as_ref().display());
    Ok(())
}
