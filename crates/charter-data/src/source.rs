//! Data source trait and the text sources candles can come from.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use charter_core::CandleRecord;

use crate::csv::parse_candles;
use crate::sample::SAMPLE_CSV;

/// Trait for types that supply delimited candle text.
///
/// This trait uses `anyhow::Result` for flexible error handling.
pub trait DataSource {
    /// Short description of where the text comes from, for log lines.
    fn describe(&self) -> String;

    fn read_text(&self) -> anyhow::Result<String>;

    /// Read and parse in one go. Errors when the text holds no usable rows.
    fn load(&self) -> anyhow::Result<Vec<CandleRecord>> {
        let text = self.read_text()?;
        parse_candles(&text).ok_or_else(|| anyhow!("no valid candle rows in {}", self.describe()))
    }
}

/// Text that is already in memory, e.g. pasted by the user.
pub struct TextSource {
    text: String,
}

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DataSource for TextSource {
    fn describe(&self) -> String {
        "pasted text".to_string()
    }

    fn read_text(&self) -> anyhow::Result<String> {
        Ok(self.text.clone())
    }
}

/// Loads candle text from a file on disk.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for CsvLoader {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_text(&self) -> anyhow::Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))
    }
}

/// Reads everything from standard input.
pub struct StdinSource;

impl DataSource for StdinSource {
    fn describe(&self) -> String {
        "standard input".to_string()
    }

    fn read_text(&self) -> anyhow::Result<String> {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read standard input")?;
        Ok(text)
    }
}

/// The bundled sample dataset.
pub struct SampleSource;

impl DataSource for SampleSource {
    fn describe(&self) -> String {
        "sample dataset".to_string()
    }

    fn read_text(&self) -> anyhow::Result<String> {
        Ok(SAMPLE_CSV.to_string())
    }
}
