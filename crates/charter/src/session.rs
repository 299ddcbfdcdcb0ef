//! The active chart dataset and the operations that replace it.

use thiserror::Error;

use charter_config::{ChartConfig, Config, DataConfig};
use charter_core::CandleRecord;
use charter_data::{parse_candles, retain_valid, DataSource, SAMPLE_CSV};

use crate::surface::{ChartSurface, SeriesPoint};

/// Why a load left the chart unchanged.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("no valid candle data found, expected rows like time,open,high,low,close,volume")]
    NoValidData,
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

/// Owns the dataset currently shown on a chart surface.
///
/// Every successful load replaces the whole dataset. A failed load keeps
/// whatever was shown before.
pub struct ChartSession<S: ChartSurface> {
    surface: S,
    chart: ChartConfig,
    data: DataConfig,
    candles: Vec<CandleRecord>,
}

impl<S: ChartSurface> ChartSession<S> {
    pub fn new(surface: S, config: &Config) -> Self {
        Self {
            surface,
            chart: config.chart.clone(),
            data: config.data.clone(),
            candles: Vec::new(),
        }
    }

    /// Parse text and show it. Returns the number of candles now displayed.
    pub fn load_text(&mut self, text: &str) -> Result<usize, LoadError> {
        match parse_candles(text) {
            Some(candles) => self.load_candles(candles),
            None => {
                log::warn!("No valid candle rows in input");
                Err(LoadError::NoValidData)
            }
        }
    }

    pub fn load_candles(&mut self, mut candles: Vec<CandleRecord>) -> Result<usize, LoadError> {
        if self.data.drop_invalid_rows {
            retain_valid(&mut candles);
        }
        if candles.is_empty() {
            return Err(LoadError::NoValidData);
        }

        self.surface
            .set_data(candles.iter().map(SeriesPoint::from).collect());
        self.surface.fit_content();
        log::info!("Loaded {} rows", candles.len());

        self.candles = candles;
        Ok(self.candles.len())
    }

    pub fn load_sample(&mut self) -> Result<usize, LoadError> {
        self.load_text(SAMPLE_CSV)
    }

    pub fn load_source(&mut self, source: &dyn DataSource) -> Result<usize, LoadError> {
        log::debug!("Reading candles from {}", source.describe());
        let text = source.read_text()?;
        self.load_text(&text)
    }

    /// Empty the chart and drop the dataset.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.candles.clear();
    }

    /// Fit the surface to a viewport, keeping the configured minimum height.
    pub fn resize(&mut self, viewport_width: u32, viewport_height: u32) {
        let height = self.chart.height_for_viewport(viewport_height);
        self.surface.resize(viewport_width, height);
    }

    pub fn candles(&self) -> &[CandleRecord] {
        &self.candles
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::CandleTime;
    use charter_data::TextSource;

    #[derive(Default)]
    struct RecordingSurface {
        points: Vec<SeriesPoint>,
        calls: Vec<&'static str>,
        size: (u32, u32),
    }

    impl ChartSurface for RecordingSurface {
        fn set_data(&mut self, points: Vec<SeriesPoint>) {
            self.points = points;
            self.calls.push("set_data");
        }

        fn fit_content(&mut self) {
            self.calls.push("fit_content");
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
    }

    fn session() -> ChartSession<RecordingSurface> {
        ChartSession::new(RecordingSurface::default(), &Config::default())
    }

    #[test]
    fn test_load_sample() {
        let mut session = session();
        assert_eq!(session.load_sample().unwrap(), 10);
        assert_eq!(session.surface().calls, vec!["set_data", "fit_content"]);
        assert_eq!(
            session.surface().points[0].time,
            CandleTime::DateLiteral("2025-08-27".to_string())
        );
    }

    #[test]
    fn test_failed_load_keeps_previous_data() {
        let mut session = session();
        session.load_sample().unwrap();

        let err = session.load_text("not,a,chart").unwrap_err();
        assert!(matches!(err, LoadError::NoValidData));
        assert_eq!(session.candles().len(), 10);
        assert_eq!(session.surface().points.len(), 10);
    }

    #[test]
    fn test_load_replaces_dataset() {
        let mut session = session();
        session.load_sample().unwrap();

        let source = TextSource::new("1700000000,1,2,0.5,1.5\n1700000060,1.5,2.5,1,2");
        assert_eq!(session.load_source(&source).unwrap(), 2);
        assert_eq!(session.candles().len(), 2);
        assert_eq!(session.surface().points[1].time, CandleTime::EpochSeconds(1700000060));
    }

    #[test]
    fn test_clear() {
        let mut session = session();
        session.load_sample().unwrap();
        session.clear();
        assert!(session.candles().is_empty());
        assert!(session.surface().points.is_empty());
    }

    #[test]
    fn test_nan_rows_kept_by_default() {
        let mut session = session();
        let loaded = session
            .load_text("time,open,high,low,close\n2025-09-05,x,2,0.5,1.5\n2025-09-06,1,2,0.5,1.5")
            .unwrap();
        assert_eq!(loaded, 2);
    }

    #[test]
    fn test_drop_invalid_rows() {
        let mut config = Config::default();
        config.data.drop_invalid_rows = true;
        let mut session = ChartSession::new(RecordingSurface::default(), &config);

        let loaded = session
            .load_text("time,open,high,low,close\n2025-09-05,x,2,0.5,1.5\n2025-09-06,1,2,0.5,1.5")
            .unwrap();
        assert_eq!(loaded, 1);

        let err = session
            .load_text("time,open,high,low,close\n2025-09-05,x,2,0.5,1.5\n2025-09-06,1,0,0.5,1.5")
            .unwrap_err();
        assert!(matches!(err, LoadError::NoValidData));
        assert_eq!(session.candles().len(), 1);
    }

    #[test]
    fn test_resize_respects_min_height() {
        let mut session = session();
        session.resize(1024, 300);
        assert_eq!(session.surface().size, (1024, 320));
        session.resize(1024, 1000);
        assert_eq!(session.surface().size, (1024, 600));
    }
}
