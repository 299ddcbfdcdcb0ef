//! Charting surface abstraction.
//!
//! The session never draws anything itself. It hands series points to a
//! [`ChartSurface`], which may be a widget, a window or, as here, a JSON
//! payload for a web candlestick widget.

use std::io::Write;

use serde::Serialize;
use serde_json::json;

use charter_config::ChartConfig;
use charter_core::{CandleRecord, CandleTime};

/// One candle as the chart sees it. Volume is not drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub time: CandleTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl From<&CandleRecord> for SeriesPoint {
    fn from(candle: &CandleRecord) -> Self {
        Self {
            time: candle.time.clone(),
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
        }
    }
}

/// Something that can display a candlestick series.
pub trait ChartSurface {
    /// Replace the displayed series.
    fn set_data(&mut self, points: Vec<SeriesPoint>);

    /// Scale the time axis so the whole series is visible.
    fn fit_content(&mut self);

    fn resize(&mut self, width: u32, height: u32);

    fn clear(&mut self) {
        self.set_data(Vec::new());
    }
}

/// Surface that renders its state as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonSurface {
    config: ChartConfig,
    width: u32,
    height: u32,
    points: Vec<SeriesPoint>,
    fit_content: bool,
}

impl JsonSurface {
    pub fn new(config: ChartConfig) -> Self {
        let height = config.min_height;
        Self {
            config,
            width: 0,
            height,
            points: Vec::new(),
            fit_content: false,
        }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Widget options and series data.
    ///
    /// Non-finite prices come out as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        let c = &self.config;
        json!({
            "options": {
                "layout": {
                    "background": { "color": c.background },
                    "textColor": c.text_color,
                },
                "grid": {
                    "vertLines": { "color": c.grid_color },
                    "horzLines": { "color": c.grid_color },
                },
                "rightPriceScale": { "borderColor": c.border_color },
                "timeScale": { "borderColor": c.border_color },
                "width": self.width,
                "height": self.height,
                "autoSize": c.auto_size,
            },
            "fitContent": self.fit_content,
            "series": self.points,
        })
    }

    pub fn render<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, &self.to_json())
    }
}

impl ChartSurface for JsonSurface {
    fn set_data(&mut self, points: Vec<SeriesPoint>) {
        self.points = points;
        self.fit_content = false;
    }

    fn fit_content(&mut self) {
        self.fit_content = true;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
