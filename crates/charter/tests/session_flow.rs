//! End-to-end tests: text on disk to rendered chart JSON.

use std::io::Write;

use charter::{ChartSession, JsonSurface, LoadError};
use charter_config::Config;
use charter_data::CsvLoader;

fn json_session(config: &Config) -> ChartSession<JsonSurface> {
    ChartSession::new(JsonSurface::new(config.chart.clone()), config)
}

/// A semicolon file with epoch milliseconds renders as numeric times, oldest first.
#[test]
fn test_file_to_chart_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("btc.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Time;Open;High;Low;Close;Volume").unwrap();
    writeln!(file, "1700000060000;101;103;100;102;7").unwrap();
    writeln!(file, "1700000000000;100;102;99;101;5").unwrap();
    drop(file);

    let config = Config::default();
    let mut session = json_session(&config);
    session.resize(1280, 800);
    assert_eq!(session.load_source(&CsvLoader::new(&path)).unwrap(), 2);

    let mut out = Vec::new();
    session.surface().render(&mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(json["options"]["height"], 480);
    assert_eq!(json["options"]["width"], 1280);
    assert_eq!(json["fitContent"], true);
    assert_eq!(json["series"][0]["time"], 1700000000);
    assert_eq!(json["series"][1]["time"], 1700000060);
    assert!(json["series"][0].get("volume").is_none());
}

/// A missing file surfaces as a source error, not as "no data".
#[test]
fn test_missing_file() {
    let config = Config::default();
    let mut session = json_session(&config);
    let err = session
        .load_source(&CsvLoader::new("/no/such/file.csv"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Source(_)));
}

/// Clearing after a load renders an empty series.
#[test]
fn test_clear_renders_empty_series() {
    let config = Config::default();
    let mut session = json_session(&config);
    session.load_sample().unwrap();
    session.clear();

    let json = session.into_surface().to_json();
    assert_eq!(json["series"].as_array().map(Vec::len), Some(0));
}
