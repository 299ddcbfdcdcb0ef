//! Charter - render pasted or file OHLCV text as a candlestick series.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use charter::{ChartSession, JsonSurface};
use charter_config::Config;
use charter_data::{
    export_candles_csv, retain_valid, CsvLoader, DataSource, SampleSource, StdinSource,
};

#[derive(Parser, Debug)]
#[command(name = "charter", version, about)]
struct Cli {
    /// Config file (defaults to ./config.toml, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the chart JSON (stdout when omitted)
    #[arg(long, short)]
    out: Option<PathBuf>,

    #[arg(long, default_value_t = 1280)]
    viewport_width: u32,

    #[arg(long, default_value_t = 800)]
    viewport_height: u32,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chart the bundled daily gold sample
    Sample,
    /// Chart candles from a file, or `-` for standard input
    Load { input: String },
    /// Write normalized candles from a file (or `-`) as CSV
    Export {
        input: String,
        #[arg(long)]
        csv: PathBuf,
    },
    /// Emit an empty chart
    Clear,
}

fn source_for(input: &str) -> Box<dyn DataSource> {
    if input == "-" {
        Box::new(StdinSource)
    } else {
        Box::new(CsvLoader::new(input))
    }
}

fn write_chart(surface: &JsonSurface, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            surface.render(&mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            surface.render(&mut writer)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn export(input: &str, csv: &Path, config: &Config) -> Result<()> {
    let mut candles = source_for(input).load()?;
    if config.data.drop_invalid_rows {
        retain_valid(&mut candles);
    }
    export_candles_csv(&candles, csv)
}

fn run() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load_default(),
    };

    let mut session = ChartSession::new(JsonSurface::new(config.chart.clone()), &config);
    session.resize(cli.viewport_width, cli.viewport_height);

    match &cli.command {
        Some(Command::Export { input, csv }) => return export(input, csv, &config),
        Some(Command::Sample) => {
            session.load_source(&SampleSource)?;
        }
        Some(Command::Load { input }) => {
            session.load_source(source_for(input).as_ref())?;
        }
        Some(Command::Clear) => session.clear(),
        None => {
            if config.general.load_sample_on_start {
                session.load_sample()?;
            }
        }
    }

    write_chart(session.surface(), cli.out.as_deref())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
