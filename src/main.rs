use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime::Runtime;

use signal_scope::Cli;
use signal_scope::data::load_candle_set_async;

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let report = rt.block_on(async {
        // C. Load candles (blocking I/O off the async threads)
        let candles = load_candle_set_async(args.candles.clone()).await?;
        log::info!(
            "📂 Loaded {} timeframe(s) for {} from {:?}",
            candles.len(),
            args.symbol,
            args.candles
        );

        // D. Analyse
        let engine = args.build_engine();
        anyhow::Ok(engine.analyze(args.request(candles)).await)
    })?;

    // E. Print
    let json = if args.pretty {
        serde_json::to_string_pretty(&report.analysis)
    } else {
        serde_json::to_string(&report.analysis)
    }
    .context("Failed to serialize analysis")?;
    println!("{}", json);

    Ok(())
}
