use anyhow::Context;
use clap::Parser;
use sma_crossover_bot::config::BotConfig;
use sma_crossover_bot::execution::dry_run::DryRunAdapter;
use sma_crossover_bot::execution::ExecutionAdapter;
use sma_crossover_bot::observability::init_tracing;
use sma_crossover_bot::prices::{read_prices, synthetic_walk};
use sma_crossover_bot::record::jsonl::JsonLinesRecordSink;
use sma_crossover_bot::record::{NoopRecordSink, RecordSink};
use sma_crossover_bot::strategy::sma_crossover::{CrossoverSignalEngine, EngineState};
use sma_crossover_bot::types::Symbol;
use sma_crossover_bot::{SignalError, StrategyRunner};
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "bot")]
struct Args {
    /// JSON config file; CLI flags override its values.
    #[arg(long, env = "SMA_BOT_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "SMA_BOT_SYMBOL")]
    symbol: Option<String>,

    #[arg(long, env = "SMA_BOT_PERIOD")]
    period: Option<usize>,

    #[arg(long, env = "SMA_BOT_TARGET_QUANTITY")]
    target_quantity: Option<i64>,

    /// Price file, one per line; `-` reads stdin. Without it a synthetic walk is used.
    #[arg(long)]
    prices: Option<PathBuf>,

    #[arg(long, default_value_t = 250)]
    iters: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value_t = 150.0)]
    start_price: f64,

    /// Write JSON-lines signal records here.
    #[arg(long)]
    records: Option<PathBuf>,

    /// Engine snapshot: restored from if present, written back after the run.
    #[arg(long)]
    state: Option<PathBuf>,

    #[arg(long, env = "SMA_BOT_LOG_JSON", default_value_t = false)]
    log_json: bool,
}

fn load_config(args: &Args) -> anyhow::Result<BotConfig> {
    let mut cfg = match &args.config {
        Some(path) => BotConfig::from_json_file(path)?,
        None => BotConfig::default(),
    };
    if let Some(symbol) = &args.symbol {
        cfg.symbol = Symbol::new(symbol.clone());
    }
    if let Some(period) = args.period {
        cfg.engine.period = period;
    }
    if let Some(qty) = args.target_quantity {
        cfg.engine.target_quantity = qty;
    }
    cfg.engine.validate()?;
    Ok(cfg)
}

fn load_prices(args: &Args) -> anyhow::Result<Vec<f64>> {
    match &args.prices {
        Some(path) if path.as_os_str() == "-" => read_prices(std::io::stdin().lock()),
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("open price file {}", path.display()))?;
            read_prices(BufReader::new(file))
        }
        None => Ok(synthetic_walk(args.start_price, args.iters, 0.02, args.seed)),
    }
}

fn load_engine(cfg: &BotConfig, state: Option<&PathBuf>) -> anyhow::Result<CrossoverSignalEngine> {
    if let Some(path) = state.filter(|p| p.exists()) {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read engine state {}", path.display()))?;
        let snapshot: EngineState = serde_json::from_str(&raw)
            .with_context(|| format!("parse engine state {}", path.display()))?;
        tracing::info!(path = %path.display(), observations = snapshot.observations, "resuming engine");
        return Ok(CrossoverSignalEngine::restore(&cfg.engine, snapshot)?);
    }
    Ok(CrossoverSignalEngine::from_config(&cfg.engine)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json)?;

    let cfg = load_config(&args)?;
    let prices = load_prices(&args)?;
    let engine = load_engine(&cfg, args.state.as_ref())?;

    let records: Arc<dyn RecordSink> = match &args.records {
        Some(path) => Arc::new(JsonLinesRecordSink::create(path)?),
        None => Arc::new(NoopRecordSink),
    };
    let execution: Arc<dyn ExecutionAdapter> = Arc::new(DryRunAdapter::new());

    tracing::info!(
        symbol = %cfg.symbol,
        period = cfg.engine.period,
        target_quantity = cfg.engine.target_quantity,
        bars = prices.len(),
        "starting run"
    );

    let mut runner = StrategyRunner::with_engine(cfg.symbol.clone(), engine, execution, records);
    for price in prices {
        if let Err(e) = runner.on_price(price).await {
            if e.downcast_ref::<SignalError>().is_some() {
                // Bad bar: skip the period and keep going.
                tracing::warn!(error = %e, "skipping price");
                continue;
            }
            return Err(e);
        }
    }

    if let Some(path) = &args.state {
        let raw = serde_json::to_string_pretty(&runner.engine().snapshot())?;
        std::fs::write(path, raw)
            .with_context(|| format!("write engine state {}", path.display()))?;
    }

    println!("{}", serde_json::to_string_pretty(runner.summary())?);
    Ok(())
}
