use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the built-in default.
pub fn init_tracing(log_json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sma_crossover_bot=debug"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if log_json {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;
    }
    Ok(())
}
