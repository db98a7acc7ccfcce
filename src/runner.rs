//! Per-step driver: price in, signal record out, order target on crossover.

use crate::config::BotConfig;
use crate::events::SignalRecord;
use crate::execution::ExecutionAdapter;
use crate::record::RecordSink;
use crate::strategy::sma_crossover::{Action, CrossoverSignalEngine, Decision};
use crate::types::Symbol;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::SystemTime;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub symbol: Symbol,
    pub observations: u64,
    pub records: u64,
    pub enters: u64,
    pub exits: u64,
    pub rejected_prices: u64,
    pub has_position: bool,
    pub last_price: Option<f64>,
    pub last_moving_average: Option<f64>,
}

pub struct StrategyRunner {
    symbol: Symbol,
    engine: CrossoverSignalEngine,
    execution: Arc<dyn ExecutionAdapter>,
    records: Arc<dyn RecordSink>,
    summary: RunSummary,
}

impl StrategyRunner {
    pub fn new(
        cfg: BotConfig,
        execution: Arc<dyn ExecutionAdapter>,
        records: Arc<dyn RecordSink>,
    ) -> anyhow::Result<Self> {
        let engine = CrossoverSignalEngine::from_config(&cfg.engine).context("build engine")?;
        Ok(Self::with_engine(cfg.symbol, engine, execution, records))
    }

    /// Wrap an existing engine, e.g. one rebuilt from a snapshot.
    pub fn with_engine(
        symbol: Symbol,
        engine: CrossoverSignalEngine,
        execution: Arc<dyn ExecutionAdapter>,
        records: Arc<dyn RecordSink>,
    ) -> Self {
        let summary = RunSummary {
            symbol: symbol.clone(),
            observations: engine.observations(),
            has_position: engine.has_position(),
            ..Default::default()
        };
        Self {
            symbol,
            engine,
            execution,
            records,
            summary,
        }
    }

    pub fn engine(&self) -> &CrossoverSignalEngine {
        &self.engine
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Feed one price. A rejected price produces neither a record nor an order.
    pub async fn on_price(&mut self, price: f64) -> anyhow::Result<Decision> {
        let decision = match self.engine.observe(price) {
            Ok(d) => d,
            Err(e) => {
                self.summary.rejected_prices += 1;
                return Err(e).context(format!("observe {} price", self.symbol));
            }
        };
        self.summary.observations = self.engine.observations();
        self.summary.last_price = Some(decision.current_price);
        self.summary.last_moving_average = decision.moving_average;

        let record = SignalRecord::from_decision(
            SystemTime::now(),
            self.engine.observations(),
            self.symbol.clone(),
            &decision,
        );
        self.records.emit(record).context("emit signal record")?;
        self.summary.records += 1;

        match decision.action {
            Action::Enter => self.summary.enters += 1,
            Action::Exit => self.summary.exits += 1,
            Action::None => {}
        }
        self.summary.has_position = self.engine.has_position();

        if decision.is_actionable() {
            self.execution
                .order_target(&self.symbol, decision.target_quantity, decision.current_price)
                .await
                .with_context(|| {
                    format!(
                        "order target {} -> {}",
                        self.symbol, decision.target_quantity
                    )
                })?;
        }

        Ok(decision)
    }
}
