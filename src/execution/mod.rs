use async_trait::async_trait;
use crate::events::OrderTargetIntent;
use crate::types::Symbol;

pub mod dry_run;

/// Seam to whatever actually moves the position (broker, simulator, backtest
/// framework). Quantities are absolute targets, not deltas.
#[async_trait]
pub trait ExecutionAdapter: Send + Sync {
    async fn order_target(
        &self,
        symbol: &Symbol,
        target_quantity: i64,
        reference_price: f64,
    ) -> anyhow::Result<OrderTargetIntent>;
}
