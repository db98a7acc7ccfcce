use crate::events::OrderTargetIntent;
use crate::execution::ExecutionAdapter;
use crate::types::{Side, Symbol};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::SystemTime;

/// Adapter that accepts every target without touching a venue.
///
/// It remembers the last target per symbol only to log which way the
/// requested change points; there are no fills behind it.
#[derive(Debug, Default)]
pub struct DryRunAdapter {
    last_target: Mutex<HashMap<Symbol, i64>>,
    history: Mutex<Vec<OrderTargetIntent>>,
}

impl DryRunAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<OrderTargetIntent> {
        self.history.lock().clone()
    }
}

#[async_trait]
impl ExecutionAdapter for DryRunAdapter {
    async fn order_target(
        &self,
        symbol: &Symbol,
        target_quantity: i64,
        reference_price: f64,
    ) -> anyhow::Result<OrderTargetIntent> {
        let previous = self
            .last_target
            .lock()
            .insert(symbol.clone(), target_quantity)
            .unwrap_or(0);
        let side = Side::for_target(previous, target_quantity);

        tracing::info!(
            %symbol,
            previous,
            target_quantity,
            reference_price,
            ?side,
            "dry-run order target"
        );

        let intent = OrderTargetIntent {
            ts: SystemTime::now(),
            symbol: symbol.clone(),
            target_quantity,
            reference_price,
        };
        self.history.lock().push(intent.clone());
        Ok(intent)
    }
}
