use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::strategy::sma_crossover::{Action, Decision};
use crate::types::Symbol;

/// One row of the per-step signal log: the price seen and the mean it was
/// compared against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub ts: SystemTime,
    /// 1-based observation index.
    pub step: u64,
    pub symbol: Symbol,
    pub price: f64,
    pub moving_average: Option<f64>,
    pub action: Action,
}

impl SignalRecord {
    pub fn from_decision(ts: SystemTime, step: u64, symbol: Symbol, decision: &Decision) -> Self {
        Self {
            ts,
            step,
            symbol,
            price: decision.current_price,
            moving_average: decision.moving_average,
            action: decision.action,
        }
    }
}

/// Request to hold exactly `target_quantity` of `symbol`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderTargetIntent {
    pub ts: SystemTime,
    pub symbol: Symbol,
    pub target_quantity: i64,
    /// Price observed when the decision was made.
    pub reference_price: f64,
}
