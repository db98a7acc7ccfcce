//! Price-vs-SMA crossover signal engine.
//!
//! Tracks a single instrument:
//! - keeps the most recent `period` prices (oldest -> newest),
//! - once `period` observations have been seen, computes their simple mean,
//! - goes **Long** when the previous price sat below the mean and the current
//!   one sits above it, and back to **Flat** on the mirror-image move.
//!
//! Comparisons are strict on both sides: a price equal to the mean never
//! counts as a crossing.

use crate::config::EngineConfig;
use crate::error::SignalError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionState {
    #[default]
    Flat,
    Long,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move to the full target position.
    Enter,
    /// Move to flat.
    Exit,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    /// Absolute target holding for `Enter`; zero otherwise. Only `Enter` and
    /// `Exit` are meant to be turned into orders.
    pub target_quantity: i64,
    /// `None` while the engine is still warming up.
    pub moving_average: Option<f64>,
    pub current_price: f64,
}

impl Decision {
    fn hold(price: f64, moving_average: Option<f64>) -> Self {
        Self {
            action: Action::None,
            target_quantity: 0,
            moving_average,
            current_price: price,
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.action != Action::None
    }
}

/// Everything needed to resume an engine exactly where it stopped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    /// Oldest -> newest.
    pub window: Vec<f64>,
    pub observations: u64,
    pub position: PositionState,
}

#[derive(Clone, Debug)]
pub struct CrossoverSignalEngine {
    period: usize,
    target_quantity: i64,
    window: VecDeque<f64>,
    observations: u64,
    position: PositionState,
}

impl CrossoverSignalEngine {
    pub fn new(period: usize, target_quantity: i64) -> Result<Self, SignalError> {
        Self::from_config(&EngineConfig {
            period,
            target_quantity,
        })
    }

    pub fn from_config(cfg: &EngineConfig) -> Result<Self, SignalError> {
        cfg.validate()?;
        Ok(Self {
            period: cfg.period,
            target_quantity: cfg.target_quantity,
            window: VecDeque::with_capacity(cfg.period),
            observations: 0,
            position: PositionState::Flat,
        })
    }

    /// Rebuild an engine from a snapshot taken by [`Self::snapshot`].
    pub fn restore(cfg: &EngineConfig, state: EngineState) -> Result<Self, SignalError> {
        let mut engine = Self::from_config(cfg)?;
        if state.window.len() > engine.period {
            return Err(SignalError::invalid_input(format!(
                "snapshot window holds {} prices but period is {}",
                state.window.len(),
                engine.period
            )));
        }
        if let Some(bad) = state.window.iter().find(|p| !p.is_finite()) {
            return Err(SignalError::invalid_input(format!(
                "snapshot window contains non-finite price {bad}"
            )));
        }
        // The window holds every price seen until it fills, then exactly `period`.
        let expected = state.observations.min(engine.period as u64);
        if state.window.len() as u64 != expected {
            return Err(SignalError::invalid_input(format!(
                "snapshot counts {} observations but holds {} prices (expected {} for period {})",
                state.observations,
                state.window.len(),
                expected,
                engine.period
            )));
        }
        engine.window.extend(state.window);
        engine.observations = state.observations;
        engine.position = state.position;
        Ok(engine)
    }

    pub fn snapshot(&self) -> EngineState {
        EngineState {
            window: self.window.iter().copied().collect(),
            observations: self.observations,
            position: self.position,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn target_quantity(&self) -> i64 {
        self.target_quantity
    }

    pub fn position(&self) -> PositionState {
        self.position
    }

    pub fn has_position(&self) -> bool {
        self.position == PositionState::Long
    }

    /// Total prices accepted since construction, including evicted ones.
    pub fn observations(&self) -> u64 {
        self.observations
    }

    pub fn window(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.window.iter().copied()
    }

    pub fn is_warm(&self) -> bool {
        self.observations >= self.period as u64
    }

    pub fn observe(&mut self, price: f64) -> Result<Decision, SignalError> {
        if !price.is_finite() {
            return Err(SignalError::invalid_input(format!(
                "price must be finite, got {price}"
            )));
        }

        let observations = self
            .observations
            .checked_add(1)
            .ok_or_else(|| SignalError::invalid_input("observation counter exhausted"))?;

        if self.window.len() == self.period {
            self.window.pop_front();
        }
        self.window.push_back(price);
        self.observations = observations;

        if !self.is_warm() {
            tracing::trace!(
                observations = self.observations,
                period = self.period,
                "warming up"
            );
            return Ok(Decision::hold(price, None));
        }

        let ma = self.mean();
        // Warm implies a full window, and period >= 2.
        let previous = self.window[self.window.len() - 2];

        let decision = match self.position {
            PositionState::Flat if previous < ma && price > ma => {
                self.position = PositionState::Long;
                Decision {
                    action: Action::Enter,
                    target_quantity: self.target_quantity,
                    moving_average: Some(ma),
                    current_price: price,
                }
            }
            PositionState::Long if previous > ma && price < ma => {
                self.position = PositionState::Flat;
                Decision {
                    action: Action::Exit,
                    target_quantity: 0,
                    moving_average: Some(ma),
                    current_price: price,
                }
            }
            _ => Decision::hold(price, Some(ma)),
        };

        if decision.is_actionable() {
            tracing::debug!(
                action = ?decision.action,
                price,
                ma,
                previous,
                "crossover"
            );
        }
        Ok(decision)
    }

    fn mean(&self) -> f64 {
        let n = self.window.len() as f64;
        let sum: f64 = self.window.iter().sum();
        if sum.is_finite() {
            sum / n
        } else {
            // Finite prices near f64::MAX overflow the plain sum.
            self.window.iter().map(|p| p / n).sum()
        }
    }
}
