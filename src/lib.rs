//! Moving-average crossover signal bot primitives.
//!
//! The core is [`CrossoverSignalEngine`]: it keeps a rolling window of prices
//! for one instrument and turns each new observation into a target-position
//! [`Decision`]. Everything around it (price delivery, order placement,
//! recording) is reached through narrow seams so the engine stays a pure
//! function of its own state plus one price.

pub mod config;
pub mod error;
pub mod events;
pub mod execution;
pub mod observability;
pub mod prices;
pub mod record;
pub mod runner;
pub mod strategy;
pub mod types;

pub use crate::config::{BotConfig, EngineConfig};
pub use crate::error::SignalError;
pub use crate::runner::StrategyRunner;
pub use crate::strategy::sma_crossover::{
    Action, CrossoverSignalEngine, Decision, EngineState, PositionState,
};
