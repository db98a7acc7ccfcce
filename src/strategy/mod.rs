//! Strategy layer (signals).
//!
//! Strategies here are pure state machines over a price stream. They never
//! place orders themselves; a [`crate::runner::StrategyRunner`] hands their
//! decisions to an execution adapter.

pub mod sma_crossover;
