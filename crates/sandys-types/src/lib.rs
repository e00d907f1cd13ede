// ─────────────────────────────────────────────────────────────────────
// Sandy's Law Engine — Types
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! State vectors, evaluation results, configuration, and the error
//! hierarchy shared by the Sandy's Law evaluator and simulator.

pub mod config;
pub mod error;
pub mod state;

pub use config::{EngineConfig, OmniumParams, RunParams, SimulationConfig};
pub use error::{SandysError, SandysResult};
pub use state::{EvaluationResult, Regime, RegimeFlags, SystemState};
