// ─────────────────────────────────────────────────────────────────────
// Sandy's Law Engine — Evaluator and Simulator
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Constraint evaluation and trajectory simulation for trapped systems.
//!
//! `ConstraintEvaluator` maps one `SystemState` to a portal score, a
//! regime, the temporal modulation γ, the Sandy's Law time rate, and
//! three condition flags. `TrajectorySimulator` ramps the entropy
//! gradient, softens the trap and releases entropy export step by step,
//! and logs every evaluation into a `Trajectory`.
//!
//! # Invariants
//!
//! 1. **Pure classification**: portal score and regime depend only on
//!    `(Z, Σ, dH/dt)` and the evaluator's configuration.
//!
//! 2. **Non-negative time rate**: `tau_rate` is clamped at zero.
//!
//! 3. **Flag agreement**: `flags.portal_open` is derived from the
//!    regime, so it holds exactly when the regime is `Open`.
//!
//! 4. **Fixed length**: a successful run logs exactly `steps` records;
//!    an invalid run fails before the first step.

pub mod evaluator;
pub mod sampling;
pub mod simulator;
pub mod trajectory;

pub use evaluator::{classify_regime, ConstraintEvaluator};
pub use sampling::Linspace;
pub use simulator::{TrajectorySimulator, DEFAULT_STEPS};
pub use trajectory::{
    RegimeCounts, Trajectory, TrajectoryColumns, TrajectoryRecord, TrajectorySummary,
};
