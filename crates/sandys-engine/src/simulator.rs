// ─────────────────────────────────────────────────────────────────────
// Sandy's Law Engine — Trajectory Simulator
// ─────────────────────────────────────────────────────────────────────
//! Deterministic time-stepping over a linear entropy-gradient ramp.
//!
//! Per step i with t_i, h_i evenly spaced over [0, 1] and [H_0, H_1]:
//!
//!   Z_i   = max(0, Z_0·(1 - s·t_i))                   (softening)
//!   Σ_i   = Σ_0·(1 + g·(h_i / max(H_1, ε))^p)         (nonlinear release)
//!   τ_gr  = sqrt(max(0, 1 + 2·c_φ·Z_i))               (weak-field proxy)
//!
//! The loop always runs exactly `steps` iterations. Crossing detection
//! is left to `Trajectory::portal_crossing`.

use sandys_types::{RunParams, SandysResult, SimulationConfig, SystemState};

use crate::evaluator::ConstraintEvaluator;
use crate::sampling::Linspace;
use crate::trajectory::{Trajectory, TrajectoryRecord};

/// Default number of samples per run.
pub const DEFAULT_STEPS: usize = 200;

/// Drives a `ConstraintEvaluator` across one run.
#[derive(Debug, Clone, Default)]
pub struct TrajectorySimulator {
    evaluator: ConstraintEvaluator,
    config: SimulationConfig,
}

impl TrajectorySimulator {
    pub fn new(evaluator: ConstraintEvaluator, config: SimulationConfig) -> SandysResult<Self> {
        config.validate()?;
        Ok(Self { evaluator, config })
    }

    pub fn evaluator(&self) -> &ConstraintEvaluator {
        &self.evaluator
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Trap strength at normalised time `t`.
    pub fn trap_strength(&self, z0: f64, t: f64, soften_z: bool) -> f64 {
        if soften_z {
            (z0 * (1.0 - self.config.softening_rate * t)).max(0.0)
        } else {
            z0
        }
    }

    /// Entropy export rate under nonlinear release.
    pub fn export_rate(&self, sigma0: f64, entropy_grad: f64, entropy_end: f64) -> f64 {
        let ratio = entropy_grad / entropy_end.max(self.config.release_floor);
        sigma0 * (1.0 + self.config.release_gain * ratio.powi(self.config.release_exponent))
    }

    /// Weak-field proper-time rate dτ/dt = sqrt(1 + 2φ), φ = c_φ·Z.
    pub fn proper_time_proxy(&self, z: f64) -> f64 {
        let phi = self.config.gr_potential_coeff * z;
        (1.0 + 2.0 * phi).max(0.0).sqrt()
    }

    /// Time-evolve a trapped system.
    ///
    /// Fails with `InvalidParameter` before any step if `steps < 1`, an
    /// input is non-finite, or `sigma0 < 0`. The range of `z0` is left
    /// to the caller; softening clamps Z at zero.
    pub fn run(
        &self,
        z0: f64,
        sigma0: f64,
        entropy_start: f64,
        entropy_end: f64,
        steps: usize,
        soften_z: bool,
    ) -> SandysResult<Trajectory> {
        self.run_params(&RunParams {
            z0,
            sigma0,
            entropy_start,
            entropy_end,
            steps,
            soften_z,
        })
    }

    /// `run` with 200 steps and softening enabled.
    pub fn run_default(
        &self,
        z0: f64,
        sigma0: f64,
        entropy_start: f64,
        entropy_end: f64,
    ) -> SandysResult<Trajectory> {
        self.run(z0, sigma0, entropy_start, entropy_end, DEFAULT_STEPS, true)
    }

    pub fn run_params(&self, params: &RunParams) -> SandysResult<Trajectory> {
        params.validate()?;
        log::debug!(
            "run: z0={} sigma0={} ramp={}..{} steps={} soften_z={}",
            params.z0,
            params.sigma0,
            params.entropy_start,
            params.entropy_end,
            params.steps,
            params.soften_z
        );

        let times = Linspace::new(0.0, 1.0, params.steps);
        let ramp = Linspace::new(params.entropy_start, params.entropy_end, params.steps);
        let mut trajectory = Trajectory::with_capacity(params.steps);

        for (t, h) in times.zip(ramp) {
            let z = self.trap_strength(params.z0, t, params.soften_z);
            let sigma = self.export_rate(params.sigma0, h, params.entropy_end);

            let state = SystemState::new(z, sigma, h);
            let out = self.evaluator.evaluate(&state);
            let tau_gr = self.proper_time_proxy(z);

            trajectory.push(TrajectoryRecord::new(t, &state, &out, tau_gr));
        }

        if let Some(last) = trajectory.last() {
            log::debug!(
                "run complete: {} steps, final K={:.4} ({})",
                trajectory.len(),
                last.portal_score,
                last.regime
            );
        }
        Ok(trajectory)
    }
}
