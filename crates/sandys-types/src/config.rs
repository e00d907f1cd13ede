// ─────────────────────────────────────────────────────────────────────
// Sandy's Law Engine — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{SandysError, SandysResult};

/// Coefficients and thresholds for the constraint evaluator.
///
/// Every evaluator owns its own copy, so evaluators with different
/// thresholds can coexist in one process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ricci / entropy coupling in the temporal modulation γ.
    /// Default: 0.15.
    pub alpha_r: f64,

    /// Normalised Boltzmann constant dividing the entropy gradient in γ.
    /// Default: 1.0.
    pub kb_norm: f64,

    /// Weyl stiffness. Reserved, not read by any formula.
    /// Default: 0.05.
    pub beta_w: f64,

    /// Weight of the entropy gradient in the portal score.
    /// Default: 0.15.
    pub score_entropy_coeff: f64,

    /// Weight of the untrapped export term (1 - Z)·Σ in the portal score.
    /// Default: 0.5.
    pub score_export_coeff: f64,

    /// Lower edge of the transitional band.
    /// Default: 1.45.
    pub pre_transition: f64,

    /// Portal score at or above which the system is open.
    /// Default: 1.51.
    pub portal_threshold: f64,

    /// Trap strength above which the system counts as fully trapped.
    /// Default: 0.95.
    pub fully_trapped_z: f64,

    /// Time rate below which the system counts as silent.
    /// Default: 1e-6.
    pub silent_tau_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alpha_r: 0.15,
            kb_norm: 1.0,
            beta_w: 0.05,
            score_entropy_coeff: 0.15,
            score_export_coeff: 0.5,
            pre_transition: 1.45,
            portal_threshold: 1.51,
            fully_trapped_z: 0.95,
            silent_tau_rate: 1e-6,
        }
    }
}

impl EngineConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> SandysResult<()> {
        let fields = [
            ("alpha_r", self.alpha_r),
            ("kb_norm", self.kb_norm),
            ("beta_w", self.beta_w),
            ("score_entropy_coeff", self.score_entropy_coeff),
            ("score_export_coeff", self.score_export_coeff),
            ("pre_transition", self.pre_transition),
            ("portal_threshold", self.portal_threshold),
            ("fully_trapped_z", self.fully_trapped_z),
            ("silent_tau_rate", self.silent_tau_rate),
        ];
        ensure_finite(&fields)?;

        if self.kb_norm <= 0.0 {
            return Err(SandysError::Config(format!(
                "kb_norm must be > 0, got {}",
                self.kb_norm
            )));
        }
        if self.pre_transition > self.portal_threshold {
            return Err(SandysError::Config(format!(
                "pre_transition must be <= portal_threshold, got {} > {}",
                self.pre_transition, self.portal_threshold
            )));
        }
        if self.silent_tau_rate < 0.0 {
            return Err(SandysError::Config(format!(
                "silent_tau_rate must be >= 0, got {}",
                self.silent_tau_rate
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SandysResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SandysError::Config(format!("JSON parse error: {e}")))
    }
}

/// Step policy for the trajectory simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fraction of Z0 removed by the end of a softened run.
    /// Default: 0.7 (Z decays to 0.3·Z0).
    pub softening_rate: f64,

    /// Gain of the nonlinear release term.
    /// Default: 4.0.
    pub release_gain: f64,

    /// Exponent of the nonlinear release term.
    /// Default: 3 (cubic activation).
    pub release_exponent: i32,

    /// Floor on the ramp target in the release denominator.
    /// Default: 1e-6.
    pub release_floor: f64,

    /// Weak-field potential per unit trap strength, φ = coeff·Z.
    /// Default: -0.1.
    pub gr_potential_coeff: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            softening_rate: 0.7,
            release_gain: 4.0,
            release_exponent: 3,
            release_floor: 1e-6,
            gr_potential_coeff: -0.1,
        }
    }
}

impl SimulationConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> SandysResult<()> {
        let fields = [
            ("softening_rate", self.softening_rate),
            ("release_gain", self.release_gain),
            ("release_floor", self.release_floor),
            ("gr_potential_coeff", self.gr_potential_coeff),
        ];
        ensure_finite(&fields)?;

        if !(0.0..=1.0).contains(&self.softening_rate) {
            return Err(SandysError::Config(format!(
                "softening_rate must be in [0, 1], got {}",
                self.softening_rate
            )));
        }
        if self.release_gain < 0.0 {
            return Err(SandysError::Config(format!(
                "release_gain must be >= 0, got {}",
                self.release_gain
            )));
        }
        if self.release_exponent < 1 {
            return Err(SandysError::Config(format!(
                "release_exponent must be >= 1, got {}",
                self.release_exponent
            )));
        }
        if self.release_floor <= 0.0 {
            return Err(SandysError::Config(format!(
                "release_floor must be > 0, got {}",
                self.release_floor
            )));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> SandysResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SandysError::Config(format!("JSON parse error: {e}")))
    }
}

/// Shape of the Omnium washboard + double-well potential.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OmniumParams {
    /// Double-well depth. Default: 1.0.
    pub a: f64,
    /// Washboard amplitude. Default: 0.2.
    pub b: f64,
    /// Washboard wavenumber. Default: 10.0.
    pub k: f64,
}

impl Default for OmniumParams {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.2,
            k: 10.0,
        }
    }
}

/// Inputs of a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    /// Initial trap strength Z0, nominally in [0, 1]. Default: 0.98.
    pub z0: f64,
    /// Initial entropy export rate Σ0 ≥ 0. Default: 0.05.
    pub sigma0: f64,
    /// Entropy gradient at t = 0. Default: 0.0.
    pub entropy_start: f64,
    /// Entropy gradient at t = 1. Default: 5.0.
    pub entropy_end: f64,
    /// Number of samples, endpoints included. Default: 200.
    pub steps: usize,
    /// Linearly soften Z over the run. Default: true.
    pub soften_z: bool,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            z0: 0.98,
            sigma0: 0.05,
            entropy_start: 0.0,
            entropy_end: 5.0,
            steps: 200,
            soften_z: true,
        }
    }
}

impl RunParams {
    /// Check run inputs before any step executes.
    pub fn validate(&self) -> SandysResult<()> {
        if self.steps < 1 {
            return Err(SandysError::InvalidParameter(format!(
                "steps must be >= 1, got {}",
                self.steps
            )));
        }
        let fields = [
            ("z0", self.z0),
            ("sigma0", self.sigma0),
            ("entropy_start", self.entropy_start),
            ("entropy_end", self.entropy_end),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(SandysError::InvalidParameter(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.sigma0 < 0.0 {
            return Err(SandysError::InvalidParameter(format!(
                "sigma0 must be >= 0, got {}",
                self.sigma0
            )));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> SandysResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SandysError::Config(format!("JSON parse error: {e}")))
    }
}

fn ensure_finite(fields: &[(&str, f64)]) -> SandysResult<()> {
    for &(name, value) in fields {
        if !value.is_finite() {
            return Err(SandysError::Config(format!(
                "{name} must be finite, got {value}"
            )));
        }
    }
    Ok(())
}
