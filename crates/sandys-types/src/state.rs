// ─────────────────────────────────────────────────────────────────────
// Sandy's Law Engine — State and Evaluation Types
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimal state vector for a trapped system.
///
/// A fresh value is built for every simulated step and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemState {
    /// Trap strength: 0 = open, 1 = fully trapped.
    pub z: f64,
    /// Entropy export rate Σ.
    pub sigma: f64,
    /// Entropy gradient dH/dt.
    pub entropy_grad: f64,
    /// Ricci scalar. Carried but not read by the current formulas.
    #[serde(default)]
    pub r: f64,
    /// Weyl². Reserved.
    #[serde(default)]
    pub w2: f64,
}

impl SystemState {
    pub fn new(z: f64, sigma: f64, entropy_grad: f64) -> Self {
        Self {
            z,
            sigma,
            entropy_grad,
            r: 0.0,
            w2: 0.0,
        }
    }

    /// Attach optional curvature terms.
    pub fn with_curvature(self, r: f64, w2: f64) -> Self {
        Self { r, w2, ..self }
    }
}

/// Discrete regime derived from the portal score.
///
/// The integer code and the label are both derived from the variant,
/// so they cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    Stable,
    Transitional,
    Open,
}

impl Regime {
    pub const ALL: [Regime; 3] = [Regime::Stable, Regime::Transitional, Regime::Open];

    pub fn code(self) -> u8 {
        match self {
            Regime::Stable => 0,
            Regime::Transitional => 1,
            Regime::Open => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Regime::Stable => "Newtonian / Stable",
            Regime::Transitional => "Transitional",
            Regime::Open => "Zeno / Modulated",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Regime::Stable),
            1 => Some(Regime::Transitional),
            2 => Some(Regime::Open),
            _ => None,
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Independent, non-exclusive condition flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeFlags {
    pub fully_trapped: bool,
    pub silent_system: bool,
    pub portal_open: bool,
}

/// Output of one constraint evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Composite portal score K.
    pub portal_score: f64,
    pub regime: Regime,
    /// Temporal modulation γ.
    pub gamma_eff: f64,
    /// Sandy's Law time rate dτ/dt, clamped at zero.
    pub tau_rate: f64,
    pub flags: RegimeFlags,
}
