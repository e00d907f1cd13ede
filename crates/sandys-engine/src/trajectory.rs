// ─────────────────────────────────────────────────────────────────────
// Sandy's Law Engine — Trajectory Log
// ─────────────────────────────────────────────────────────────────────
//! Append-only per-step log of a simulation run, plus the post-hoc
//! analysis a consumer runs over a finished trajectory (portal crossing,
//! summary metrics, columnar export).

use serde::{Deserialize, Serialize};

use sandys_types::{EngineConfig, EvaluationResult, Regime, RegimeFlags, SystemState};

use crate::evaluator::classify_regime;

/// One simulated step: inputs, evaluation, and the GR comparison proxy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    /// Normalised time t ∈ [0, 1].
    pub time: f64,
    pub z: f64,
    pub sigma: f64,
    pub entropy_grad: f64,
    pub portal_score: f64,
    pub regime: Regime,
    pub gamma_eff: f64,
    pub tau_rate: f64,
    pub flags: RegimeFlags,
    /// Weak-field proper-time rate, for comparison only.
    pub tau_gr: f64,
}

impl TrajectoryRecord {
    pub fn new(time: f64, state: &SystemState, out: &EvaluationResult, tau_gr: f64) -> Self {
        Self {
            time,
            z: state.z,
            sigma: state.sigma,
            entropy_grad: state.entropy_grad,
            portal_score: out.portal_score,
            regime: out.regime,
            gamma_eff: out.gamma_eff,
            tau_rate: out.tau_rate,
            flags: out.flags,
            tau_gr,
        }
    }
}

/// Ordered trajectory. Index position is simulated time order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    records: Vec<TrajectoryRecord>,
}

impl Trajectory {
    pub(crate) fn with_capacity(steps: usize) -> Self {
        Self {
            records: Vec::with_capacity(steps),
        }
    }

    pub(crate) fn push(&mut self, record: TrajectoryRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[TrajectoryRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&TrajectoryRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&TrajectoryRecord> {
        self.records.last()
    }

    pub fn get(&self, index: usize) -> Option<&TrajectoryRecord> {
        self.records.get(index)
    }

    /// Extract one scalar column in step order.
    pub fn column<F>(&self, field: F) -> Vec<f64>
    where
        F: Fn(&TrajectoryRecord) -> f64,
    {
        self.records.iter().map(field).collect()
    }

    /// First index whose portal score reaches `threshold`.
    pub fn portal_crossing(&self, threshold: f64) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.portal_score >= threshold)
    }

    /// Summary metrics over the finished run. `None` for an empty log.
    ///
    /// Every record is classified against `config`, so the final regime,
    /// `portal_open`, the crossing and the counts agree with each other.
    pub fn summary(&self, config: &EngineConfig) -> Option<TrajectorySummary> {
        let last = self.records.last()?;
        let regimes: Vec<Regime> = self
            .records
            .iter()
            .map(|r| classify_regime(config, r.portal_score))
            .collect();

        let crossing_index = regimes.iter().position(|&r| r == Regime::Open);
        let crossing_time = crossing_index.map(|i| self.records[i].time);
        if let (Some(i), Some(t)) = (crossing_index, crossing_time) {
            log::info!("portal crossing at step {i} (t = {t:.4})");
        }

        let peak_portal_score = self
            .records
            .iter()
            .map(|r| r.portal_score)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut regime_counts = RegimeCounts::default();
        for &regime in &regimes {
            regime_counts.add(regime);
        }

        let final_regime = regimes[regimes.len() - 1];
        Some(TrajectorySummary {
            steps: self.records.len(),
            final_regime,
            final_portal_score: last.portal_score,
            portal_open: final_regime == Regime::Open,
            crossing_index,
            crossing_time,
            peak_portal_score,
            regime_counts,
        })
    }

    /// Columnar table for downstream presentation layers.
    pub fn to_columns(&self) -> TrajectoryColumns {
        let n = self.records.len();
        let mut cols = TrajectoryColumns {
            time: Vec::with_capacity(n),
            z: Vec::with_capacity(n),
            sigma: Vec::with_capacity(n),
            entropy_grad: Vec::with_capacity(n),
            portal_score: Vec::with_capacity(n),
            tau_rate: Vec::with_capacity(n),
            gamma: Vec::with_capacity(n),
            tau_gr: Vec::with_capacity(n),
            regime: Vec::with_capacity(n),
            regime_code: Vec::with_capacity(n),
        };
        for r in &self.records {
            cols.time.push(r.time);
            cols.z.push(r.z);
            cols.sigma.push(r.sigma);
            cols.entropy_grad.push(r.entropy_grad);
            cols.portal_score.push(r.portal_score);
            cols.tau_rate.push(r.tau_rate);
            cols.gamma.push(r.gamma_eff);
            cols.tau_gr.push(r.tau_gr);
            cols.regime.push(r.regime.label().to_string());
            cols.regime_code.push(r.regime.code());
        }
        cols
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryRecord;
    type IntoIter = std::slice::Iter<'a, TrajectoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Trajectory log as aligned columns, keyed by the dashboard's names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryColumns {
    pub time: Vec<f64>,
    #[serde(rename = "Z")]
    pub z: Vec<f64>,
    #[serde(rename = "Sigma")]
    pub sigma: Vec<f64>,
    pub entropy_grad: Vec<f64>,
    pub portal_score: Vec<f64>,
    pub tau_rate: Vec<f64>,
    pub gamma: Vec<f64>,
    pub tau_gr: Vec<f64>,
    pub regime: Vec<String>,
    pub regime_code: Vec<u8>,
}

impl TrajectoryColumns {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Number of records spent in each regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeCounts {
    pub stable: usize,
    pub transitional: usize,
    pub open: usize,
}

impl RegimeCounts {
    fn add(&mut self, regime: Regime) {
        match regime {
            Regime::Stable => self.stable += 1,
            Regime::Transitional => self.transitional += 1,
            Regime::Open => self.open += 1,
        }
    }

    pub fn get(&self, regime: Regime) -> usize {
        match regime {
            Regime::Stable => self.stable,
            Regime::Transitional => self.transitional,
            Regime::Open => self.open,
        }
    }
}

/// Final-state metrics of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    pub steps: usize,
    pub final_regime: Regime,
    pub final_portal_score: f64,
    /// Final regime is `Open`.
    pub portal_open: bool,
    pub crossing_index: Option<usize>,
    pub crossing_time: Option<f64>,
    pub peak_portal_score: f64,
    pub regime_counts: RegimeCounts,
}
