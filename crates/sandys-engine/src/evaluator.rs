// ─────────────────────────────────────────────────────────────────────
// Sandy's Law Engine — Constraint Evaluator
// ─────────────────────────────────────────────────────────────────────
//! Closed-form constraint model for trapped systems:
//!
//!   K        = 1 + c_H·dH/dt + c_Σ·(1 - Z)·Σ
//!   γ_eff    = 1 + α_R·(dH/dt) / k_B
//!   dτ_SL/dt = max(0, (1 - Z)·Σ)
//!
//! K is classified into Stable / Transitional / Open against two
//! ordered thresholds with left-closed, right-open bands.

use sandys_types::{
    EngineConfig, EvaluationResult, OmniumParams, Regime, RegimeFlags, SandysResult, SystemState,
};

/// Map a portal score onto the regime bands of `config`.
///
/// NaN fails both comparisons and falls through to `Open`.
pub fn classify_regime(config: &EngineConfig, k: f64) -> Regime {
    if k < config.pre_transition {
        Regime::Stable
    } else if k < config.portal_threshold {
        Regime::Transitional
    } else {
        Regime::Open
    }
}

/// Stateless evaluator over one `SystemState`.
///
/// Holds only its configuration; `evaluate` is referentially transparent.
#[derive(Debug, Clone, Default)]
pub struct ConstraintEvaluator {
    config: EngineConfig,
}

impl ConstraintEvaluator {
    /// Build an evaluator from a validated configuration.
    pub fn new(config: EngineConfig) -> SandysResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn portal_threshold(&self) -> f64 {
        self.config.portal_threshold
    }

    /// Omnium potential: washboard on top of a double well.
    ///
    /// V(φ) = A·(φ² - 1)² - B·cos(k·φ)
    pub fn omnium_potential(&self, phi: f64, params: &OmniumParams) -> f64 {
        params.a * (phi * phi - 1.0).powi(2) - params.b * (params.k * phi).cos()
    }

    /// Γ_Q = 1 + α·(dH / k_B).
    pub fn temporal_modulation(&self, entropy_grad: f64) -> f64 {
        1.0 + self.config.alpha_r * (entropy_grad / self.config.kb_norm)
    }

    /// dτ_SL/dt = (1 - Z)·Σ, clamped at zero.
    pub fn effective_time_rate(&self, z: f64, sigma: f64) -> f64 {
        ((1.0 - z) * sigma).max(0.0)
    }

    pub fn portal_score(&self, z: f64, sigma: f64, entropy_grad: f64) -> f64 {
        1.0 + self.config.score_entropy_coeff * entropy_grad
            + self.config.score_export_coeff * (1.0 - z) * sigma
    }

    /// Map a portal score onto this evaluator's regime bands.
    pub fn classify_regime(&self, k: f64) -> Regime {
        classify_regime(&self.config, k)
    }

    /// Evaluate every derived quantity for one state.
    pub fn evaluate(&self, state: &SystemState) -> EvaluationResult {
        let k = self.portal_score(state.z, state.sigma, state.entropy_grad);
        if !k.is_finite() {
            log::warn!("evaluate: non-finite portal score {k} for {state:?}");
        }

        let regime = self.classify_regime(k);
        let gamma_eff = self.temporal_modulation(state.entropy_grad);
        // f64::max drops NaN, so a NaN product reads as zero here.
        let tau_rate = self.effective_time_rate(state.z, state.sigma);

        let flags = RegimeFlags {
            fully_trapped: state.z > self.config.fully_trapped_z,
            silent_system: tau_rate < self.config.silent_tau_rate,
            portal_open: regime == Regime::Open,
        };

        EvaluationResult {
            portal_score: k,
            regime,
            gamma_eff,
            tau_rate,
            flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ConstraintEvaluator {
        ConstraintEvaluator::default()
    }

    #[test]
    fn test_portal_score_formula() {
        let e = engine();
        let k = e.portal_score(0.98, 0.05, 1.0);
        let expected = 1.0 + 0.15 + 0.5 * 0.02 * 0.05;
        assert!((k - expected).abs() < 1e-12, "K={k}, expected {expected}");
    }

    #[test]
    fn test_gamma_formula() {
        let e = engine();
        assert!((e.temporal_modulation(2.0) - 1.3).abs() < 1e-12);
        assert_eq!(e.temporal_modulation(0.0), 1.0);
    }

    #[test]
    fn test_gamma_respects_kb_norm() {
        let e = ConstraintEvaluator::new(EngineConfig {
            kb_norm: 2.0,
            ..Default::default()
        })
        .unwrap();
        assert!((e.temporal_modulation(2.0) - 1.15).abs() < 1e-12);
    }

    #[test]
    fn test_tau_rate_non_negative() {
        let e = engine();
        for &z in &[0.0, 0.25, 0.5, 0.75, 1.0] {
            for &sigma in &[0.0, 0.01, 1.0, 5.0] {
                let tau = e.effective_time_rate(z, sigma);
                assert!(tau >= 0.0, "tau({z}, {sigma}) = {tau}");
                assert!((tau - (1.0 - z) * sigma).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_tau_rate_zero_when_trapped_or_idle() {
        let e = engine();
        assert_eq!(e.effective_time_rate(1.0, 3.0), 0.0);
        assert_eq!(e.effective_time_rate(0.3, 0.0), 0.0);
    }

    #[test]
    fn test_tau_rate_clamped_for_overtrapped() {
        // Z > 1 would give a negative rate without the clamp.
        assert_eq!(engine().effective_time_rate(1.2, 1.0), 0.0);
    }

    #[test]
    fn test_regime_boundaries() {
        let e = engine();
        assert_eq!(e.classify_regime(1.0), Regime::Stable);
        assert_eq!(e.classify_regime(1.449_999), Regime::Stable);
        assert_eq!(e.classify_regime(1.45), Regime::Transitional);
        assert_eq!(e.classify_regime(1.509_999), Regime::Transitional);
        assert_eq!(e.classify_regime(1.51), Regime::Open);
        assert_eq!(e.classify_regime(100.0), Regime::Open);
        assert_eq!(e.classify_regime(f64::NEG_INFINITY), Regime::Stable);
        assert_eq!(e.classify_regime(f64::INFINITY), Regime::Open);
    }

    #[test]
    fn test_regime_partition_sweep() {
        let e = engine();
        let mut k = -5.0;
        while k < 5.0 {
            let regime = e.classify_regime(k);
            let in_stable = k < 1.45;
            let in_transitional = (1.45..1.51).contains(&k);
            let in_open = k >= 1.51;
            assert_eq!(
                [in_stable, in_transitional, in_open]
                    .iter()
                    .filter(|&&b| b)
                    .count(),
                1
            );
            match regime {
                Regime::Stable => assert!(in_stable, "k={k}"),
                Regime::Transitional => assert!(in_transitional, "k={k}"),
                Regime::Open => assert!(in_open, "k={k}"),
            }
            k += 0.001;
        }
    }

    #[test]
    fn test_portal_flag_matches_open_regime() {
        let e = engine();
        for i in 0..=100 {
            let h = i as f64 * 0.05;
            for &z in &[0.0, 0.5, 0.98] {
                let out = e.evaluate(&SystemState::new(z, 0.5, h));
                assert_eq!(out.flags.portal_open, out.regime == Regime::Open);
                assert_eq!(
                    out.flags.portal_open,
                    out.portal_score >= e.portal_threshold()
                );
            }
        }
    }

    #[test]
    fn test_flags_independent() {
        let e = engine();
        let out = e.evaluate(&SystemState::new(1.0, 0.0, 10.0));
        assert!(out.flags.fully_trapped);
        assert!(out.flags.silent_system);
        assert!(out.flags.portal_open);

        let out = e.evaluate(&SystemState::new(0.2, 1.0, 0.0));
        assert!(!out.flags.fully_trapped);
        assert!(!out.flags.silent_system);
        assert!(!out.flags.portal_open);
    }

    #[test]
    fn test_fully_trapped_is_strict() {
        let e = engine();
        assert!(!e.evaluate(&SystemState::new(0.95, 0.1, 0.0)).flags.fully_trapped);
        assert!(e.evaluate(&SystemState::new(0.951, 0.1, 0.0)).flags.fully_trapped);
    }

    #[test]
    fn test_evaluate_deterministic() {
        let e = engine();
        let state = SystemState::new(0.42, 1.7, 3.3);
        let a = e.evaluate(&state);
        let b = e.evaluate(&state);
        assert_eq!(a, b);
        assert_eq!(a.portal_score.to_bits(), b.portal_score.to_bits());
    }

    #[test]
    fn test_curvature_does_not_affect_result() {
        let e = engine();
        let flat = SystemState::new(0.6, 0.4, 2.0);
        let curved = flat.with_curvature(3.0, 7.0);
        assert_eq!(e.evaluate(&flat), e.evaluate(&curved));
    }

    #[test]
    fn test_custom_thresholds_coexist() {
        let strict = ConstraintEvaluator::new(EngineConfig {
            pre_transition: 2.0,
            portal_threshold: 3.0,
            ..Default::default()
        })
        .unwrap();
        let default = engine();
        let state = SystemState::new(0.5, 0.5, 4.0);
        assert_eq!(default.evaluate(&state).regime, Regime::Open);
        assert_eq!(strict.evaluate(&state).regime, Regime::Stable);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = ConstraintEvaluator::new(EngineConfig {
            pre_transition: 2.0,
            portal_threshold: 1.0,
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_score_propagates() {
        let out = engine().evaluate(&SystemState::new(0.5, 1.0, f64::INFINITY));
        assert!(out.portal_score.is_infinite());
        assert_eq!(out.regime, Regime::Open);
        assert!(out.flags.portal_open);
    }

    #[test]
    fn test_nan_score_classified_open() {
        assert_eq!(engine().classify_regime(f64::NAN), Regime::Open);
        assert_eq!(classify_regime(&EngineConfig::default(), f64::NAN), Regime::Open);
    }

    #[test]
    fn test_omnium_double_well_minima() {
        let e = engine();
        let flat = OmniumParams {
            b: 0.0,
            ..Default::default()
        };
        assert!(e.omnium_potential(1.0, &flat).abs() < 1e-12);
        assert!(e.omnium_potential(-1.0, &flat).abs() < 1e-12);
        assert!((e.omnium_potential(0.0, &flat) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_omnium_washboard_term() {
        let e = engine();
        let v = e.omnium_potential(0.0, &OmniumParams::default());
        // A·1 - B·cos(0)
        assert!((v - 0.8).abs() < 1e-12, "V(0)={v}");
    }
}
