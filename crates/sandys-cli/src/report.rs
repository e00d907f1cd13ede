// ─────────────────────────────────────────────────────────────────────
// Sandy's Law Engine — Text Reports
// ─────────────────────────────────────────────────────────────────────

use sandys_engine::{Trajectory, TrajectorySummary};
use sandys_types::Regime;

/// Final-regime summary block.
pub fn render_summary(summary: &TrajectorySummary) -> String {
    let crossing = match (summary.crossing_index, summary.crossing_time) {
        (Some(i), Some(t)) => format!("step {i} (t = {t:.3})"),
        _ => "none".to_string(),
    };

    let mut out = format!(
        "Steps:        {}\n\
         Final regime: {}\n\
         Portal score: {:.3}\n\
         Peak score:   {:.3}\n\
         Crossing:     {crossing}\n",
        summary.steps,
        summary.final_regime,
        summary.final_portal_score,
        summary.peak_portal_score,
    );
    for regime in Regime::ALL {
        out.push_str(&format!(
            "  {:<20} {}\n",
            regime.label(),
            summary.regime_counts.get(regime)
        ));
    }
    out.push_str(if summary.portal_open {
        "Portal OPEN — system transitions\n"
    } else {
        "System remains trapped\n"
    });
    out
}

/// Fixed-width table of every record, one row per step.
pub fn render_table(trajectory: &Trajectory) -> String {
    let mut out = format!(
        "{:>8} {:>8} {:>10} {:>12} {:>12} {:>10} {:>8} {:>8}  regime\n",
        "time", "Z", "Sigma", "entropy_grad", "portal_score", "tau_rate", "gamma", "tau_gr"
    );
    for r in trajectory {
        out.push_str(&format!(
            "{:>8.4} {:>8.4} {:>10.5} {:>12.4} {:>12.5} {:>10.6} {:>8.4} {:>8.5}  {} ({})\n",
            r.time,
            r.z,
            r.sigma,
            r.entropy_grad,
            r.portal_score,
            r.tau_rate,
            r.gamma_eff,
            r.tau_gr,
            r.regime.label(),
            r.regime.code()
        ));
    }
    out
}
