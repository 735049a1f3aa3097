//! The composite fitness score.
//!
//! Folds the slack sub-scores, regression metrics, and outlier MAE into one
//! scalar framed as a dissimilarity: lower is better. Slack sub-scores are
//! normalized so that a perfect 100 contributes nothing, then every bounded
//! term is squashed through tanh to cap its influence; the MAE enters raw.
//! Correlation quality is subtracted — better agreement lowers the score.
//!
//! The weight set is a calibrated constant set. Retuning any weight (or
//! "simplifying" the formula) invalidates every historical score produced
//! with it.

use crate::regression::RegressionFit;
use crate::slack::SlackScores;

/// Weight of the WNS sub-score.
const W_WNS: f64 = 0.15;
/// Weight of the 100th-worst-path sub-score.
const W_WNS100: f64 = 0.35;
/// Weight of the TNS sub-score.
const W_TNS: f64 = 0.5;
/// Weight of the reg2reg TNS sub-score.
const W_R2R_TNS: f64 = 0.5;
/// Weight of the reg2reg WNS sub-score.
const W_R2R_WNS: f64 = 0.5;
/// Arc-level correlation blend: R² dominant.
const W_ARC_R2: f64 = 0.7;
const W_ARC_PEARSON: f64 = 0.3;
/// Endpoint-level correlation blend: Pearson dominant.
const W_END_R2: f64 = 0.3;
const W_END_PEARSON: f64 = 0.7;

/// Everything the composite score is derived from.
///
/// The grouped fits are part of the contract and of the reported metrics
/// row; they carry zero weight in the calibrated formula, which reads only
/// the raw fits.
#[derive(Clone, Copy, Debug)]
pub struct CompositeInputs<'a> {
    /// The five slack sub-scores.
    pub slack: &'a SlackScores,
    /// Raw per-arc regression fit.
    pub arc: &'a RegressionFit,
    /// Group-averaged per-arc regression fit.
    pub arc_grouped: &'a RegressionFit,
    /// Raw per-endpoint regression fit.
    pub endpoint: &'a RegressionFit,
    /// Group-averaged per-endpoint regression fit.
    pub endpoint_grouped: &'a RegressionFit,
    /// Mean absolute error over the kept worst-N outliers.
    pub mean_abs_error: f64,
}

/// Computes the composite fitness score. Lower is better.
pub fn compose(inputs: &CompositeInputs<'_>) -> f64 {
    let slack = inputs.slack;

    let slack_term = W_WNS * normalized(slack.wns.score).tanh()
        + W_WNS100 * normalized(slack.wns100.score).tanh()
        + W_TNS * normalized(slack.tns.score).tanh()
        + W_R2R_TNS * normalized(slack.r2r_tns.score).tanh()
        + W_R2R_WNS * normalized(slack.r2r_wns.score).tanh();

    let arc_term =
        W_ARC_R2 * inputs.arc.r_squared.tanh() + W_ARC_PEARSON * inputs.arc.pearson_r.tanh();
    let endpoint_term = W_END_R2 * inputs.endpoint.r_squared.tanh()
        + W_END_PEARSON * inputs.endpoint.pearson_r.tanh();

    slack_term + inputs.mean_abs_error - arc_term - endpoint_term
}

/// Maps a 0–100 accuracy score onto 0 (perfect) to 1 (fully mismatched).
fn normalized(score: f64) -> f64 {
    (100.0 - score) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::MetricScore;

    fn fit(r_squared: f64, pearson_r: f64) -> RegressionFit {
        RegressionFit {
            slope: 1.0,
            intercept: 0.0,
            r_squared,
            pearson_r,
            points: 10,
        }
    }

    fn perfect_slack() -> SlackScores {
        let metric = MetricScore {
            test: -0.1,
            target: -0.1,
            score: 100.0,
        };
        SlackScores {
            wns: metric,
            wns100: metric,
            tns: metric,
            r2r_wns: metric,
            r2r_tns: metric,
        }
    }

    #[test]
    fn perfect_agreement_minimizes_the_score() {
        let ideal = fit(1.0, 1.0);
        let inputs = CompositeInputs {
            slack: &perfect_slack(),
            arc: &ideal,
            arc_grouped: &ideal,
            endpoint: &ideal,
            endpoint_grouped: &ideal,
            mean_abs_error: 0.0,
        };
        // All slack terms vanish; both correlation blends subtract tanh(1).
        let expected = -2.0 * 1.0f64.tanh();
        assert!((compose(&inputs) - expected).abs() < 1e-12);
    }

    #[test]
    fn weighted_sum_matches_hand_computation() {
        let mut slack = perfect_slack();
        slack.wns.score = 80.0;
        slack.wns100.score = 90.0;
        slack.tns.score = 60.0;
        slack.r2r_wns.score = 100.0;
        slack.r2r_tns.score = 40.0;

        let arc = fit(0.9, 0.95);
        let arc_grouped = fit(0.8, 0.85);
        let endpoint = fit(0.7, 0.75);
        let endpoint_grouped = fit(0.6, 0.65);
        let inputs = CompositeInputs {
            slack: &slack,
            arc: &arc,
            arc_grouped: &arc_grouped,
            endpoint: &endpoint,
            endpoint_grouped: &endpoint_grouped,
            mean_abs_error: 0.25,
        };

        let expected = 0.15 * 0.2f64.tanh()
            + 0.35 * 0.1f64.tanh()
            + 0.5 * 0.4f64.tanh()
            + 0.5 * 0.6f64.tanh()
            + 0.5 * 0.0f64.tanh()
            + 0.25
            - (0.7 * 0.9f64.tanh() + 0.3 * 0.95f64.tanh())
            - (0.3 * 0.7f64.tanh() + 0.7 * 0.75f64.tanh());
        assert!((compose(&inputs) - expected).abs() < 1e-12);
    }

    #[test]
    fn worse_correlation_raises_the_score() {
        let good = fit(0.99, 0.99);
        let bad = fit(0.2, 0.5);
        let slack = perfect_slack();
        let base = CompositeInputs {
            slack: &slack,
            arc: &good,
            arc_grouped: &good,
            endpoint: &good,
            endpoint_grouped: &good,
            mean_abs_error: 0.1,
        };
        let degraded = CompositeInputs {
            arc: &bad,
            ..base
        };
        assert!(compose(&degraded) > compose(&base));
    }

    #[test]
    fn mae_enters_unsquashed() {
        let ideal = fit(1.0, 1.0);
        let slack = perfect_slack();
        let base = CompositeInputs {
            slack: &slack,
            arc: &ideal,
            arc_grouped: &ideal,
            endpoint: &ideal,
            endpoint_grouped: &ideal,
            mean_abs_error: 0.0,
        };
        let shifted = CompositeInputs {
            mean_abs_error: 5.0,
            ..base
        };
        // tanh would cap the 5.0; the raw term must shift the score by
        // exactly that much.
        assert!((compose(&shifted) - compose(&base) - 5.0).abs() < 1e-12);
    }
}
