//! Suitability scoring model
//!
//! A fixed linear model: each input is min-max normalized against its
//! configured range, then combined with configured weights into a score
//! clamped to [0, 1].

use crate::config::ModelParams;
use serde::Serialize;
use std::fmt;

/// Normalize `x` into [0, 1] given a min/max range, with safe clamping.
///
/// Returns exactly 0.0 when the range is degenerate (`max == min`). The
/// clamp uses `min`/`max` rather than `f64::clamp`, which would propagate
/// NaN: a NaN input (e.g. an aggregate over an empty climate table) still
/// yields a value in [0, 1].
pub fn normalize(x: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    let val = (x - min) / (max - min);
    val.min(1.0).max(0.0)
}

/// Compute the suitability score in [0, 1].
///
/// Monotonic non-decreasing in each input over its configured range when
/// the corresponding weight is non-negative.
pub fn suitability_score(
    v_index: f64,
    mean_temp: f64,
    total_rain: f64,
    params: &ModelParams,
) -> f64 {
    let v_n = normalize(v_index, params.v_min, params.v_max);
    let t_n = normalize(mean_temp, params.t_min, params.t_max);
    let r_n = normalize(total_rain, params.r_min, params.r_max);

    let score = params.w_v * v_n + params.w_t * t_n + params.w_r * r_n;
    score.min(1.0).max(0.0)
}

/// Qualitative suitability bucket.
///
/// Boundary scores 0.33 and 0.66 belong to the upper bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuitabilityLabel {
    Low,
    Medium,
    High,
}

impl SuitabilityLabel {
    /// Bucket a score into a label.
    pub fn from_score(score: f64) -> Self {
        if score < 0.33 {
            SuitabilityLabel::Low
        } else if score < 0.66 {
            SuitabilityLabel::Medium
        } else {
            SuitabilityLabel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuitabilityLabel::Low => "low",
            SuitabilityLabel::Medium => "medium",
            SuitabilityLabel::High => "high",
        }
    }
}

impl fmt::Display for SuitabilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> ModelParams {
        ModelParams {
            v_min: 0.0,
            v_max: 1.0,
            t_min: 0.0,
            t_max: 40.0,
            r_min: 0.0,
            r_max: 300.0,
            w_v: 0.4,
            w_t: 0.3,
            w_r: 0.3,
        }
    }

    #[test]
    fn test_normalize_endpoints() {
        assert_relative_eq!(normalize(0.0, 0.0, 10.0), 0.0);
        assert_relative_eq!(normalize(10.0, 0.0, 10.0), 1.0);
        assert_relative_eq!(normalize(5.0, 0.0, 10.0), 0.5);
    }

    #[test]
    fn test_normalize_clamps() {
        assert_relative_eq!(normalize(-5.0, 0.0, 10.0), 0.0);
        assert_relative_eq!(normalize(15.0, 0.0, 10.0), 1.0);
    }

    #[test]
    fn test_normalize_nan_input_stays_bounded() {
        let n = normalize(f64::NAN, 0.0, 10.0);
        assert!((0.0..=1.0).contains(&n), "normalize(NaN) = {n}");
    }

    #[test]
    fn test_normalize_degenerate_range() {
        assert_relative_eq!(normalize(3.0, 7.0, 7.0), 0.0);
        assert_relative_eq!(normalize(7.0, 7.0, 7.0), 0.0);
    }

    #[test]
    fn test_score_in_unit_interval() {
        let p = params();
        for &(v, t, r) in &[
            (0.0, 0.0, 0.0),
            (1.0, 40.0, 300.0),
            (0.5, 20.0, 150.0),
            (-3.0, 100.0, 1e9),
        ] {
            let score = suitability_score(v, t, r, &p);
            assert!((0.0..=1.0).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn test_score_nan_climate_stays_bounded() {
        // Aggregates over an empty climate table are NaN; the score and
        // label must still be well defined.
        let p = params();
        let score = suitability_score(0.5, f64::NAN, f64::NAN, &p);
        assert!(
            (0.0..=1.0).contains(&score),
            "score {score} out of range for NaN climate"
        );
        let label = SuitabilityLabel::from_score(score);
        assert!(["low", "medium", "high"].contains(&label.as_str()));
    }

    #[test]
    fn test_score_monotonic_in_v_index() {
        let p = params();
        let mut prev = suitability_score(0.0, 20.0, 150.0, &p);
        for step in 1..=10 {
            let v = step as f64 / 10.0;
            let score = suitability_score(v, 20.0, 150.0, &p);
            assert!(score >= prev, "score decreased at v_index {v}");
            prev = score;
        }
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(SuitabilityLabel::from_score(0.329), SuitabilityLabel::Low);
        assert_eq!(SuitabilityLabel::from_score(0.33), SuitabilityLabel::Medium);
        assert_eq!(SuitabilityLabel::from_score(0.659), SuitabilityLabel::Medium);
        assert_eq!(SuitabilityLabel::from_score(0.66), SuitabilityLabel::High);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(SuitabilityLabel::Medium.to_string(), "medium");
    }
}
