//! Hinge ("broken-stick") basis for continuous piecewise-linear functions.
//!
//! A continuous piecewise-linear function with cutpoints `c_1..c_k` can be written
//! as one unclamped linear term plus one hinge per cutpoint:
//!
//! ```text
//! y(x) = a + d_0 x + Σ_i d_i · max(0, x - c_i)
//! ```
//!
//! where `d_0` is the slope of the first segment and `d_i` is the change in slope
//! at `c_i`. The function is continuous at every cutpoint for any choice of `d`.

/// `max(0, x - c)`.
pub fn hinge(x: f64, cutpoint: f64) -> f64 {
    (x - cutpoint).max(0.0)
}

/// Convert per-segment slopes into slope increments.
///
/// `deltas[0] = betas[0]`, `deltas[i] = betas[i] - betas[i-1]`.
pub fn slope_deltas(betas: &[f64]) -> Vec<f64> {
    let mut prev = 0.0;
    betas
        .iter()
        .map(|&b| {
            let d = b - prev;
            prev = b;
            d
        })
        .collect()
}

/// Evaluate the hinge representation at `x`.
///
/// `deltas` has one more entry than `cutpoints`; extra entries on either side are
/// ignored (the zip stops at the shorter sequence).
pub fn hinge_eval(x: f64, intercept: f64, deltas: &[f64], cutpoints: &[f64]) -> f64 {
    let Some((&d0, rest)) = deltas.split_first() else {
        return intercept;
    };

    let mut y = intercept + x * d0;
    for (&d, &c) in rest.iter().zip(cutpoints.iter()) {
        y += hinge(x, c) * d;
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hinge_is_zero_left_of_cutpoint() {
        assert_eq!(hinge(1.0, 2.0), 0.0);
        assert_eq!(hinge(2.0, 2.0), 0.0);
        assert_eq!(hinge(3.5, 2.0), 1.5);
    }

    #[test]
    fn deltas_are_first_differences() {
        assert_eq!(slope_deltas(&[1.0, -1.0, 0.5]), vec![1.0, -2.0, 1.5]);
        assert_eq!(slope_deltas(&[2.0]), vec![2.0]);
        assert!(slope_deltas(&[]).is_empty());
    }

    #[test]
    fn eval_tracks_each_segment_slope() {
        // Slope 1 up to x=5, then slope -1.
        let deltas = slope_deltas(&[1.0, -1.0]);
        let cuts = [5.0];
        assert!((hinge_eval(0.0, 0.0, &deltas, &cuts) - 0.0).abs() < 1e-12);
        assert!((hinge_eval(5.0, 0.0, &deltas, &cuts) - 5.0).abs() < 1e-12);
        assert!((hinge_eval(8.0, 0.0, &deltas, &cuts) - 2.0).abs() < 1e-12);
        // Linear extension outside the fitted range.
        assert!((hinge_eval(-2.0, 0.0, &deltas, &cuts) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn eval_is_continuous_at_cutpoints() {
        let deltas = slope_deltas(&[0.3, 2.0, -4.0]);
        let cuts = [1.0, 2.5];
        let eps = 1e-9;
        for &c in &cuts {
            let left = hinge_eval(c - eps, 1.0, &deltas, &cuts);
            let right = hinge_eval(c + eps, 1.0, &deltas, &cuts);
            assert!((left - right).abs() < 1e-6, "jump at {c}: {left} vs {right}");
        }
    }
}
