//! Formatted terminal output.
//!
//! Formatting lives in one place so the fitting code stays clean and output
//! changes stay localized.

use crate::domain::{FitQuality, Residual, ZoneSummary};
use crate::io::ingest::IngestedData;
use crate::models::FittedSpline;

/// Format the full run summary (dataset stats + zones + parameters + diagnostics).
pub fn format_run_summary(
    ingest: &IngestedData,
    spline: &FittedSpline,
    zones: &[ZoneSummary],
    quality: &FitQuality,
) -> String {
    let mut out = String::new();

    out.push_str("=== pwl - Piecewise Linear Fit ===\n");
    out.push_str(&format!("Columns: x=`{}` y=`{}`\n", ingest.x_column, ingest.y_column));
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));
    out.push_str(&format!(
        "Points: n={} | x=[{:.4}, {:.4}] | y=[{:.4}, {:.4}]\n",
        ingest.stats.n_points, ingest.stats.x_min, ingest.stats.x_max, ingest.stats.y_min, ingest.stats.y_max
    ));
    out.push_str(&format!("Cutpoints: {}\n", fmt_vec(&spline.cutpoints)));

    out.push_str("\nZones:\n");
    out.push_str(&format_zone_table(zones));

    out.push_str("\nHinge form:\n");
    out.push_str(&format!("- intercept: {:.6}\n", spline.intercepts.first().copied().unwrap_or(0.0)));
    out.push_str(&format!("- betas : {}\n", fmt_vec(&spline.betas)));
    out.push_str(&format!("- deltas: {}\n", fmt_vec(&spline.deltas)));

    out.push_str("\nDiagnostics:\n");
    out.push_str(&format!(
        "SSE={:.6} RMSE={:.6} R2={}\n",
        quality.sse,
        quality.rmse,
        if quality.r_squared.is_finite() {
            format!("{:.6}", quality.r_squared)
        } else {
            "n/a".to_string()
        }
    ));

    out
}

fn format_zone_table(zones: &[ZoneSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:>12} {:>12} {:>6} {:>12} {:>12}\n",
        "zone", "lower", "upper", "n", "slope", "intercept"
    ));
    out.push_str(&format!(
        "{:->4} {:->12} {:->12} {:->6} {:->12} {:->12}\n",
        "", "", "", "", "", ""
    ));
    for z in zones {
        out.push_str(&format!(
            "{:>4} {:>12.4} {:>12.4} {:>6} {:>12.6} {:>12.6}\n",
            z.index, z.lower, z.upper, z.n_points, z.slope, z.intercept
        ));
    }
    out
}

/// Format the largest-residual table.
pub fn format_residuals(rows: &[Residual]) -> String {
    let mut out = String::new();
    out.push_str("Largest residuals:\n");
    out.push_str(&format!(
        "{:>12} {:>12} {:>12} {:>12} {:>4}\n",
        "x", "y_obs", "y_fit", "residual", "zone"
    ));
    out.push_str(&format!(
        "{:->12} {:->12} {:->12} {:->12} {:->4}\n",
        "", "", "", "", ""
    ));
    for r in rows {
        out.push_str(&format!(
            "{:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>4}\n",
            r.x, r.y_obs, r.y_fit, r.residual, r.zone
        ));
    }
    out
}

/// Format predictions as a two-column table.
pub fn format_predictions(xs: &[f64], preds: &[f64]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>14} {:>14}\n", "x", "y_pred"));
    for (x, y) in xs.iter().zip(preds.iter()) {
        out.push_str(&format!("{x:>14.6} {y:>14.6}\n"));
    }
    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_vec_uses_fixed_precision() {
        assert_eq!(fmt_vec(&[1.0, -0.5]), "[1.000000, -0.500000]");
        assert_eq!(fmt_vec(&[]), "[]");
    }

    #[test]
    fn predictions_table_keeps_input_order() {
        let txt = format_predictions(&[3.0, 1.0], &[30.0, 10.0]);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].trim_start().starts_with("3.000000"));
        assert!(lines[2].trim_start().starts_with("1.000000"));
    }

    #[test]
    fn zone_table_has_one_row_per_zone() {
        let zones = [
            ZoneSummary {
                index: 0,
                lower: 0.0,
                upper: 5.0,
                n_points: 6,
                slope: 1.0,
                intercept: 0.0,
            },
            ZoneSummary {
                index: 1,
                lower: 5.0,
                upper: 10.0,
                n_points: 6,
                slope: -1.0,
                intercept: 10.0,
            },
        ];
        let txt = format_zone_table(&zones);
        assert_eq!(txt.lines().count(), 4);
        assert!(txt.contains("-1.000000"));
    }
}
