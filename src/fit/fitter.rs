//! Per-zone fitting.
//!
//! Given:
//! - observations `(x_i, y_i)`
//! - cutpoints `c_1..c_k`
//!
//! we validate the inputs, partition the observations into `k + 1` closed zones
//! and solve an independent least squares line for each zone.

use crate::error::SplineError;
use crate::fit::zones::{Zone, select_zone, zone_boundaries, zones_from_boundaries};
use crate::math::{LineFit, LineSolver};

/// Fitted line for a single zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneFit {
    pub zone: Zone,
    pub line: LineFit,
    /// Observations used for this zone (boundary points count in both neighbours).
    pub n_points: usize,
}

/// Check that `xs`/`ys` pair up and contain only finite values.
pub fn validate_observations(xs: &[f64], ys: &[f64]) -> Result<(), SplineError> {
    if xs.len() != ys.len() {
        return Err(SplineError::ShapeMismatch {
            x_len: xs.len(),
            y_len: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(SplineError::EmptyInput);
    }
    if let Some(i) = xs.iter().position(|x| !x.is_finite()) {
        return Err(SplineError::InvalidInput(format!("xs[{i}] = {} is not finite", xs[i])));
    }
    if let Some(i) = ys.iter().position(|y| !y.is_finite()) {
        return Err(SplineError::InvalidInput(format!("ys[{i}] = {} is not finite", ys[i])));
    }
    Ok(())
}

/// Check that every cutpoint is a finite number.
pub fn validate_cutpoints(cutpoints: &[f64]) -> Result<(), SplineError> {
    match cutpoints.iter().find(|c| !c.is_finite()) {
        Some(c) => Err(SplineError::InvalidCutpoint(c.to_string())),
        None => Ok(()),
    }
}

/// Parse a comma/whitespace separated list of cutpoints (e.g. `"2.5, 5,10"`).
///
/// An empty string yields no cutpoints. Any token that is not a finite number
/// fails with `InvalidCutpoint`.
pub fn parse_cutpoints(text: &str) -> Result<Vec<f64>, SplineError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| match tok.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(SplineError::InvalidCutpoint(tok.to_string())),
        })
        .collect()
}

/// Validate inputs and fit one line per zone.
///
/// Zones are returned in order. Any zone without observations fails the whole
/// fit with `EmptyZone`; nothing partial is returned.
pub fn fit_zones<S: LineSolver + ?Sized>(
    solver: &S,
    xs: &[f64],
    ys: &[f64],
    cutpoints: &[f64],
) -> Result<Vec<ZoneFit>, SplineError> {
    validate_observations(xs, ys)?;
    validate_cutpoints(cutpoints)?;

    let boundaries = zone_boundaries(xs, cutpoints).ok_or(SplineError::EmptyInput)?;
    let zones = zones_from_boundaries(&boundaries);

    let mut fits = Vec::with_capacity(zones.len());
    for zone in zones {
        let (zx, zy) = select_zone(&zone, xs, ys);
        if zx.is_empty() {
            return Err(SplineError::EmptyZone {
                zone: zone.index,
                lower: zone.lower,
                upper: zone.upper,
            });
        }

        let line = solver.fit_line(&zx, &zy)?;
        log::debug!(
            "zone {} [{}, {}]: n={} slope={} intercept={}",
            zone.index,
            zone.lower,
            zone.upper,
            zx.len(),
            line.slope,
            line.intercept
        );
        fits.push(ZoneFit {
            zone,
            line,
            n_points: zx.len(),
        });
    }

    Ok(fits)
}
