//! Zone partitioning.
//!
//! Cutpoints are wrapped with the data range to form the boundary sequence
//! `[min(xs), c_1, ..., c_k, max(xs)]`. Zone `i` is the closed interval between
//! boundaries `i` and `i + 1`, so an observation sitting exactly on a cutpoint
//! takes part in the fits of both neighbouring zones.

/// One closed x-interval of the piecewise model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
}

impl Zone {
    /// Closed-interval membership: `lower <= x <= upper`.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }
}

/// Build `[min(xs)] ++ cutpoints ++ [max(xs)]`.
///
/// Returns `None` for empty `xs`. Cutpoints keep the caller's order.
pub fn zone_boundaries(xs: &[f64], cutpoints: &[f64]) -> Option<Vec<f64>> {
    let min = xs.iter().copied().reduce(f64::min)?;
    let max = xs.iter().copied().reduce(f64::max)?;

    let mut out = Vec::with_capacity(cutpoints.len() + 2);
    out.push(min);
    out.extend_from_slice(cutpoints);
    out.push(max);
    Some(out)
}

/// Turn a boundary sequence into consecutive zones.
pub fn zones_from_boundaries(boundaries: &[f64]) -> Vec<Zone> {
    boundaries
        .windows(2)
        .enumerate()
        .map(|(index, w)| Zone {
            index,
            lower: w[0],
            upper: w[1],
        })
        .collect()
}

/// Collect the `(x, y)` pairs inside `zone`, preserving input order.
pub fn select_zone(zone: &Zone, xs: &[f64], ys: &[f64]) -> (Vec<f64>, Vec<f64>) {
    xs.iter()
        .zip(ys.iter())
        .filter(|(x, _)| zone.contains(**x))
        .map(|(&x, &y)| (x, y))
        .unzip()
}

/// Index of the zone whose fitted line governs `x` (ascending cutpoints).
///
/// A point on a cutpoint is reported in the lower zone. The hinge function is
/// continuous there, so the label does not affect the fitted value.
pub fn zone_index(x: f64, cutpoints: &[f64]) -> usize {
    cutpoints.iter().filter(|&&c| c < x).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_wrap_cutpoints_with_data_range() {
        let xs = [4.0, -1.0, 9.0, 2.0];
        let b = zone_boundaries(&xs, &[0.0, 5.0]).unwrap();
        assert_eq!(b, vec![-1.0, 0.0, 5.0, 9.0]);
        assert!(zone_boundaries(&[], &[1.0]).is_none());
    }

    #[test]
    fn boundary_points_belong_to_both_zones() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [10.0, 11.0, 12.0, 13.0, 14.0];
        let b = zone_boundaries(&xs, &[2.0]).unwrap();
        let zones = zones_from_boundaries(&b);
        assert_eq!(zones.len(), 2);

        let (lx, ly) = select_zone(&zones[0], &xs, &ys);
        let (rx, ry) = select_zone(&zones[1], &xs, &ys);
        assert_eq!(lx, vec![0.0, 1.0, 2.0]);
        assert_eq!(ly, vec![10.0, 11.0, 12.0]);
        assert_eq!(rx, vec![2.0, 3.0, 4.0]);
        assert_eq!(ry, vec![12.0, 13.0, 14.0]);
    }

    #[test]
    fn no_cutpoints_is_one_zone_over_everything() {
        let xs = [3.0, 1.0, 2.0];
        let b = zone_boundaries(&xs, &[]).unwrap();
        let zones = zones_from_boundaries(&b);
        assert_eq!(zones, vec![Zone { index: 0, lower: 1.0, upper: 3.0 }]);
        assert_eq!(select_zone(&zones[0], &xs, &[0.0; 3]).0.len(), 3);
    }

    #[test]
    fn zone_index_counts_cutpoints_strictly_below() {
        let cuts = [2.0, 5.0];
        assert_eq!(zone_index(-3.0, &cuts), 0);
        assert_eq!(zone_index(2.0, &cuts), 0);
        assert_eq!(zone_index(2.1, &cuts), 1);
        assert_eq!(zone_index(7.0, &cuts), 2);
    }
}
