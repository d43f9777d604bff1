//! ASCII plotting for terminal output.
//!
//! Fixed-size character grid, used for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - fitted function: `-` line
//! - cutpoints (on the fitted line): `+`

use crate::domain::{ModelFile, Residual};
use crate::models::FittedSpline;

/// Render a plot for an in-memory fit.
pub fn render_ascii_plot(residuals: &[Residual], spline: &FittedSpline, width: usize, height: usize) -> String {
    let (x_min, x_max) = x_range_from_residuals(residuals).unwrap_or((0.0, 1.0));
    let curve = sample_curve(spline, x_min, x_max, width.max(2));
    let marks = cutpoint_marks(spline, x_min, x_max);
    let points: Vec<(f64, f64)> = residuals.iter().map(|r| (r.x, r.y_obs)).collect();
    render_plot(&points, Some(&curve), &marks, x_min, x_max, width, height)
}

/// Render a plot from a saved model file (fitted grid only, no observations).
pub fn render_ascii_plot_from_model(model: &ModelFile, width: usize, height: usize) -> String {
    let (x_min, x_max) = grid_x_range(model).unwrap_or((0.0, 1.0));
    let curve: Vec<(f64, f64)> = model
        .grid
        .x
        .iter()
        .zip(model.grid.y.iter())
        .map(|(&x, &y)| (x, y))
        .collect();
    let marks = cutpoint_marks(&model.spline, x_min, x_max);
    render_plot(&[], Some(&curve), &marks, x_min, x_max, width, height)
}

fn render_plot(
    points: &[(f64, f64)],
    curve_points: Option<&[(f64, f64)]>,
    marks: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(points, curve_points).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curve first, then cutpoint marks, then observations on top.
    if let Some(curve) = curve_points {
        draw_curve(&mut grid, curve, x_min, x_max, y_min, y_max);
    }
    for &(x, y) in marks {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = '+';
    }
    for &(x, y) in points {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range_from_residuals(residuals: &[Residual]) -> Option<(f64, f64)> {
    finite_span(residuals.iter().map(|r| r.x))
}

fn grid_x_range(model: &ModelFile) -> Option<(f64, f64)> {
    finite_span(model.grid.x.iter().copied())
}

fn finite_span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else {
        None
    }
}

fn sample_curve(spline: &FittedSpline, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x_min + u * (x_max - x_min);
        out.push((x, spline.evaluate(x)));
    }
    out
}

/// Cutpoints inside the plotted x-range, placed on the fitted line.
fn cutpoint_marks(spline: &FittedSpline, x_min: f64, x_max: f64) -> Vec<(f64, f64)> {
    spline
        .cutpoints
        .iter()
        .filter(|&&c| c >= x_min && c <= x_max)
        .map(|&c| (c, spline.evaluate(c)))
        .collect()
}

fn y_range(points: &[(f64, f64)], curve: Option<&[(f64, f64)]>) -> Option<(f64, f64)> {
    let curve_ys = curve.into_iter().flatten().map(|&(_, y)| y);
    finite_span(points.iter().map(|&(_, y)| y).chain(curve_ys))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y_max maps to row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residual(x: f64, y_obs: f64, spline: &FittedSpline) -> Residual {
        let y_fit = spline.evaluate(x);
        Residual {
            x,
            y_obs,
            y_fit,
            residual: y_obs - y_fit,
            zone: 0,
        }
    }

    #[test]
    fn plot_golden_snapshot_tent() {
        let spline = FittedSpline::from_zone_lines(vec![5.0], vec![1.0, -1.0], vec![0.0, 10.0]).unwrap();
        let points = vec![
            residual(0.0, 0.0, &spline),
            residual(3.0, 4.0, &spline),
            residual(10.0, 0.0, &spline),
        ];

        let txt = render_ascii_plot(&points, &spline, 11, 5);
        let expected = concat!(
            "Plot: x=[0.000, 10.000] | y=[-0.25, 5.25]\n",
            "     +     \n",
            "   o- -    \n",
            "  --   --  \n",
            " -       - \n",
            "o         o\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn marks_outside_range_are_skipped() {
        let spline = FittedSpline::from_zone_lines(vec![-1.0, 0.5], vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap();
        let marks = cutpoint_marks(&spline, 0.0, 1.0);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].0, 0.5);
    }
}
