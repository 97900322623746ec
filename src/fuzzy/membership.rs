// triangular membership functions over a sampled domain

use crate::error::EngineError;

/// tolerance used when deciding whether a float quotient is integral
const INTEGRAL_TOLERANCE: f64 = 1e-9;

/// an evenly spaced, strictly increasing sample grid over `[start, stop)`
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    samples: Vec<f64>,
    step: f64,
}

impl Domain {
    /// build the grid `start, start + step, ...` up to but excluding `stop`.
    /// a non-positive step or an empty interval yields an empty domain.
    ///
    /// when `1 / step` is integral (0.1, 0.5, 1, ...) samples are computed as
    /// `(k + i) / (1 / step)` instead of `start + i * step`, so every grid point
    /// that is a multiple of the step is represented exactly and never drifts
    /// off an integer breakpoint.
    pub fn arange(start: f64, stop: f64, step: f64) -> Self {
        if !(step > 0.0) || !(stop > start) {
            return Self {
                samples: Vec::new(),
                step,
            };
        }

        let span = (stop - start) / step;
        let count = if (span - span.round()).abs() < INTEGRAL_TOLERANCE {
            span.round() as usize
        } else {
            span.ceil() as usize
        };

        let inv = 1.0 / step;
        let base = start * inv;
        let exact_grid = (inv - inv.round()).abs() < INTEGRAL_TOLERANCE
            && (base - base.round()).abs() < INTEGRAL_TOLERANCE;

        let samples = if exact_grid {
            let inv = inv.round();
            let base = base.round();
            (0..count).map(|i| (base + i as f64) / inv).collect()
        } else {
            (0..count).map(|i| start + step * i as f64).collect()
        };

        Self { samples, step }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// index of the grid point closest to `x`, if one lies within half a step
    pub fn nearest_index(&self, x: f64) -> Option<usize> {
        if self.samples.is_empty() || x.is_nan() {
            return None;
        }
        let idx = self.samples.partition_point(|&s| s < x);
        let candidate = match idx {
            0 => 0,
            i if i == self.samples.len() => i - 1,
            i => {
                if (self.samples[i] - x).abs() < (x - self.samples[i - 1]).abs() {
                    i
                } else {
                    i - 1
                }
            }
        };
        if (self.samples[candidate] - x).abs() <= self.step / 2.0 {
            Some(candidate)
        } else {
            None
        }
    }
}

/// breakpoints `(left, middle, right)` of a triangular fuzzy set.
/// `left == middle` and `middle == right` describe shoulders that saturate
/// to 1 on the open side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub left: f64,
    pub middle: f64,
    pub right: f64,
}

impl Triangle {
    pub const fn new(left: f64, middle: f64, right: f64) -> Self {
        Self {
            left,
            middle,
            right,
        }
    }
}

/// discretize a triangle over the domain into one grade per sample.
pub fn build_triangle(domain: &Domain, shape: Triangle) -> Result<Vec<f64>, EngineError> {
    let Triangle {
        left: l,
        middle: m,
        right: r,
    } = shape;
    if !(l <= m && m <= r) {
        return Err(EngineError::InvalidShape {
            left: l,
            middle: m,
            right: r,
        });
    }

    let mut curve = vec![0.0; domain.len()];
    for (grade, &x) in curve.iter_mut().zip(domain.samples()) {
        if l < x && x < m {
            *grade = (x - l) / (m - l);
        } else if m < x && x < r {
            *grade = (r - x) / (r - m);
        }
        if (l == m && x <= m) || (m == r && x >= m) {
            *grade = 1.0;
        }
    }

    // the peak is pinned on the nearest grid point, not only on exact equality
    if let Some(peak) = domain.nearest_index(m) {
        curve[peak] = 1.0;
    }

    Ok(curve)
}

/// piecewise-linear interpolation of `curve` at `x`.
/// outside the domain the first/last grade is returned (no extrapolation).
pub fn grade_at(domain: &Domain, curve: &[f64], x: f64) -> Result<f64, EngineError> {
    let xs = domain.samples();
    if xs.len() != curve.len() {
        return Err(EngineError::LengthMismatch {
            what: "domain and membership curve",
            expected: xs.len(),
            found: curve.len(),
        });
    }
    if xs.is_empty() {
        return Ok(0.0);
    }

    let idx = xs.partition_point(|&s| s < x);
    if idx == 0 {
        return Ok(curve[0]);
    }
    if idx == xs.len() {
        return Ok(curve[curve.len() - 1]);
    }
    if xs[idx] == x {
        return Ok(curve[idx]);
    }

    let (x0, x1) = (xs[idx - 1], xs[idx]);
    let (y0, y1) = (curve[idx - 1], curve[idx]);
    Ok(y0 + (x - x0) * (y1 - y0) / (x1 - x0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length_domain() -> Domain {
        Domain::arange(0.0, 27.0, 0.1)
    }

    #[test]
    fn arange_sample_counts() {
        assert_eq!(Domain::arange(0.0, 27.0, 0.1).len(), 270);
        assert_eq!(Domain::arange(0.0, 680.0, 0.1).len(), 6800);
        assert_eq!(Domain::arange(0.0, 100.0, 0.1).len(), 1000);
        assert_eq!(Domain::arange(0.0, 10.0, 3.0).len(), 4);
    }

    #[test]
    fn arange_is_closed_open() {
        let d = Domain::arange(0.0, 100.0, 0.1);
        assert_eq!(d.samples()[0], 0.0);
        assert!(d.samples()[d.len() - 1] < 100.0);
        assert!(d.samples().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn arange_hits_integer_breakpoints_exactly() {
        let d = Domain::arange(0.0, 680.0, 0.1);
        assert_eq!(d.samples()[1730], 173.0);
        assert_eq!(d.samples()[3410], 341.0);
        assert_eq!(d.samples()[6770], 677.0);
    }

    #[test]
    fn arange_degenerate_inputs() {
        assert!(Domain::arange(0.0, 10.0, 0.0).is_empty());
        assert!(Domain::arange(0.0, 10.0, -1.0).is_empty());
        assert!(Domain::arange(5.0, 5.0, 0.1).is_empty());
    }

    #[test]
    fn nearest_index_within_half_step() {
        let d = length_domain();
        assert_eq!(d.nearest_index(14.0), Some(140));
        assert_eq!(d.nearest_index(14.04), Some(140));
        assert_eq!(d.nearest_index(14.06), Some(141));
        assert_eq!(d.nearest_index(40.0), None);
    }

    #[test]
    fn build_triangle_rejects_unordered_breakpoints() {
        let d = length_domain();
        let err = build_triangle(&d, Triangle::new(8.0, 4.0, 12.0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidShape { .. }));
        assert!(build_triangle(&d, Triangle::new(4.0, 12.0, 8.0)).is_err());
        assert!(build_triangle(&d, Triangle::new(f64::NAN, 4.0, 8.0)).is_err());
    }

    #[test]
    fn build_triangle_regular_shape() {
        let d = length_domain();
        let curve = build_triangle(&d, Triangle::new(4.0, 8.0, 12.0)).unwrap();
        assert_eq!(curve.len(), d.len());
        assert_eq!(curve[40], 0.0);
        assert_eq!(curve[60], 0.5);
        assert_eq!(curve[80], 1.0);
        assert_eq!(curve[100], 0.5);
        assert_eq!(curve[120], 0.0);
        assert_eq!(curve[200], 0.0);
    }

    #[test]
    fn build_triangle_left_shoulder() {
        let d = length_domain();
        let curve = build_triangle(&d, Triangle::new(2.0, 2.0, 6.0)).unwrap();
        assert!(curve[..=20].iter().all(|&g| g == 1.0));
        assert_eq!(curve[40], 0.5);
        assert!(curve[60..].iter().all(|&g| g == 0.0));
    }

    #[test]
    fn build_triangle_right_shoulder() {
        let d = length_domain();
        let curve = build_triangle(&d, Triangle::new(22.0, 26.0, 26.0)).unwrap();
        assert!(curve[..=220].iter().all(|&g| g == 0.0));
        assert_eq!(curve[240], 0.5);
        assert!(curve[260..].iter().all(|&g| g == 1.0));
    }

    #[test]
    fn build_triangle_peak_on_drifting_grid() {
        // 0.3 steps do not land exactly on 6.0 through accumulation
        let d = Domain::arange(0.1, 9.0, 0.3);
        let curve = build_triangle(&d, Triangle::new(3.0, 6.1, 8.0)).unwrap();
        assert!(curve.iter().any(|&g| g == 1.0));
    }

    #[test]
    fn grade_at_peak_is_one() {
        let d = length_domain();
        let curve = build_triangle(&d, Triangle::new(10.0, 14.0, 18.0)).unwrap();
        assert_eq!(grade_at(&d, &curve, 14.0).unwrap(), 1.0);
    }

    #[test]
    fn grade_at_interpolates_between_samples() {
        let d = length_domain();
        let curve = build_triangle(&d, Triangle::new(4.0, 8.0, 12.0)).unwrap();
        let g = grade_at(&d, &curve, 6.05).unwrap();
        assert!((g - 0.5125).abs() < 1e-9, "got {}", g);
    }

    #[test]
    fn grade_at_clamps_outside_domain() {
        let d = length_domain();
        let curve = build_triangle(&d, Triangle::new(22.0, 26.0, 26.0)).unwrap();
        assert_eq!(grade_at(&d, &curve, 40.0).unwrap(), 1.0);
        assert_eq!(grade_at(&d, &curve, -3.0).unwrap(), 0.0);
    }

    #[test]
    fn grade_at_length_mismatch() {
        let d = length_domain();
        let err = grade_at(&d, &[0.0, 1.0], 1.0).unwrap_err();
        assert_eq!(
            err,
            EngineError::LengthMismatch {
                what: "domain and membership curve",
                expected: 270,
                found: 2,
            }
        );
    }
}
