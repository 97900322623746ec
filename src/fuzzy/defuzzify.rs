// centroid (center of gravity) defuzzification

use crate::error::EngineError;
use crate::fuzzy::membership::Domain;

/// crisp value of an aggregated output curve.
///
/// fails with `ZeroDegree` when the curve carries no membership at all;
/// with an exhaustive rule table this cannot happen.
pub fn defuzzify(domain: &Domain, curve: &[f64]) -> Result<f64, EngineError> {
    if domain.len() != curve.len() {
        return Err(EngineError::LengthMismatch {
            what: "output domain and aggregated curve",
            expected: domain.len(),
            found: curve.len(),
        });
    }

    let degree: f64 = curve.iter().sum();
    if degree == 0.0 {
        return Err(EngineError::ZeroDegree);
    }

    Ok(centroid(domain.samples(), curve))
}

/// area-weighted center of the piecewise-linear curve through `(xs[i], ys[i])`.
/// `xs` and `ys` must have equal length.
pub fn centroid(xs: &[f64], ys: &[f64]) -> f64 {
    let epsilon = f64::EPSILON;

    if xs.len() == 1 {
        return xs[0] * ys[0] / ys[0].max(epsilon);
    }

    let mut moment = 0.0_f64;
    let mut total_area = 0.0_f64;

    for (x, y) in xs.windows(2).zip(ys.windows(2)) {
        let (x1, x2) = (x[0], x[1]);
        let (y1, y2) = (y[0], y[1]);
        if (y1 == 0.0 && y2 == 0.0) || x1 == x2 {
            continue;
        }

        let width = x2 - x1;
        let (center, area) = if y1 == y2 {
            // rectangle
            (0.5 * (x1 + x2), width * y1)
        } else if y1 == 0.0 {
            // right triangle rising to y2
            (x1 + 2.0 / 3.0 * width, 0.5 * width * y2)
        } else if y2 == 0.0 {
            // right triangle falling from y1
            (x1 + 1.0 / 3.0 * width, 0.5 * width * y1)
        } else {
            // trapezoid
            (
                x1 + (2.0 / 3.0 * width * (y2 + 0.5 * y1)) / (y1 + y2),
                0.5 * width * (y1 + y2),
            )
        };

        moment += center * area;
        total_area += area;
    }

    moment / total_area.max(epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::membership::{build_triangle, Triangle};

    fn strength_domain() -> Domain {
        Domain::arange(0.0, 100.0, 0.1)
    }

    #[test]
    fn zero_degree_is_rejected() {
        let d = strength_domain();
        let curve = vec![0.0; d.len()];
        assert_eq!(defuzzify(&d, &curve), Err(EngineError::ZeroDegree));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let d = strength_domain();
        assert!(matches!(
            defuzzify(&d, &[1.0, 1.0]),
            Err(EngineError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn symmetric_triangle_centroid_is_its_peak() {
        let d = strength_domain();
        let curve = build_triangle(&d, Triangle::new(40.0, 50.0, 60.0)).unwrap();
        let c = defuzzify(&d, &curve).unwrap();
        assert!((c - 50.0).abs() < 1e-6, "got {}", c);
    }

    #[test]
    fn rectangle_centroid_is_midpoint() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.5; 5];
        assert!((centroid(&xs, &ys) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rising_triangle_segment() {
        // single segment from 0 to 3, apex on the right
        let c = centroid(&[0.0, 3.0], &[0.0, 1.0]);
        assert!((c - 2.0).abs() < 1e-12);
    }

    #[test]
    fn falling_triangle_segment() {
        let c = centroid(&[0.0, 3.0], &[1.0, 0.0]);
        assert!((c - 1.0).abs() < 1e-12);
    }

    #[test]
    fn trapezoid_segment() {
        // trapezoid 0..3 with heights 1 and 2: centroid at 3 * (1 + 2*2) / (3 * (1 + 2)) = 5/3
        let c = centroid(&[0.0, 3.0], &[1.0, 2.0]);
        assert!((c - 5.0 / 3.0).abs() < 1e-12, "got {}", c);
    }

    #[test]
    fn single_point_returns_its_position() {
        assert!((centroid(&[42.0], &[0.7]) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_with_zero_grade_is_zero() {
        assert_eq!(centroid(&[42.0], &[0.0]), 0.0);
    }

    #[test]
    fn shifting_mass_right_increases_centroid() {
        let d = strength_domain();
        let low = build_triangle(&d, Triangle::new(20.0, 30.0, 40.0)).unwrap();
        let high = build_triangle(&d, Triangle::new(60.0, 70.0, 80.0)).unwrap();
        assert!(defuzzify(&d, &low).unwrap() < defuzzify(&d, &high).unwrap());
    }

    #[test]
    fn coincident_x_segments_are_skipped() {
        let c = centroid(&[1.0, 1.0, 2.0], &[1.0, 1.0, 1.0]);
        assert!((c - 1.5).abs() < 1e-12);
    }
}
