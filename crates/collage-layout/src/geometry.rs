//! Numeric helpers shared by the constraint and layout code.

use crate::types::Rect;

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Euclidean distance between two points
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

/// Round to a fixed number of decimal places.
///
/// Layout code compares rounded values so that float jitter cannot flip
/// a decision back and forth between runs.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Whether two rectangles, each grown by `padding` on every side, intersect.
///
/// Rectangles that only touch do not overlap.
pub fn check_overlap(a: &Rect, b: &Rect, padding: f64) -> bool {
    let a = a.inflate(padding);
    let b = b.inflate(padding);
    a.left < b.right() && a.right() > b.left && a.top < b.bottom() && a.bottom() > b.top
}

/// Normalize an angle into [0, 360)
pub fn normalize_angle(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Shortest signed rotation taking `from` to `to`, in (-180, 180]
pub fn shortest_angle_delta(from: f64, to: f64) -> f64 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_conversions() {
        assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((rad_to_deg(std::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(distance(1.0, 1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_round_to_decimals() {
        assert_eq!(round_to_decimals(89.99999, 2), 90.0);
        assert_eq!(round_to_decimals(1.23456, 3), 1.235);
        assert_eq!(round_to_decimals(-0.004, 2), 0.0);
    }

    #[test]
    fn test_check_overlap_with_padding() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(103.0, 0.0, 50.0, 50.0);

        // 3px apart: clear without padding, overlapping once both grow by 2px
        assert!(!check_overlap(&a, &b, 0.0));
        assert!(check_overlap(&a, &b, 2.0));

        // Touching edges never count as overlap
        let c = Rect::new(100.0, 0.0, 10.0, 10.0);
        assert!(!check_overlap(&a, &c, 0.0));

        let inside = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(check_overlap(&a, &inside, 0.0));
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(370.0), 10.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(0.0), 0.0);
    }

    #[test]
    fn test_shortest_angle_delta_wraps() {
        assert_eq!(shortest_angle_delta(350.0, 10.0), 20.0);
        assert_eq!(shortest_angle_delta(10.0, 350.0), -20.0);
        assert_eq!(shortest_angle_delta(0.0, 180.0), 180.0);
        assert_eq!(shortest_angle_delta(180.0, 0.0), 180.0);
        assert_eq!(shortest_angle_delta(45.0, 45.0), 0.0);
    }
}
