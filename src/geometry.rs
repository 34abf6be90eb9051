//! Vector primitives shared by the filtering and matching stages.
//!
//! The helpers operate on `nalgebra` points and vectors so every stage measures distances and
//! angles the same way. No normalization is applied implicitly; callers that need unit vectors
//! must normalize themselves.

use crate::model::types::{Orientation, Point};

/// Sum of componentwise products of two vectors.
#[inline]
pub fn dot(v1: &Orientation, v2: &Orientation) -> f64 {
    v1.x * v2.x + v1.y * v2.y + v1.z * v2.z
}

/// Euclidean norm, `sqrt(dot(v, v))`.
#[inline]
pub fn magnitude(v: &Orientation) -> f64 {
    dot(v, v).sqrt()
}

/// Euclidean distance between two points in ångströms.
#[inline]
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    nalgebra::distance(p1, p2)
}

/// Angle between two vectors in degrees.
///
/// Returns `None` when either vector has zero magnitude, since the angle is undefined. The
/// cosine is clamped to `[-1, 1]` before `acos` so that rounding on parallel or anti-parallel
/// inputs cannot yield `NaN`.
///
/// # Arguments
///
/// * `v1` - First direction.
/// * `v2` - Second direction.
///
/// # Returns
///
/// `Some(angle)` in `[0, 180]`, or `None` for degenerate input.
pub fn angle_degrees(v1: &Orientation, v2: &Orientation) -> Option<f64> {
    let magnitude_product = magnitude(v1) * magnitude(v2);
    if magnitude_product == 0.0 || !magnitude_product.is_finite() {
        return None;
    }

    let cos_angle = (dot(v1, v2) / magnitude_product).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_does_not_normalize() {
        let a = Orientation::new(1.0, 2.0, 3.0);
        let b = Orientation::new(4.0, -5.0, 6.0);
        assert!((dot(&a, &b) - 12.0).abs() < 1e-10);
    }

    #[test]
    fn magnitude_of_pythagorean_vector() {
        let v = Orientation::new(3.0, 4.0, 0.0);
        assert!((magnitude(&v) - 5.0).abs() < 1e-10);
        assert_eq!(magnitude(&Orientation::zeros()), 0.0);
    }

    #[test]
    fn distance_with_negative_coordinates() {
        let a = Point::new(-1.0, -2.0, -3.0);
        let b = Point::new(1.0, 2.0, 3.0);
        assert!((distance(&a, &b) - 56.0_f64.sqrt()).abs() < 1e-10);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn angle_between_axes() {
        let x = Orientation::new(1.0, 0.0, 0.0);
        let y = Orientation::new(0.0, 2.0, 0.0);
        let neg_x = Orientation::new(-3.0, 0.0, 0.0);

        assert!((angle_degrees(&x, &x).unwrap() - 0.0).abs() < 1e-10);
        assert!((angle_degrees(&x, &y).unwrap() - 90.0).abs() < 1e-10);
        assert!((angle_degrees(&x, &neg_x).unwrap() - 180.0).abs() < 1e-10);
    }

    #[test]
    fn angle_is_none_for_zero_vector() {
        let x = Orientation::new(1.0, 0.0, 0.0);
        assert_eq!(angle_degrees(&x, &Orientation::zeros()), None);
        assert_eq!(angle_degrees(&Orientation::zeros(), &x), None);
    }

    #[test]
    fn angle_of_nearly_parallel_vectors_is_finite() {
        let a = Orientation::new(0.1, 0.2, 0.3);
        let b = a * 7.0;
        let angle = angle_degrees(&a, &b).unwrap();
        assert!(angle.is_finite());
        assert!(angle.abs() < 1e-5);
    }
}
