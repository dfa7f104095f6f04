//! Bounding spheres in f64 model space.

use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

/// A bounding sphere described by its center and radius.
///
/// A negative radius marks an invalid (empty) sphere, matching the
/// convention used by scene-graph runtimes for nodes without geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: DVec3,
    /// Radius of the sphere. Negative when invalid.
    pub radius: f64,
}

impl Sphere {
    /// The empty sphere. Unions with it return the other operand.
    pub const INVALID: Self = Self {
        center: DVec3::ZERO,
        radius: -1.0,
    };

    /// Create a sphere from its center and radius.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Returns `true` if the sphere encloses at least one point.
    pub fn is_valid(&self) -> bool {
        self.radius >= 0.0
    }

    /// Compute a bounding sphere for a point cloud.
    ///
    /// The center is the middle of the axis-aligned bounding box; the radius
    /// reaches the farthest point. Returns `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = points.first()?.as_dvec3();
        let (min, max) = points
            .iter()
            .map(|p| p.as_dvec3())
            .fold((first, first), |(min, max), p| (min.min(p), max.max(p)));

        let center = (min + max) * 0.5;
        let radius = points
            .iter()
            .map(|p| p.as_dvec3().distance(center))
            .fold(0.0_f64, f64::max);

        Some(Self { center, radius })
    }

    /// Return the smallest sphere enclosing both `self` and `other`.
    pub fn union(&self, other: &Sphere) -> Sphere {
        if !other.is_valid() {
            return *self;
        }
        if !self.is_valid() {
            return *other;
        }

        let offset = other.center - self.center;
        let distance = offset.length();

        // One sphere already encloses the other.
        if distance + other.radius <= self.radius {
            return *self;
        }
        if distance + self.radius <= other.radius {
            return *other;
        }

        let radius = (self.radius + distance + other.radius) * 0.5;
        let center = self.center + offset * ((radius - self.radius) / distance);
        Sphere { center, radius }
    }

    /// Distance between the centers of two spheres.
    pub fn center_distance(&self, other: &Sphere) -> f64 {
        self.center.distance(other.center)
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::INVALID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_empty_is_none() {
        assert!(Sphere::from_points(&[]).is_none());
    }

    #[test]
    fn test_from_points_unit_cube() {
        let points = [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
        ];
        let sphere = Sphere::from_points(&points).unwrap();
        assert_eq!(sphere.center, DVec3::ZERO);
        assert!((sphere.radius - 3.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_has_zero_radius() {
        let sphere = Sphere::from_points(&[Vec3::new(2.0, 3.0, 4.0)]).unwrap();
        assert_eq!(sphere.center, DVec3::new(2.0, 3.0, 4.0));
        assert_eq!(sphere.radius, 0.0);
        assert!(sphere.is_valid());
    }

    #[test]
    fn test_union_with_invalid_returns_other() {
        let a = Sphere::new(DVec3::new(1.0, 0.0, 0.0), 2.0);
        assert_eq!(a.union(&Sphere::INVALID), a);
        assert_eq!(Sphere::INVALID.union(&a), a);
    }

    #[test]
    fn test_union_contained_sphere() {
        let outer = Sphere::new(DVec3::ZERO, 10.0);
        let inner = Sphere::new(DVec3::new(1.0, 0.0, 0.0), 2.0);
        assert_eq!(outer.union(&inner), outer);
        assert_eq!(inner.union(&outer), outer);
    }

    #[test]
    fn test_union_disjoint_spheres() {
        let a = Sphere::new(DVec3::new(-5.0, 0.0, 0.0), 1.0);
        let b = Sphere::new(DVec3::new(5.0, 0.0, 0.0), 1.0);
        let u = a.union(&b);
        assert!(u.center.distance(DVec3::ZERO) < 1e-9);
        assert!((u.radius - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_center_distance() {
        let a = Sphere::new(DVec3::ZERO, 1.0);
        let b = Sphere::new(DVec3::new(3.0, 4.0, 0.0), 1.0);
        assert!((a.center_distance(&b) - 5.0).abs() < 1e-12);
    }
}
