//! Permissive sphere-in-sphere test used to link tiles across levels.

use lodpage_scene::Sphere;

/// Default fraction of the inner radius allowed to protrude.
pub const DEFAULT_CONTAINMENT_SLACK: f64 = 0.5;

/// Decides whether one bounding sphere is "mostly inside" another.
///
/// A heuristic tolerance, not geometric containment: the inner sphere may
/// stick out of the outer one by up to `slack` times its own radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Containment {
    pub slack: f64,
}

impl Containment {
    pub fn new(slack: f64) -> Self {
        Self { slack }
    }

    /// Returns `true` if `inner` is mostly inside `outer`.
    ///
    /// With `allowed = outer.radius - inner.radius * slack`, holds iff
    /// `allowed >= 0` and the centers are at most `allowed` apart. Not
    /// symmetric.
    pub fn mostly_contains(&self, outer: &Sphere, inner: &Sphere) -> bool {
        let allowed = outer.radius - inner.radius * self.slack;
        allowed >= 0.0 && outer.center_distance(inner) <= allowed
    }
}

impl Default for Containment {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINMENT_SLACK)
    }
}

/// [`Containment::mostly_contains`] with the default slack.
pub fn mostly_contains(outer: &Sphere, inner: &Sphere) -> bool {
    Containment::default().mostly_contains(outer, inner)
}
