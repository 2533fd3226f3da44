use crate::{error::Error, Vec3};

/// Gap below which two rays are considered to meet.
const TOLERANCE: f64 = 1e-6;

/// Half-line `origin + t * direction`, `t >= 0`.
///
/// The direction is kept as given; use [`Ray::towards`] to build a normalized
/// ray aimed at a point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray<T> {
    origin: Vec3<T>,
    direction: Vec3<T>,
}

impl Ray<f64> {
    pub fn new(origin: Vec3<f64>, direction: Vec3<f64>) -> Self {
        Self { origin, direction }
    }

    /// Normalized ray from `origin` aimed at `target`.
    pub fn towards(origin: Vec3<f64>, target: Vec3<f64>) -> Result<Self, Error> {
        let direction = (target - origin).try_unit().ok_or(Error::DegenerateRay)?;
        Ok(Self { origin, direction })
    }

    #[inline]
    pub fn origin(&self) -> Vec3<f64> {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> &Vec3<f64> {
        &self.direction
    }

    #[inline]
    pub fn offset(&self, t: f64) -> Vec3<f64> {
        self.origin + self.direction.scale(t)
    }

    /// Parameters `(t, s)` of the closest points between this ray and
    /// `other`, measured along each ray's own direction.
    ///
    /// Returns `None` for parallel rays, when either closest point lies behind
    /// its origin, or when the rays pass each other further apart than the
    /// tolerance.
    pub fn closest_approach(&self, other: &Ray<f64>) -> Option<(f64, f64)> {
        let d1 = self.direction;
        let d2 = other.direction;
        let r = self.origin - other.origin;

        let a = d1.dot(&d1);
        let b = d1.dot(&d2);
        let c = d2.dot(&d2);
        let d = d1.dot(&r);
        let e = d2.dot(&r);

        let denominator = a * c - b * b;
        if denominator.abs() < TOLERANCE * a * c {
            return None;
        }

        let t = (b * e - c * d) / denominator;
        let s = (a * e - b * d) / denominator;
        if t < 0.0 || s < 0.0 {
            return None;
        }

        if self.offset(t).distance(&other.offset(s)) < TOLERANCE {
            Some((t, s))
        } else {
            None
        }
    }

    /// Point where this ray meets `other`, if they meet.
    pub fn intersection(&self, other: &Ray<f64>) -> Option<Vec3<f64>> {
        self.closest_approach(other).map(|(t, _)| self.offset(t))
    }
}

#[test]
fn towards_normalizes_direction() {
    let ray = Ray::towards(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 5.0)).unwrap();
    assert_eq!(&Vec3::new(0.0, 0.0, 1.0), ray.direction());
}

#[test]
fn towards_rejects_same_point() {
    let p = Vec3::new(2.0, 3.0, 4.0);
    match Ray::towards(p, p) {
        Err(Error::DegenerateRay) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn crossing_rays_intersect() {
    let a = Ray::new(Vec3::new(-2.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
    let b = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    crate::vec3::assert_close(Vec3::zero(), a.intersection(&b).unwrap());
    let (t, s) = a.closest_approach(&b).unwrap();
    assert!((t - 2.0).abs() < 1e-9);
    assert!((s - 3.0).abs() < 1e-9);
}

#[test]
fn skew_rays_do_not_intersect() {
    let a = Ray::new(Vec3::new(-2.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
    let b = Ray::new(Vec3::new(0.0, -3.0, 1.0), Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(None, a.intersection(&b));
}

#[test]
fn parallel_rays_do_not_intersect() {
    let a = Ray::new(Vec3::zero(), Vec3::new(1.0, 0.0, 0.0));
    let b = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(None, a.intersection(&b));
}

#[test]
fn rays_meeting_behind_origin_do_not_intersect() {
    let a = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
    let b = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(None, a.intersection(&b));
}
