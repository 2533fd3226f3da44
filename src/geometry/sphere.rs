use crate::{
    error::{Error, Result},
    geometry::{Geometry, HIT_EPSILON},
    vec3::Vec3,
    Intersection, Ray,
};

#[derive(Copy, Clone, Debug)]
pub struct Sphere {
    center: Vec3<f64>,
    radius: f64,
}

impl Sphere {
    pub fn new(center: Vec3<f64>, radius: f64) -> Result<Self> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(Error::invalid("sphere", format!("radius must be positive, got {}", radius)));
        }

        Ok(Self { center, radius })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Geometry for Sphere {
    /// Only the near root is considered, so rays starting inside the sphere
    /// miss it.
    fn intersection(&self, ray: &Ray<f64>) -> Option<Intersection> {
        let oc = ray.origin() - self.center;

        let a = ray.direction().dot(ray.direction());
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.dot(&oc) - self.radius.powi(2);

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        if t <= HIT_EPSILON || !t.is_finite() {
            return None;
        }

        Some(Intersection::new(t, ray.offset(t)))
    }

    fn normal(&self, point: &Vec3<f64>) -> Vec3<f64> {
        (*point - self.center)
            .try_unit()
            .unwrap_or_else(|| Vec3::new(0.0, 1.0, 0.0))
    }

    fn anchor(&self) -> Vec3<f64> {
        self.center
    }

    fn points(&self) -> Vec<Vec3<f64>> {
        vec![self.center]
    }
}
