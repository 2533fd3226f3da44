use std::f64::consts::FRAC_PI_2;

use crate::{
    error::{Error, Result},
    geometry::{Angle, Geometry, HIT_EPSILON},
    vec3::{Vec3, EPSILON},
    Intersection, Ray,
};

/// Finite cone opening from `apex` along `axis`.
///
/// `angle` is the half-angle between the axis and the surface. Only the nappe
/// on the positive side of the axis, up to `height`, is part of the surface.
#[derive(Copy, Clone, Debug)]
pub struct Cone {
    apex: Vec3<f64>,
    axis: Vec3<f64>,
    angle: f64,
    height: f64,
}

impl Cone {
    pub fn new<A: Into<Angle>>(apex: Vec3<f64>, axis: Vec3<f64>, angle: A, height: f64) -> Result<Self> {
        let axis = axis
            .try_unit()
            .ok_or_else(|| Error::invalid("cone", "axis must not be zero"))?;

        let angle = angle.into().radians();
        if !(angle > 0.0 && angle < FRAC_PI_2) {
            return Err(Error::invalid(
                "cone",
                format!("half-angle must be within (0, pi/2), got {}", angle),
            ));
        }

        if !(height > 0.0) || !height.is_finite() {
            return Err(Error::invalid("cone", format!("height must be positive, got {}", height)));
        }

        Ok(Self {
            apex,
            axis,
            angle,
            height,
        })
    }

    #[inline]
    pub fn axis(&self) -> Vec3<f64> {
        self.axis
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Distance of `point` from the apex, measured along the axis.
    #[inline]
    pub fn height_at(&self, point: &Vec3<f64>) -> f64 {
        (*point - self.apex).dot(&self.axis)
    }

    fn roots(&self, ray: &Ray<f64>) -> Option<(f64, f64)> {
        let d = *ray.direction();
        let co = ray.origin() - self.apex;
        let cos2 = self.angle.cos().powi(2);

        let dv = d.dot(&self.axis);
        let cov = co.dot(&self.axis);

        let a = dv * dv - d.dot(&d) * cos2;
        let b = 2.0 * (dv * cov - d.dot(&co) * cos2);
        let c = cov * cov - co.dot(&co) * cos2;

        // Ray parallel to the surface: the quadratic collapses to b*t + c = 0.
        if a.abs() < EPSILON {
            if b.abs() < EPSILON {
                return None;
            }
            let t = -c / b;
            return Some((t, t));
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt = discriminant.sqrt();
        let x1 = (-b - sqrt) / (2.0 * a);
        let x2 = (-b + sqrt) / (2.0 * a);

        Some(if x1 < x2 { (x1, x2) } else { (x2, x1) })
    }
}

impl Geometry for Cone {
    fn intersection(&self, ray: &Ray<f64>) -> Option<Intersection> {
        let (t_min, t_max) = self.roots(ray)?;

        // The far root is taken only when the near one lies behind the origin.
        let t = if t_min > -HIT_EPSILON { t_min } else { t_max };
        if t <= HIT_EPSILON || !t.is_finite() {
            return None;
        }

        let point = ray.offset(t);
        let h = self.height_at(&point);
        if h < 0.0 || h > self.height {
            return None;
        }

        Some(Intersection::new(t, point))
    }

    fn normal(&self, point: &Vec3<f64>) -> Vec3<f64> {
        let cp = *point - self.apex;
        let len2 = cp.dot(&cp);
        if len2 < EPSILON {
            return self.axis.inverse();
        }

        (cp.scale(self.axis.dot(&cp) / len2) - self.axis)
            .try_unit()
            .unwrap_or_else(|| self.axis.inverse())
    }

    fn anchor(&self) -> Vec3<f64> {
        self.apex
    }

    fn points(&self) -> Vec<Vec3<f64>> {
        vec![self.apex, self.apex + self.axis]
    }
}
