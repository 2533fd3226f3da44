use crate::{
    error::{Error, Result},
    geometry::{Axis, Geometry, HIT_EPSILON, PARALLEL_EPSILON},
    vec3::Vec3,
    Intersection, Ray,
};

/// Axis-aligned cube around a center point.
#[derive(Copy, Clone, Debug)]
pub struct Cube {
    center: Vec3<f64>,
    side_length: f64,
    corners: [Vec3<f64>; 8],
}

/// One of the six cube faces, in `{x+, x-, y+, y-, z+, z-}` order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face(pub usize);

impl Face {
    /// Face whose outward normal points the way `offset` dominantly does.
    /// The first axis wins ties.
    pub fn of(offset: &Vec3<f64>) -> Self {
        let mut max_axis = Axis::X;
        let mut max_distance = -1.0;
        for &axis in Axis::ALL.iter() {
            let distance = offset.component(axis).abs();
            if distance > max_distance {
                max_distance = distance;
                max_axis = axis;
            }
        }

        let positive = offset.component(max_axis) > 0.0;
        let base = match max_axis {
            Axis::X => 0,
            Axis::Y => 2,
            Axis::Z => 4,
        };
        Face(if positive { base } else { base + 1 })
    }

    pub fn normal(self) -> Vec3<f64> {
        let axis = match self.0 / 2 {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        };
        let normal = Vec3::axis(axis);
        if self.0 % 2 == 0 {
            normal
        } else {
            normal.inverse()
        }
    }
}

impl Cube {
    pub fn new(center: Vec3<f64>, side_length: f64) -> Result<Self> {
        if !(side_length > 0.0) || !side_length.is_finite() {
            return Err(Error::invalid(
                "cube",
                format!("side length must be positive, got {}", side_length),
            ));
        }

        let half = side_length / 2.0;
        let mut corners = [Vec3::zero(); 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let x = if i & 1 == 0 { -half } else { half };
            let y = if i & 2 == 0 { -half } else { half };
            let z = if i & 4 == 0 { -half } else { half };
            *corner = center + Vec3::new(x, y, z);
        }

        Ok(Self {
            center,
            side_length,
            corners,
        })
    }

    #[inline]
    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    pub fn face(&self, point: &Vec3<f64>) -> Face {
        Face::of(&(*point - self.center))
    }
}

impl Geometry for Cube {
    fn intersection(&self, ray: &Ray<f64>) -> Option<Intersection> {
        let half = self.side_length / 2.0;
        let origin = ray.origin();

        let mut t_min = std::f64::NEG_INFINITY;
        let mut t_max = std::f64::INFINITY;

        for &axis in Axis::ALL.iter() {
            let o = origin.component(axis);
            let d = ray.direction().component(axis);
            let low = self.center.component(axis) - half;
            let high = self.center.component(axis) + half;

            if d.abs() < PARALLEL_EPSILON {
                if o < low || o > high {
                    return None;
                }
                continue;
            }

            let mut t1 = (low - o) / d;
            let mut t2 = (high - o) / d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        // Origin inside the cube or the cube entirely behind the ray.
        if t_min <= HIT_EPSILON || !t_min.is_finite() {
            return None;
        }

        Some(Intersection::new(t_min, ray.offset(t_min)))
    }

    fn normal(&self, point: &Vec3<f64>) -> Vec3<f64> {
        self.face(point).normal()
    }

    fn anchor(&self) -> Vec3<f64> {
        self.center
    }

    fn points(&self) -> Vec<Vec3<f64>> {
        self.corners.to_vec()
    }
}
