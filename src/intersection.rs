use crate::{geometry::Shape, vec3::Vec3};

/// Where a ray meets a geometry: parameter along the ray and the point itself.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub point: Vec3<f64>,
}

impl Intersection {
    pub fn new(t: f64, point: Vec3<f64>) -> Self {
        Self { t, point }
    }
}

/// An intersection bound to the shape that produced it.
///
/// `shape` borrows the struck shape out of the scene and `index` is its
/// position in the scene's shape list. This is how a material reaches the
/// geometry it belongs to.
#[derive(Copy, Clone, Debug)]
pub struct RayHit<'a> {
    pub t: f64,
    pub point: Vec3<f64>,
    pub shape: &'a Shape,
    pub index: usize,
}

impl<'a> RayHit<'a> {
    pub fn new(intersection: Intersection, shape: &'a Shape, index: usize) -> Self {
        Self {
            t: intersection.t,
            point: intersection.point,
            shape,
            index,
        }
    }

    #[inline]
    pub fn normal(&self) -> Vec3<f64> {
        self.shape.geometry.normal(&self.point)
    }
}
