use crate::{
    geometry::{Axis, Geometry, HIT_EPSILON, PARALLEL_EPSILON},
    vec3::Vec3,
    Intersection, Ray,
};

///
///
/// An infinite axis-aligned plane through `anchor`, facing the positive
/// direction of `axis`.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct Plane {
    anchor: Vec3<f64>,
    axis: Axis,
}

impl Plane {
    pub fn new(anchor: Vec3<f64>, axis: Axis) -> Self {
        Self { anchor, axis }
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl Geometry for Plane {
    fn intersection(&self, ray: &Ray<f64>) -> Option<Intersection> {
        let denominator = ray.direction().component(self.axis);
        if denominator.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.anchor.component(self.axis) - ray.origin().component(self.axis)) / denominator;
        if t <= HIT_EPSILON {
            return None;
        }

        Some(Intersection::new(t, ray.offset(t)))
    }

    fn normal(&self, _point: &Vec3<f64>) -> Vec3<f64> {
        Vec3::axis(self.axis)
    }

    fn anchor(&self) -> Vec3<f64> {
        self.anchor
    }

    fn points(&self) -> Vec<Vec3<f64>> {
        vec![self.anchor]
    }
}

#[test]
fn ray_hits_floor() {
    let floor = Plane::new(Vec3::new(0.0, -1.0, 0.0), Axis::Y);
    let ray = Ray::towards(Vec3::new(0.0, 3.0, 0.0), Vec3::new(4.0, -1.0, 0.0)).unwrap();

    let hit = floor.intersection(&ray).unwrap();
    crate::vec3::assert_close(Vec3::new(4.0, -1.0, 0.0), hit.point);
    assert_eq!(Vec3::new(0.0, 1.0, 0.0), floor.normal(&hit.point));
}

#[test]
fn parallel_ray_misses() {
    let wall = Plane::new(Vec3::new(2.0, 0.0, 0.0), Axis::X);
    let ray = Ray::new(Vec3::zero(), Vec3::new(0.0, 1.0, 1.0).unit());
    assert_eq!(None, wall.intersection(&ray));
}

#[test]
fn plane_behind_ray_misses() {
    let wall = Plane::new(Vec3::new(0.0, 0.0, -2.0), Axis::Z);
    let ray = Ray::new(Vec3::zero(), Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(None, wall.intersection(&ray));
}

#[test]
fn ray_leaving_anchor_does_not_hit_the_plane() {
    let floor = Plane::new(Vec3::new(0.0, -1.0, 0.0), Axis::Y);
    for direction in &[Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.3, 1.0, -0.2).unit()] {
        let ray = Ray::new(floor.anchor(), *direction);
        assert_eq!(None, floor.intersection(&ray));
    }
}

#[test]
fn plane_is_unbounded() {
    let wall = Plane::new(Vec3::zero(), Axis::Z);
    let ray = Ray::new(Vec3::new(1.0e6, -3.0e5, 10.0), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(10.0, wall.intersection(&ray).unwrap().t);
}

#[test]
fn axis_deserializes_lowercase() {
    let plane: Plane = serde_json::from_str(r#"{"anchor": {"x": 0, "y": 1, "z": 0}, "axis": "y"}"#).unwrap();
    assert_eq!(Axis::Y, plane.axis());
    assert_eq!(Vec3::new(0.0, 1.0, 0.0), plane.anchor());
}
