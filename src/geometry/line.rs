use crate::{
    error::{Error, Result},
    geometry::{Geometry, HIT_EPSILON},
    vec3::Vec3,
    Intersection, Ray,
};

/// One-dimensional primitive starting at `anchor` and running through
/// `second_anchor`.
///
/// A line is hit only by rays that actually meet it, which in practice means
/// rays generated to do so.
#[derive(Copy, Clone, Debug)]
pub struct Line {
    anchor: Vec3<f64>,
    second_anchor: Vec3<f64>,
    direction: Vec3<f64>,
}

impl Line {
    pub fn new(anchor: Vec3<f64>, second_anchor: Vec3<f64>) -> Result<Self> {
        let direction = (second_anchor - anchor)
            .try_unit()
            .ok_or_else(|| Error::invalid("line", "end points must differ"))?;

        Ok(Self {
            anchor,
            second_anchor,
            direction,
        })
    }

    #[inline]
    pub fn direction(&self) -> Vec3<f64> {
        self.direction
    }

    #[inline]
    pub fn second_anchor(&self) -> Vec3<f64> {
        self.second_anchor
    }

    pub fn to_ray(&self) -> Ray<f64> {
        Ray::new(self.anchor, self.direction)
    }
}

impl Geometry for Line {
    fn intersection(&self, ray: &Ray<f64>) -> Option<Intersection> {
        let (t, _) = ray.closest_approach(&self.to_ray())?;
        if t <= HIT_EPSILON {
            return None;
        }

        Some(Intersection::new(t, ray.offset(t)))
    }

    fn normal(&self, point: &Vec3<f64>) -> Vec3<f64> {
        point
            .inverse()
            .try_unit()
            .unwrap_or_else(|| self.direction.perpendicular())
    }

    fn anchor(&self) -> Vec3<f64> {
        self.anchor
    }

    fn points(&self) -> Vec<Vec3<f64>> {
        vec![self.anchor, self.second_anchor]
    }
}

#[test]
fn ray_crossing_line_hits() {
    let line = Line::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).unwrap();
    let ray = Ray::new(Vec3::new(0.5, 0.0, 4.0), Vec3::new(0.0, 0.0, -1.0));

    let hit = line.intersection(&ray).unwrap();
    crate::vec3::assert_close(Vec3::new(0.5, 0.0, 0.0), hit.point);
    assert!((hit.t - 4.0).abs() < 1e-9);
}

#[test]
fn ray_passing_line_misses() {
    let line = Line::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).unwrap();
    let ray = Ray::new(Vec3::new(0.5, 0.1, 4.0), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(None, line.intersection(&ray));
}

#[test]
fn rays_leaving_end_points_along_the_line_miss() {
    let line = Line::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 3.0, 0.0)).unwrap();
    for point in line.points() {
        let ray = Ray::new(point, line.direction().inverse());
        assert_eq!(None, line.intersection(&ray));
    }
}

#[test]
fn rays_leaving_end_points_sideways_miss() {
    let line = Line::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 3.0, 0.0)).unwrap();
    for point in line.points() {
        for direction in &[Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)] {
            let ray = Ray::new(point, *direction);
            assert_eq!(None, line.intersection(&ray));
        }
    }
}

#[test]
fn normal_is_unit_even_at_origin() {
    let line = Line::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).unwrap();
    let normal = line.normal(&Vec3::zero());
    assert!((normal.len() - 1.0).abs() < 1e-12);
    assert!(normal.dot(&line.direction()).abs() < 1e-12);
}

#[test]
fn coincident_end_points_are_rejected() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    assert!(Line::new(p, p).is_err());
}
