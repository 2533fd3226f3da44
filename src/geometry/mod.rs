use std::fmt::Debug;

use serde::{de, Deserialize, Deserializer};

use crate::{intersection::Intersection, material::Material, ray::Ray, vec3::Vec3};

mod cone;
mod cube;
mod line;
mod plane;
mod sphere;

pub use self::cone::Cone;
pub use self::cube::{Cube, Face};
pub use self::line::Line;
pub use self::plane::Plane;
pub use self::sphere::Sphere;

/// Ray direction components below this are treated as parallel to a face.
pub(crate) const PARALLEL_EPSILON: f64 = 1e-6;

/// Hits this close to the ray origin are the origin itself and never count.
pub(crate) const HIT_EPSILON: f64 = 1e-9;

/// Analytic surface that can be hit by a ray.
pub trait Geometry: Debug + Send + Sync {
    /// Nearest intersection strictly ahead of the origin (`t > HIT_EPSILON`), if any.
    fn intersection(&self, ray: &Ray<f64>) -> Option<Intersection>;

    /// Outward unit normal at a point on the surface.
    ///
    /// Only meaningful for points returned by [`Geometry::intersection`].
    fn normal(&self, point: &Vec3<f64>) -> Vec3<f64>;

    /// The point defining the geometry's position.
    fn anchor(&self) -> Vec3<f64>;

    /// Characteristic points of the geometry.
    fn points(&self) -> Vec<Vec3<f64>>;
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// Angle as given by the caller; stored as radians once converted.
///
/// Deserializes from a bare number (radians) or a string with a degree
/// suffix such as `"45°"` or `"45deg"`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Angle {
    Radians(f64),
    Degrees(f64),
}

impl Angle {
    #[inline]
    pub fn radians(self) -> f64 {
        match self {
            Angle::Radians(r) => r,
            Angle::Degrees(d) => d.to_radians(),
        }
    }
}

impl From<f64> for Angle {
    fn from(radians: f64) -> Self {
        Angle::Radians(radians)
    }
}

impl<'de> Deserialize<'de> for Angle {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(de)? {
            Raw::Number(r) => Ok(Angle::Radians(r)),
            Raw::Text(s) => {
                let s = s.trim();
                let (value, degrees) = match s.strip_suffix('°').or_else(|| s.strip_suffix("deg")) {
                    Some(value) => (value, true),
                    None => (s, false),
                };
                let value: f64 = value.trim().parse().map_err(de::Error::custom)?;
                Ok(if degrees {
                    Angle::Degrees(value)
                } else {
                    Angle::Radians(value)
                })
            }
        }
    }
}

/// A geometry together with the material it exclusively owns.
#[derive(Debug)]
pub struct Shape {
    pub geometry: Box<dyn Geometry>,
    pub material: Material,
}

impl Shape {
    pub fn new<G: Geometry + 'static>(geometry: G, material: Material) -> Self {
        Self {
            geometry: Box::new(geometry),
            material,
        }
    }

    #[inline]
    pub fn intersection(&self, ray: &Ray<f64>) -> Option<Intersection> {
        self.geometry.intersection(ray)
    }
}

#[test]
fn angle_parses_degree_suffix() {
    let angle: Angle = serde_json::from_str("\"90°\"").unwrap();
    assert_eq!(Angle::Degrees(90.0), angle);
    assert!((angle.radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

    let angle: Angle = serde_json::from_str("\"45 deg\"").unwrap();
    assert_eq!(Angle::Degrees(45.0), angle);
}

#[test]
fn angle_defaults_to_radians() {
    let angle: Angle = serde_json::from_str("0.5").unwrap();
    assert_eq!(0.5, angle.radians());

    let angle: Angle = serde_json::from_str("\"0.25\"").unwrap();
    assert_eq!(Angle::Radians(0.25), angle);
}

#[test]
fn angle_rejects_garbage() {
    assert!(serde_json::from_str::<Angle>("\"wide\"").is_err());
}
