//! Ray-tracing geometry and shading engine.
//!
//! Shapes are tested against a ray one by one, the nearest hit is shaded by
//! the struck shape's material from the scene's point lights, with shadow
//! rays deciding which lights reach the point. Ray generation and image
//! output are left to the caller.

#[macro_use]
extern crate serde_derive;

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
mod intersection;
pub mod light;
pub mod logger;
pub mod material;
mod ray;
pub mod scene;
mod tracer;
mod vec3;

pub use crate::camera::Camera;
pub use crate::color::Color;
pub use crate::config::{Falloff, RenderConfig, ShadingOptions};
pub use crate::error::{Error, Result};
pub use crate::geometry::{Angle, Axis, Cone, Cube, Geometry, Line, Plane, Shape, Sphere};
pub use crate::intersection::{Intersection, RayHit};
pub use crate::light::Light;
pub use crate::material::{Material, Pattern};
pub use crate::ray::Ray;
pub use crate::scene::Scene;
pub use crate::tracer::Tracer;
pub use crate::vec3::Vec3;
