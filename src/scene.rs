use log::debug;

use crate::{
    camera::Camera,
    error::{Error, Result},
    geometry::Shape,
    intersection::RayHit,
    light::Light,
    ray::Ray,
};

/// Cameras, shapes and lights of one render.
///
/// There is always at least one camera, and the camera cursor always points
/// at one of them.
#[derive(Debug)]
pub struct Scene {
    cameras: Vec<Camera>,
    shapes: Vec<Shape>,
    lights: Vec<Light>,
    current_camera: usize,
}

impl Scene {
    pub fn new(cameras: Vec<Camera>, shapes: Vec<Shape>, lights: Vec<Light>) -> Result<Self> {
        if cameras.is_empty() {
            return Err(Error::NoCamera);
        }

        debug!(
            "scene with {} cameras, {} shapes, {} lights",
            cameras.len(),
            shapes.len(),
            lights.len()
        );

        Ok(Self {
            cameras,
            shapes,
            lights,
            current_camera: 0,
        })
    }

    pub fn with_camera(camera: Camera) -> Self {
        Self {
            cameras: vec![camera],
            shapes: Vec::new(),
            lights: Vec::new(),
            current_camera: 0,
        }
    }

    pub fn add_camera(&mut self, camera: Camera) {
        self.cameras.push(camera);
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    #[inline]
    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    #[inline]
    pub fn current_camera_index(&self) -> usize {
        self.current_camera
    }

    pub fn current_camera(&self) -> &Camera {
        &self.cameras[self.current_camera]
    }

    pub fn current_camera_mut(&mut self) -> &mut Camera {
        &mut self.cameras[self.current_camera]
    }

    /// Moves the cursor to the next camera and returns it.
    ///
    /// On the last camera the cursor stays put and `None` is returned.
    pub fn next_camera(&mut self) -> Option<&Camera> {
        if self.current_camera + 1 >= self.cameras.len() {
            return None;
        }

        self.current_camera += 1;
        Some(&self.cameras[self.current_camera])
    }

    pub fn select_camera(&mut self, index: usize) -> Result<&Camera> {
        if index >= self.cameras.len() {
            return Err(Error::CameraIndex {
                index,
                len: self.cameras.len(),
            });
        }

        self.current_camera = index;
        Ok(&self.cameras[index])
    }

    /// Nearest hit over every shape in the scene.
    pub fn closest_intersection(&self, ray: &Ray<f64>) -> Option<RayHit> {
        let mut t = std::f64::INFINITY;
        let mut closest = None;

        for (index, shape) in self.shapes.iter().enumerate() {
            if let Some(intersection) = shape.intersection(ray) {
                if intersection.t < t {
                    t = intersection.t;
                    closest = Some(RayHit::new(intersection, shape, index));
                }
            }
        }

        closest
    }
}
