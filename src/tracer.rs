use std::time::Instant;

use image::Rgb;
use log::info;
use rayon::prelude::*;

use crate::{camera::Camera, config::RenderConfig, error::Result, ray::Ray, scene::Scene};

/// Turns rays into colours against a read-only scene.
pub struct Tracer<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        Self { scene, config }
    }

    pub fn trace(&self, ray: &Ray<f64>) -> Rgb<u8> {
        match self.scene.closest_intersection(ray) {
            Some(hit) => hit.shape.material.shade(
                &hit,
                self.scene.lights(),
                self.scene.shapes(),
                &self.config.shading,
            ),
            None => self.config.background,
        }
    }

    /// Traces one ray per pixel, in parallel, and returns the colours row by
    /// row.
    ///
    /// `generate` builds the ray for pixel `(x, y)` as seen from the scene's
    /// current camera.
    pub fn render<F>(&self, width: u32, height: u32, generate: F) -> Result<Vec<Rgb<u8>>>
    where
        F: Fn(u32, u32, &Camera) -> Ray<f64> + Sync,
    {
        info!("Start drawing {}x{} ...", width, height);
        let now = Instant::now();

        let camera = self.scene.current_camera();
        let pixels = (width as usize) * (height as usize);
        let draw = || -> Vec<Rgb<u8>> {
            (0..pixels)
                .into_par_iter()
                .map(|n| {
                    let x = (n % width as usize) as u32;
                    let y = (n / width as usize) as u32;
                    self.trace(&generate(x, y, camera))
                })
                .collect()
        };

        let buffer = match self.config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new().num_threads(threads).build()?.install(draw),
            None => draw(),
        };

        info!("Finished, elapsed: {:.3} ms", now.elapsed().as_millis() as f64);
        Ok(buffer)
    }
}
