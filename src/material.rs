use std::{f64::consts::PI, fmt, sync::Arc};

use image::Rgb;
use log::trace;

use crate::{
    color::{self, Color},
    config::{Falloff, ShadingOptions},
    error::{Error, Result},
    geometry::{Face, Geometry, Shape},
    intersection::RayHit,
    light::Light,
    ray::Ray,
    vec3::Vec3,
};

/// Colours of the cube pattern in `{x+, x-, y+, y-, z+, z-}` order.
const FACE_COLORS: [Color; 6] = [
    color::RED,
    color::LIME,
    color::BLUE,
    color::YELLOW,
    color::PINK,
    color::PURPLE,
];

/// Per-point colouring supplied by the caller for a single shape.
pub type ColorFn = Arc<dyn Fn(&Vec3<f64>) -> Color + Send + Sync>;

/// How a material picks the base colour at a point.
#[derive(Clone)]
pub enum Pattern {
    Basic,
    /// Alternates `color` and `color2` on an axis-aligned grid.
    Checker,
    /// Alternates `color` and `color2` on a latitude/longitude grid around
    /// the shape's anchor.
    Sphere,
    /// One fixed colour per cube face.
    Cube,
    Mirror,
    Custom(ColorFn),
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Pattern::Basic => f.write_str("Basic"),
            Pattern::Checker => f.write_str("Checker"),
            Pattern::Sphere => f.write_str("Sphere"),
            Pattern::Cube => f.write_str("Cube"),
            Pattern::Mirror => f.write_str("Mirror"),
            Pattern::Custom(..) => f.write_str("Custom"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Material {
    pattern: Pattern,
    color: Color,
    color2: Color,
    gridsize: f64,
    ambient: f64,
    diffuse: f64,
    specular: f64,
    shininess: f64,
    reflectiveness: f64,
}

impl Default for Material {
    fn default() -> Self {
        Material::basic(color::WHITE)
    }
}

impl Material {
    fn with_pattern(pattern: Pattern, color: Color, color2: Color, gridsize: f64) -> Self {
        Self {
            pattern,
            color,
            color2,
            gridsize,
            ambient: 0.1,
            diffuse: 0.1,
            specular: 0.1,
            shininess: 32.0,
            reflectiveness: 0.0,
        }
    }

    pub fn basic(color: Color) -> Self {
        Self::with_pattern(Pattern::Basic, color, color::darker(color), 2.0)
    }

    pub fn checker(color: Color, color2: Color, gridsize: f64) -> Result<Self> {
        check_gridsize(gridsize)?;
        Ok(Self::with_pattern(Pattern::Checker, color, color2, gridsize))
    }

    pub fn sphere_pattern(color: Color, color2: Color, gridsize: f64) -> Result<Self> {
        check_gridsize(gridsize)?;
        Ok(Self::with_pattern(Pattern::Sphere, color, color2, gridsize))
    }

    pub fn cube_pattern() -> Self {
        Self::with_pattern(Pattern::Cube, color::WHITE, color::WHITE, 2.0)
    }

    pub fn mirror() -> Self {
        Self::with_pattern(Pattern::Mirror, color::WHITE, color::WHITE, 2.0).with_reflectiveness(1.0)
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Vec3<f64>) -> Color + Send + Sync + 'static,
    {
        Self::with_pattern(Pattern::Custom(Arc::new(f)), color::WHITE, color::WHITE, 2.0)
    }

    pub fn with_reflectiveness(mut self, reflectiveness: f64) -> Self {
        self.reflectiveness = reflectiveness.max(0.0).min(1.0);
        self
    }

    pub fn with_ambient(mut self, ambient: f64) -> Self {
        self.ambient = ambient;
        self
    }

    #[inline]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn color2(&self) -> Color {
        self.color2
    }

    #[inline]
    pub fn gridsize(&self) -> f64 {
        self.gridsize
    }

    #[inline]
    pub fn ambient(&self) -> f64 {
        self.ambient
    }

    #[inline]
    pub fn diffuse(&self) -> f64 {
        self.diffuse
    }

    #[inline]
    pub fn specular(&self) -> f64 {
        self.specular
    }

    #[inline]
    pub fn shininess(&self) -> f64 {
        self.shininess
    }

    /// Share of a reflected contribution, in `[0, 1]`. Carried for the
    /// compositing layer, not used by [`Material::shade`].
    #[inline]
    pub fn reflectiveness(&self) -> f64 {
        self.reflectiveness
    }

    /// Base colour at `point` on `geometry`.
    pub fn color_at(&self, point: &Vec3<f64>, geometry: &dyn Geometry) -> Color {
        match &self.pattern {
            Pattern::Basic | Pattern::Mirror => self.color,
            Pattern::Checker => {
                let cell = |c: f64| (c / self.gridsize).floor() as i64;
                self.alternate(cell(point.x) + cell(point.y) + cell(point.z))
            }
            Pattern::Sphere => {
                let offset = *point - geometry.anchor();
                let radius = offset.len();
                if radius < crate::vec3::EPSILON {
                    return self.color;
                }

                let mut azimuth = offset.z.atan2(offset.x);
                if azimuth < 0.0 {
                    azimuth += 2.0 * PI;
                }
                let polar = (offset.y / radius).max(-1.0).min(1.0).acos();

                let cell = |angle: f64| (angle * self.gridsize / PI).floor() as i64;
                self.alternate(cell(azimuth) + cell(polar))
            }
            Pattern::Cube => FACE_COLORS[Face::of(&geometry.normal(point)).0],
            Pattern::Custom(f) => (**f)(point),
        }
    }

    fn alternate(&self, index: i64) -> Color {
        if index.rem_euclid(2) == 0 {
            self.color
        } else {
            self.color2
        }
    }

    /// Colour of `hit` lit by `lights`, with every shape in `shapes` able to
    /// cast a shadow.
    ///
    /// Each light adds its own contribution and the sum saturates per channel.
    pub fn shade(&self, hit: &RayHit, lights: &[Light], shapes: &[Shape], options: &ShadingOptions) -> Color {
        let base = self.color_at(&hit.point, hit.shape.geometry.as_ref());
        if !options.enabled {
            return base;
        }

        let normal = hit.normal();

        lights.iter().fold(color::BLACK, |total, light| {
            let shadow_ray = match Ray::towards(hit.point, light.anchor()) {
                Ok(ray) => ray,
                Err(..) => {
                    trace!("light at {:?} coincides with the hit point", light.anchor());
                    return total;
                }
            };
            let biased = Ray::new(shadow_ray.offset(options.shadow_bias), *shadow_ray.direction());

            let contribution = if self.in_shadow(&biased, light, shapes) {
                color::brighten(Rgb([1, 1, 1]), self.ambient * 2.0)
            } else {
                let distance = hit.point.distance(&light.anchor());
                let facing = normal.dot(shadow_ray.direction());
                let brightness = match options.falloff {
                    // Evaluated left to right, so the distance terms cancel.
                    Falloff::Literal => facing / distance * distance,
                    Falloff::InverseSquare => facing / (distance * distance),
                };

                let shaded = color::multiply(base, light.color());
                let shaded = color::brighten(shaded, brightness);
                color::brighten(shaded, self.ambient)
            };

            color::add(total, contribution)
        })
    }

    /// Whether any of `shapes` blocks `ray` before it reaches `light`.
    pub fn in_shadow(&self, ray: &Ray<f64>, light: &Light, shapes: &[Shape]) -> bool {
        let to_light = light.anchor().distance(&ray.origin());

        shapes.iter().any(|shape| {
            shape
                .intersection(ray)
                .map(|intersection| intersection.point.distance(&ray.origin()) < to_light)
                .unwrap_or(false)
        })
    }
}

fn check_gridsize(gridsize: f64) -> Result<()> {
    if gridsize > 0.0 && gridsize.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid("material", format!("gridsize must be positive, got {}", gridsize)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{Axis, Cube, Plane, Sphere};
    use crate::intersection::Intersection;

    fn options() -> ShadingOptions {
        ShadingOptions::default()
    }

    fn sphere(center: Vec3<f64>, radius: f64, material: Material) -> Shape {
        Shape::new(Sphere::new(center, radius).unwrap(), material)
    }

    fn hit_on<'a>(shape: &'a Shape, point: Vec3<f64>) -> RayHit<'a> {
        RayHit::new(Intersection::new(1.0, point), shape, 0)
    }

    #[test]
    fn basic_color_is_constant() {
        let material = Material::basic(color::RED);
        let plane = Plane::new(Vec3::zero(), Axis::Y);
        for p in &[Vec3::zero(), Vec3::new(13.0, 0.0, -7.5)] {
            assert_eq!(color::RED, material.color_at(p, &plane));
        }
    }

    #[test]
    fn checker_alternates_between_cells() {
        let material = Material::checker(color::WHITE, color::BLACK, 2.0).unwrap();
        let plane = Plane::new(Vec3::zero(), Axis::Y);

        assert_eq!(color::WHITE, material.color_at(&Vec3::new(0.5, 0.0, 0.5), &plane));
        assert_eq!(color::BLACK, material.color_at(&Vec3::new(2.5, 0.0, 0.5), &plane));
        assert_eq!(color::BLACK, material.color_at(&Vec3::new(-0.5, 0.0, 0.5), &plane));
        assert_eq!(color::WHITE, material.color_at(&Vec3::new(-0.5, 0.0, -0.5), &plane));
    }

    #[test]
    fn sphere_pattern_alternates_around_anchor() {
        let material = Material::sphere_pattern(color::WHITE, color::BLACK, 2.0).unwrap();
        let geometry = Sphere::new(Vec3::new(5.0, 0.0, 0.0), 1.0).unwrap();

        assert_eq!(color::WHITE, material.color_at(&Vec3::new(5.5, 0.5, 0.1), &geometry));
        assert_eq!(color::BLACK, material.color_at(&Vec3::new(4.5, 0.5, 0.1), &geometry));
    }

    #[test]
    fn cube_pattern_colors_each_face() {
        let material = Material::cube_pattern();
        let cube = Cube::new(Vec3::zero(), 2.0).unwrap();

        assert_eq!(color::RED, material.color_at(&Vec3::new(1.0, 0.2, 0.0), &cube));
        assert_eq!(color::LIME, material.color_at(&Vec3::new(-1.0, 0.2, 0.0), &cube));
        assert_eq!(color::YELLOW, material.color_at(&Vec3::new(0.0, -1.0, 0.3), &cube));
        assert_eq!(color::PURPLE, material.color_at(&Vec3::new(0.1, 0.0, -1.0), &cube));
    }

    #[test]
    fn custom_pattern_calls_back() {
        let material = Material::custom(|p| if p.x > 0.0 { color::BLUE } else { color::PINK });
        let plane = Plane::new(Vec3::zero(), Axis::Y);
        assert_eq!(color::BLUE, material.color_at(&Vec3::new(1.0, 0.0, 0.0), &plane));
        assert_eq!(color::PINK, material.color_at(&Vec3::new(-1.0, 0.0, 0.0), &plane));
    }

    #[test]
    fn mirror_is_fully_reflective() {
        assert_eq!(1.0, Material::mirror().reflectiveness());
        assert_eq!(0.0, Material::basic(color::RED).reflectiveness());
        assert_eq!(1.0, Material::basic(color::RED).with_reflectiveness(4.0).reflectiveness());
    }

    #[test]
    fn occluder_between_point_and_light_casts_shadow() {
        let occluder = sphere(Vec3::new(0.0, 5.0, 0.0), 1.0, Material::default());
        let light = Light::white(Vec3::new(0.0, 10.0, 0.0));
        let ray = Ray::towards(Vec3::zero(), light.anchor()).unwrap();

        assert!(Material::default().in_shadow(&ray, &light, &[occluder]));
    }

    #[test]
    fn shapes_beyond_light_cast_no_shadow() {
        let beyond = sphere(Vec3::new(0.0, 20.0, 0.0), 1.0, Material::default());
        let aside = sphere(Vec3::new(5.0, 5.0, 0.0), 1.0, Material::default());
        let light = Light::white(Vec3::new(0.0, 10.0, 0.0));
        let ray = Ray::towards(Vec3::zero(), light.anchor()).unwrap();

        assert!(!Material::default().in_shadow(&ray, &light, &[beyond, aside]));
        assert!(!Material::default().in_shadow(&ray, &light, &[]));
    }

    #[test]
    fn no_lights_shade_black() {
        let shape = sphere(Vec3::zero(), 1.0, Material::basic(color::WHITE));
        let hit = hit_on(&shape, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(color::BLACK, shape.material.shade(&hit, &[], &[], &options()));
    }

    #[test]
    fn lit_point_uses_literal_falloff() {
        let shape = sphere(Vec3::zero(), 1.0, Material::basic(color::WHITE));
        let hit = hit_on(&shape, Vec3::new(0.0, 1.0, 0.0));
        let light = Light::white(Vec3::new(0.0, 5.0, 0.0));

        // Half white, doubled by a head-on light, then saturated by ambient.
        let color = shape.material.shade(&hit, &[light], std::slice::from_ref(&shape), &options());
        assert_eq!(Rgb([255, 255, 255]), color);

        let dim = Light::new(Vec3::new(0.0, 5.0, 0.0), Rgb([100, 100, 100]));
        let color = shape.material.shade(&hit, &[dim], std::slice::from_ref(&shape), &options());
        assert_eq!(Rgb([110, 110, 110]), color);
    }

    #[test]
    fn inverse_square_falloff_dims_distant_lights() {
        let shape = sphere(Vec3::zero(), 1.0, Material::basic(color::WHITE));
        let hit = hit_on(&shape, Vec3::new(0.0, 1.0, 0.0));
        let light = Light::new(Vec3::new(0.0, 11.0, 0.0), Rgb([100, 100, 100]));
        let options = ShadingOptions {
            falloff: Falloff::InverseSquare,
            ..ShadingOptions::default()
        };

        let color = shape.material.shade(&hit, &[light], std::slice::from_ref(&shape), &options);
        assert_eq!(Rgb([55, 55, 55]), color);
    }

    #[test]
    fn shadowed_point_gets_ambient_only() {
        let shape = sphere(Vec3::zero(), 1.0, Material::basic(color::WHITE));
        let blocker = sphere(Vec3::new(0.0, 3.0, 0.0), 0.5, Material::default());
        let hit = hit_on(&shape, Vec3::new(0.0, 1.0, 0.0));
        let light = Light::white(Vec3::new(0.0, 5.0, 0.0));

        let color = shape.material.shade(&hit, &[light], &[blocker], &options());
        assert_eq!(Rgb([1, 1, 1]), color);
    }

    #[test]
    fn many_lights_saturate() {
        let shape = sphere(Vec3::zero(), 1.0, Material::basic(Rgb([200, 120, 40])));
        let hit = hit_on(&shape, Vec3::new(0.0, 1.0, 0.0));
        let lights: Vec<Light> = (0..16)
            .map(|i| Light::white(Vec3::new(i as f64 * 0.1, 4.0, 0.0)))
            .collect();

        let color = shape.material.shade(&hit, &lights, std::slice::from_ref(&shape), &options());
        for &c in color.0.iter() {
            assert_eq!(c, color::clamp(c as f64));
        }
        assert_eq!(255, color[0]);
    }

    #[test]
    fn light_at_hit_point_contributes_nothing() {
        let shape = sphere(Vec3::zero(), 1.0, Material::basic(color::WHITE));
        let hit = hit_on(&shape, Vec3::new(0.0, 1.0, 0.0));
        let light = Light::white(hit.point);
        assert_eq!(color::BLACK, shape.material.shade(&hit, &[light], &[], &options()));
    }

    #[test]
    fn disabled_shading_returns_base_color() {
        let shape = sphere(Vec3::zero(), 1.0, Material::basic(color::BLUE));
        let hit = hit_on(&shape, Vec3::new(0.0, 1.0, 0.0));
        let options = ShadingOptions {
            enabled: false,
            ..ShadingOptions::default()
        };
        assert_eq!(color::BLUE, shape.material.shade(&hit, &[], &[], &options));
    }

    #[test]
    fn zero_gridsize_is_rejected() {
        assert!(Material::checker(color::WHITE, color::BLACK, 0.0).is_err());
        assert!(Material::sphere_pattern(color::WHITE, color::BLACK, -1.0).is_err());
    }
}
