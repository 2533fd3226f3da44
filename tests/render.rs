use image::Rgb;

use lumen::{
    color, Angle, Axis, Camera, Cone, Cube, Falloff, Geometry, Light, Line, Material, Plane, Ray, RenderConfig, Scene,
    Shape, Sphere, Tracer, Vec3,
};

/// Ray through pixel `(x, y)` of a `size` by `size` image, for the camera's
/// field of view.
fn pinhole(size: u32) -> impl Fn(u32, u32, &Camera) -> Ray<f64> + Sync {
    move |x, y, camera| {
        let half = (camera.fov() / 2.0).tan();
        let sx = (2.0 * (x as f64 + 0.5) / size as f64 - 1.0) * half;
        let sy = (1.0 - 2.0 * (y as f64 + 0.5) / size as f64) * half;
        let direction = Vec3::new(sx, sy, 1.0).rotate(camera.pitch(), camera.yaw()).unit();
        Ray::new(camera.position(), direction)
    }
}

fn scene() -> Scene {
    let camera = Camera::new(Vec3::new(0.0, 1.0, -8.0), Angle::Degrees(60.0));
    let mut scene = Scene::with_camera(camera);

    let floor = Material::checker(color::WHITE, Rgb([40, 40, 40]), 2.0).unwrap();
    scene.add_shape(Shape::new(Plane::new(Vec3::new(0.0, -1.0, 0.0), Axis::Y), floor));
    scene.add_shape(Shape::new(
        Sphere::new(Vec3::new(-2.0, 0.0, 0.0), 1.0).unwrap(),
        Material::sphere_pattern(color::RED, color::BLUE, 4.0).unwrap(),
    ));
    scene.add_shape(Shape::new(Cube::new(Vec3::new(2.0, 0.0, 0.0), 2.0).unwrap(), Material::cube_pattern()));
    scene.add_shape(Shape::new(
        Cone::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 1.0, 0.0), Angle::Degrees(30.0), 2.0).unwrap(),
        Material::basic(color::YELLOW),
    ));
    scene.add_shape(Shape::new(
        Line::new(Vec3::new(-3.0, 3.0, 0.0), Vec3::new(3.0, 3.0, 0.0)).unwrap(),
        Material::mirror(),
    ));
    scene.add_light(Light::white(Vec3::new(0.0, 10.0, -5.0)));
    scene.add_light(Light::new(Vec3::new(-6.0, 4.0, -2.0), Rgb([255, 200, 160])));
    scene
}

#[test]
fn render_produces_a_full_frame() {
    let scene = scene();
    let config = RenderConfig::default();

    let buffer = Tracer::new(&scene, &config).render(32, 32, pinhole(32)).unwrap();
    assert_eq!(32 * 32, buffer.len());

    // Top rows look at the sky, bottom rows at the floor.
    assert_eq!(config.background, buffer[0]);
    assert_ne!(config.background, buffer[32 * 31 + 16]);
}

#[test]
fn parallel_and_sequential_traces_agree() {
    let scene = scene();
    let config = RenderConfig {
        threads: Some(3),
        ..RenderConfig::default()
    };
    let tracer = Tracer::new(&scene, &config);
    let generate = pinhole(16);

    let buffer = tracer.render(16, 16, &generate).unwrap();
    for (n, pixel) in buffer.iter().enumerate() {
        let ray = generate((n % 16) as u32, (n / 16) as u32, scene.current_camera());
        assert_eq!(tracer.trace(&ray), *pixel);
    }
}

#[test]
fn shading_never_leaves_channel_range() {
    let mut scene = scene();
    for i in 0..50 {
        scene.add_light(Light::white(Vec3::new(i as f64 * 0.2 - 5.0, 6.0, -6.0)));
    }
    let config = RenderConfig::default();

    let buffer = Tracer::new(&scene, &config).render(8, 8, pinhole(8)).unwrap();
    for pixel in buffer {
        for &c in pixel.0.iter() {
            assert_eq!(c, color::clamp(c as f64));
        }
    }
}

#[test]
fn inverse_square_falloff_is_never_brighter() {
    let scene = scene();
    let literal = RenderConfig::default();
    let mut inverse = RenderConfig::default();
    inverse.shading.falloff = Falloff::InverseSquare;

    let ray = Ray::towards(scene.current_camera().position(), Vec3::new(-2.0, 0.0, -1.0)).unwrap();
    let bright = Tracer::new(&scene, &literal).trace(&ray);
    let dim = Tracer::new(&scene, &inverse).trace(&ray);
    for i in 0..3 {
        assert!(dim[i] <= bright[i]);
    }
}

fn assert_rays_miss(geometry: &dyn Geometry, point: Vec3<f64>, directions: &[Vec3<f64>]) {
    for direction in directions {
        let ray = Ray::new(point, *direction);
        assert!(
            geometry.intersection(&ray).is_none(),
            "{:?} hit from {:?} along {:?}",
            geometry,
            point,
            direction
        );
    }
}

#[test]
fn rays_leaving_characteristic_points_miss() {
    let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 2.0).unwrap();
    for point in sphere.points() {
        assert_rays_miss(&sphere, point, &[Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, -1.0, 0.5).unit()]);
    }

    let cube = Cube::new(Vec3::new(-1.0, 0.0, 4.0), 3.0).unwrap();
    for point in cube.points() {
        let offset = point - cube.anchor();
        let diagonal = offset.unit();
        let sideways = Vec3::new(offset.x.signum(), 0.0, 0.0);
        assert_rays_miss(&cube, point, &[diagonal, sideways]);
    }

    let cone = Cone::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Angle::Degrees(30.0), 2.0).unwrap();
    let points = cone.points();
    assert_eq!(2, points.len());
    assert_rays_miss(&cone, points[0], &[cone.axis().inverse(), Vec3::new(1.0, -1.0, 0.0).unit()]);
    assert_rays_miss(&cone, points[1], &[cone.axis(), Vec3::new(0.1, 1.0, 0.0).unit()]);

    let plane = Plane::new(Vec3::new(0.0, -1.0, 0.0), Axis::Y);
    for point in plane.points() {
        assert_rays_miss(
            &plane,
            point,
            &[
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(0.3, 1.0, -0.2).unit(),
                Vec3::new(0.0, -1.0, 0.0),
            ],
        );
    }

    let line = Line::new(Vec3::new(-3.0, 3.0, 0.0), Vec3::new(3.0, 3.0, 0.0)).unwrap();
    let points = line.points();
    assert_eq!(2, points.len());
    let across = [Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -1.0)];
    assert_rays_miss(&line, points[0], &across);
    assert_rays_miss(&line, points[0], &[line.direction().inverse()]);
    assert_rays_miss(&line, points[1], &across);
    assert_rays_miss(&line, points[1], &[line.direction()]);
}

#[test]
fn camera_cursor_switches_viewpoint() {
    let mut scene = scene();
    let mut above = Camera::new(Vec3::new(0.0, 20.0, 0.0), Angle::Degrees(60.0));
    above.set_pitch(Angle::Degrees(90.0));
    scene.add_camera(above);

    assert!(scene.next_camera().is_some());
    assert!(scene.next_camera().is_none());

    let config = RenderConfig::default();
    let buffer = Tracer::new(&scene, &config).render(4, 4, pinhole(4)).unwrap();
    assert!(buffer.iter().all(|pixel| *pixel != config.background));
}
