use crate::{geometry::Angle, vec3::Vec3};

/// Viewpoint handed to the ray generator.
///
/// Angles are stored in radians. With zero pitch and yaw the camera looks
/// down `+Z`.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq)]
pub struct Camera {
    position: Vec3<f64>,
    #[serde(default = "default_fov", deserialize_with = "deserialize_angle")]
    fov: f64,
    #[serde(default, deserialize_with = "deserialize_angle")]
    pitch: f64,
    #[serde(default, deserialize_with = "deserialize_angle")]
    yaw: f64,
}

fn default_fov() -> f64 {
    40f64.to_radians()
}

fn deserialize_angle<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let angle: Angle = serde::Deserialize::deserialize(de)?;
    Ok(angle.radians())
}

impl Camera {
    pub fn new<A: Into<Angle>>(position: Vec3<f64>, fov: A) -> Self {
        Self {
            position,
            fov: fov.into().radians(),
            pitch: 0.0,
            yaw: 0.0,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3<f64> {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3<f64>) {
        self.position = position;
    }

    pub fn translate(&mut self, offset: Vec3<f64>) {
        self.position = self.position + offset;
    }

    #[inline]
    pub fn fov(&self) -> f64 {
        self.fov
    }

    pub fn set_fov<A: Into<Angle>>(&mut self, fov: A) {
        self.fov = fov.into().radians();
    }

    #[inline]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn set_pitch<A: Into<Angle>>(&mut self, pitch: A) {
        self.pitch = pitch.into().radians();
    }

    #[inline]
    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn set_yaw<A: Into<Angle>>(&mut self, yaw: A) {
        self.yaw = yaw.into().radians();
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3<f64> {
        Vec3::new(0.0, 0.0, 1.0).rotate(self.pitch, self.yaw)
    }
}

#[test]
fn translate_moves_position() {
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, -2.0), Angle::Degrees(40.0));
    camera.translate(Vec3::new(0.5, 0.0, 0.05));
    camera.translate(Vec3::new(0.5, 1.0, 0.0));
    crate::vec3::assert_close(Vec3::new(1.0, 1.0, -1.95), camera.position());

    camera.set_position(Vec3::zero());
    assert_eq!(Vec3::zero(), camera.position());
}

#[test]
fn forward_follows_yaw() {
    let mut camera = Camera::new(Vec3::zero(), 1.0);
    crate::vec3::assert_close(Vec3::new(0.0, 0.0, 1.0), camera.forward());

    camera.set_yaw(Angle::Degrees(-90.0));
    crate::vec3::assert_close(Vec3::new(-1.0, 0.0, 0.0), camera.forward());
}

#[test]
fn camera_deserializes_degrees() {
    let camera: Camera = serde_json::from_str(r#"{"position": {"x": 0, "y": 1, "z": -5}, "pitch": "-10°"}"#).unwrap();
    assert!((camera.fov() - 40f64.to_radians()).abs() < 1e-12);
    assert!((camera.pitch() + 10f64.to_radians()).abs() < 1e-12);
    assert_eq!(0.0, camera.yaw());
}
