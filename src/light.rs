use image::Rgb;

use crate::{color, vec3::Vec3};

/// Point light.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct Light {
    anchor: Vec3<f64>,
    #[serde(deserialize_with = "color::deserialize_rgb", default = "white")]
    color: Rgb<u8>,
}

fn white() -> Rgb<u8> {
    color::WHITE
}

impl Light {
    pub fn new(anchor: Vec3<f64>, color: Rgb<u8>) -> Self {
        Self { anchor, color }
    }

    pub fn white(anchor: Vec3<f64>) -> Self {
        Self::new(anchor, color::WHITE)
    }

    #[inline]
    pub fn anchor(&self) -> Vec3<f64> {
        self.anchor
    }

    #[inline]
    pub fn color(&self) -> Rgb<u8> {
        self.color
    }
}

#[test]
fn color_defaults_to_white() {
    let light: Light = serde_json::from_str(r#"{"anchor": {"x": 1, "y": 2, "z": 3}}"#).unwrap();
    assert_eq!(color::WHITE, light.color());
    assert_eq!(Vec3::new(1.0, 2.0, 3.0), light.anchor());

    let light: Light = serde_json::from_str(r#"{"anchor": {"x": 0, "y": 0, "z": 0}, "color": [10, 20, 30]}"#).unwrap();
    assert_eq!(Rgb([10, 20, 30]), light.color());
}
