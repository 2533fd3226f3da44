//! 8-bit RGB colours and the channel arithmetic used by shading.

use image::{Pixel, Rgb};
use serde::{Deserialize, Deserializer};

pub type Color = Rgb<u8>;

pub const BLACK: Color = Rgb([0, 0, 0]);
pub const WHITE: Color = Rgb([255, 255, 255]);
pub const RED: Color = Rgb([255, 0, 0]);
pub const LIME: Color = Rgb([0, 255, 0]);
pub const BLUE: Color = Rgb([0, 0, 255]);
pub const YELLOW: Color = Rgb([255, 255, 0]);
pub const PINK: Color = Rgb([255, 192, 203]);
pub const PURPLE: Color = Rgb([128, 0, 128]);

/// Factor applied by [`darker`].
const DARKER: f64 = 0.7;

pub(crate) fn deserialize_rgb<'de, D>(de: D) -> Result<Rgb<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let (r, g, b) = Deserialize::deserialize(de)?;
    let rgb = Rgb([r, g, b]);

    Ok(rgb)
}

#[inline]
pub fn clamp(value: f64) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.max(0.0).min(255.0) as u8
    }
}

/// Channel-wise product of two colours, halved so that a lit surface does
/// not start out saturated.
pub fn multiply(a: Color, b: Color) -> Color {
    Rgb([
        clamp(a[0] as f64 * b[0] as f64 / 255.0 / 2.0),
        clamp(a[1] as f64 * b[1] as f64 / 255.0 / 2.0),
        clamp(a[2] as f64 * b[2] as f64 / 255.0 / 2.0),
    ])
}

/// Scales every channel by `factor + 1`.
pub fn brighten(color: Color, factor: f64) -> Color {
    color.map(|c| clamp(c as f64 * (factor + 1.0)))
}

/// Saturating channel-wise sum.
pub fn add(a: Color, b: Color) -> Color {
    Rgb([
        a[0].saturating_add(b[0]),
        a[1].saturating_add(b[1]),
        a[2].saturating_add(b[2]),
    ])
}

pub fn darker(color: Color) -> Color {
    color.map(|c| clamp(c as f64 * DARKER))
}

#[test]
fn clamp_is_idempotent() {
    for &v in &[-20.0, 0.0, 12.7, 254.9, 255.0, 1.0e9, std::f64::NAN] {
        let once = clamp(v);
        assert_eq!(once, clamp(once as f64));
    }
    assert_eq!(255, clamp(300.0));
    assert_eq!(0, clamp(-1.0));
}

#[test]
fn multiply_halves_product() {
    assert_eq!(Rgb([127, 0, 63]), multiply(WHITE, Rgb([255, 0, 127])));
    assert_eq!(BLACK, multiply(BLACK, WHITE));
}

#[test]
fn brighten_saturates() {
    assert_eq!(Rgb([200, 255, 20]), brighten(Rgb([100, 200, 10]), 1.0));
    assert_eq!(BLACK, brighten(Rgb([100, 200, 10]), -3.0));
}

#[test]
fn add_saturates() {
    assert_eq!(Rgb([255, 30, 255]), add(Rgb([200, 10, 255]), Rgb([100, 20, 1])));
}

#[test]
fn darker_matches_awt() {
    assert_eq!(Rgb([178, 178, 178]), darker(WHITE));
}
