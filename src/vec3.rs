use std::ops::{Add, Mul, Neg, Sub};

use crate::geometry::Axis;

/// Lengths below this are treated as zero when normalizing.
pub const EPSILON: f64 = 1e-12;

#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Vec3<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Copy> Vec3<T> {
    #[inline]
    pub fn component(&self, axis: Axis) -> T {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl<T: Copy + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn scale(&self, factor: T) -> Vec3<T> {
        Vec3 {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

impl<T: Copy + Add<Output = T> + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn dot(&self, other: &Vec3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Copy + Sub<Output = T> + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn cross(&self, other: &Vec3<T>) -> Vec3<T> {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl Vec3<f64> {
    #[inline]
    pub fn zero() -> Self {
        Vec3::new(0.0, 0.0, 0.0)
    }

    /// Unit vector along the given axis.
    #[inline]
    pub fn axis(axis: Axis) -> Self {
        match axis {
            Axis::X => Vec3::new(1.0, 0.0, 0.0),
            Axis::Y => Vec3::new(0.0, 1.0, 0.0),
            Axis::Z => Vec3::new(0.0, 0.0, 1.0),
        }
    }

    #[inline]
    pub fn len(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[inline]
    pub fn distance(&self, other: &Vec3<f64>) -> f64 {
        (*self - *other).len()
    }

    /// Normalizes the vector.
    ///
    /// The caller must know the vector is not zero-length, otherwise every
    /// component turns into NaN. Use [`Vec3::try_unit`] when that is not
    /// guaranteed.
    #[inline]
    pub fn unit(&self) -> Vec3<f64> {
        let len = self.len();

        Vec3 {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
        }
    }

    #[inline]
    pub fn try_unit(&self) -> Option<Vec3<f64>> {
        let len = self.len();
        if len < EPSILON || !len.is_finite() {
            None
        } else {
            Some(self.scale(1.0 / len))
        }
    }

    #[inline]
    pub fn inverse(&self) -> Vec3<f64> {
        Vec3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Some unit vector perpendicular to this one.
    pub fn perpendicular(&self) -> Vec3<f64> {
        let helper = if self.x.abs() < 0.9 {
            Vec3::new(1.0, 0.0, 0.0)
        } else {
            Vec3::new(0.0, 1.0, 0.0)
        };

        self.cross(&helper).try_unit().unwrap_or_else(|| Vec3::new(0.0, 0.0, 1.0))
    }

    /// Rotates around the X axis by `pitch`, then around the Y axis by `yaw`.
    /// Both angles are in radians.
    pub fn rotate(&self, pitch: f64, yaw: f64) -> Vec3<f64> {
        let (sp, cp) = pitch.sin_cos();
        let y = self.y * cp - self.z * sp;
        let z = self.y * sp + self.z * cp;

        let (sy, cy) = yaw.sin_cos();
        Vec3 {
            x: self.x * cy + z * sy,
            y,
            z: -self.x * sy + z * cy,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl<T: Add<Output = T>> Add for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn add(self, other: Vec3<T>) -> Self::Output {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn sub(self, other: Vec3<T>) -> Self::Output {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl<T: Neg<Output = T>> Neg for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn neg(self) -> Self::Output {
        Vec3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
pub fn assert_close(expected: Vec3<f64>, actual: Vec3<f64>) {
    assert!(
        (expected - actual).len() < 1e-9,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn unit_has_length_one() {
    let v = Vec3::new(3.0, 4.0, 12.0).unit();
    assert!((v.len() - 1.0).abs() < 1e-12);
}

#[test]
fn try_unit_rejects_zero() {
    assert_eq!(None, Vec3::zero().try_unit());
    assert_eq!(Some(Vec3::new(0.0, 0.0, 1.0)), Vec3::new(0.0, 0.0, 2.0).try_unit());
}

#[test]
fn cross_follows_right_hand_rule() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);
    assert_eq!(Vec3::new(0.0, 0.0, 1.0), x.cross(&y));
}

#[test]
fn rotate_by_yaw_turns_forward_to_the_right() {
    let forward = Vec3::new(0.0, 0.0, 1.0);
    assert_close(Vec3::new(1.0, 0.0, 0.0), forward.rotate(0.0, std::f64::consts::FRAC_PI_2));
}

#[test]
fn rotate_by_pitch_tilts_forward_down() {
    let forward = Vec3::new(0.0, 0.0, 1.0);
    assert_close(Vec3::new(0.0, -1.0, 0.0), forward.rotate(std::f64::consts::FRAC_PI_2, 0.0));
}

#[test]
fn perpendicular_is_orthogonal_unit() {
    for v in &[Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.3, -2.0, 5.0)] {
        let p = v.perpendicular();
        assert!(p.dot(v).abs() < 1e-9);
        assert!((p.len() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn distance_is_symmetric() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(4.0, 6.0, 3.0);
    assert_eq!(5.0, a.distance(&b));
    assert_eq!(5.0, b.distance(&a));
}
