/// Integer point rotation in the target editor's axis convention
use nalgebra::{Point3, Rotation2, Vector2, Vector3};
use serde::Deserialize;

/// Euler rotation around three axes (in degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f64; 3]> for RotationState {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Handedness of each rotation axis.
///
/// Radiant-family editors turn the Y axis the opposite way to the
/// right-hand rule used for X and Z, so a Y angle has to be negated before
/// it is applied. Z is up in both conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisConvention {
    #[default]
    Radiant,
    RightHanded,
}

impl AxisConvention {
    /// Sign applied to each Euler component before rotating
    pub fn signs(&self) -> Vector3<f64> {
        match self {
            AxisConvention::Radiant => Vector3::new(1.0, -1.0, 1.0),
            AxisConvention::RightHanded => Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Transform helpers for integer brush coordinates
pub struct Transform;

impl Transform {
    /// Rotate an integer point by an Euler triple, X then Y then Z.
    ///
    /// Every axis step is rounded to the nearest integer (ties to even)
    /// before the next one runs, so corner coordinates of brushes built from
    /// small integer dimensions match the maps the generator has always
    /// written. Multi-axis rotations that are not multiples of 90 degrees
    /// accumulate that rounding error.
    pub fn rotate_point(
        point: &Point3<i64>,
        rotation: &RotationState,
        convention: AxisConvention,
    ) -> Point3<i64> {
        let signs = convention.signs();
        let (mut x, mut y, mut z) = (point.x, point.y, point.z);

        if rotation.x != 0.0 {
            (y, z) = Self::turn(y, z, rotation.x * signs.x);
        }
        // (z, x) keeps the plane right-handed around Y
        if rotation.y != 0.0 {
            (z, x) = Self::turn(z, x, rotation.y * signs.y);
        }
        if rotation.z != 0.0 {
            (x, y) = Self::turn(x, y, rotation.z * signs.z);
        }

        Point3::new(x, y, z)
    }

    /// Offset a point by an integer translation, saturating at the i64 range
    pub fn translate(point: &Point3<i64>, offset: &Vector3<i64>) -> Point3<i64> {
        Point3::from(point.coords.zip_map(offset, i64::saturating_add))
    }

    fn turn(a: i64, b: i64, degrees: f64) -> (i64, i64) {
        let turned = Rotation2::new(degrees.to_radians()) * Vector2::new(a as f64, b as f64);
        (round_half_even(turned.x), round_half_even(turned.y))
    }
}

/// Round to the nearest integer, ties to even
pub fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}
