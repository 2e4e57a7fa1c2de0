/// Box brush geometry: corners, faces and winding
use nalgebra::{Point3, Vector3};
use std::fmt;

use crate::error::{Error, Result};
use crate::projection::{TextureParams, TextureProjection};
use crate::transform::{round_half_even, AxisConvention, RotationState, Transform};

/// Brush extents along X (width), Y (length) and Z (height), in whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: i64,
    pub length: i64,
    pub height: i64,
}

impl Dimensions {
    /// Round each extent to the nearest integer (ties to even)
    pub fn new(width: f64, length: f64, height: f64) -> Self {
        Self {
            width: round_half_even(width),
            length: round_half_even(length),
            height: round_half_even(height),
        }
    }

    /// Half extents, floored, so an odd extent loses its last unit
    pub fn half_extents(&self) -> Vector3<i64> {
        Vector3::new(
            self.width.div_euclid(2),
            self.length.div_euclid(2),
            self.height.div_euclid(2),
        )
    }
}

/// One of the six faces of a box brush, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceSide {
    Bottom,
    Top,
    Front,
    Right,
    Back,
    Left,
}

impl FaceSide {
    pub const ALL: [FaceSide; 6] = [
        FaceSide::Bottom,
        FaceSide::Top,
        FaceSide::Front,
        FaceSide::Right,
        FaceSide::Back,
        FaceSide::Left,
    ];

    /// Corner indices whose plane bounds this face, wound so that
    /// `(p0 - p1) x (p2 - p1)` points out of the solid.
    pub fn corner_indices(&self) -> [usize; 3] {
        match self {
            FaceSide::Bottom => [2, 3, 0],
            FaceSide::Top => [4, 7, 6],
            FaceSide::Front => [4, 5, 1],
            FaceSide::Right => [5, 6, 2],
            FaceSide::Back => [6, 7, 3],
            FaceSide::Left => [7, 4, 0],
        }
    }

    /// Outward normal before rotation
    pub fn base_normal(&self) -> Vector3<i64> {
        match self {
            FaceSide::Bottom => Vector3::new(0, 0, -1),
            FaceSide::Top => Vector3::new(0, 0, 1),
            FaceSide::Front => Vector3::new(0, -1, 0),
            FaceSide::Right => Vector3::new(1, 0, 0),
            FaceSide::Back => Vector3::new(0, 1, 0),
            FaceSide::Left => Vector3::new(-1, 0, 0),
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Texture assignment for a brush
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSet {
    /// One texture on every face
    Single(String),
    /// One texture per face, in [`FaceSide::ALL`] order
    PerFace(Box<[String; 6]>),
}

impl TextureSet {
    pub fn single(name: impl Into<String>) -> Self {
        TextureSet::Single(name.into())
    }

    /// Build a per-face set; anything but six names is rejected
    pub fn per_face(names: Vec<String>) -> Result<Self> {
        let count = names.len();
        let names: [String; 6] = names
            .try_into()
            .map_err(|_| Error::InvalidTextureCount { count })?;
        Ok(TextureSet::PerFace(Box::new(names)))
    }

    pub fn name(&self, side: FaceSide) -> &str {
        match self {
            TextureSet::Single(name) => name,
            TextureSet::PerFace(names) => &names[side.index()],
        }
    }
}

/// A face of a generated brush: three plane points and its texture
#[derive(Debug, Clone, PartialEq)]
pub struct BrushFace {
    pub side: FaceSide,
    pub points: [Point3<i64>; 3],
    /// Base normal after the brush rotation, rounded like the corners
    pub normal: Vector3<i64>,
    pub texture: String,
    pub params: TextureParams,
}

impl BrushFace {
    /// Normal of the plane through the three points, facing out of the solid
    pub fn plane_normal(&self) -> Vector3<f64> {
        let [p0, p1, p2] = self.points.map(|p| p.map(|c| c as f64));
        let edge1 = p0 - p1;
        let edge2 = p2 - p1;

        edge1
            .cross(&edge2)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }
}

impl fmt::Display for BrushFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.points {
            write!(f, " ( {} {} {} )", p.x, p.y, p.z)?;
        }
        write!(f, " {} {}", self.texture, self.params)
    }
}

/// An axis-aligned box brush with a rotation applied about its center
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    dimensions: Dimensions,
    position: Vector3<i64>,
    rotation: RotationState,
    textures: TextureSet,
    convention: AxisConvention,
}

impl Brush {
    /// Brush with one texture on all six faces
    pub fn new(
        width: f64,
        length: f64,
        height: f64,
        texture: impl Into<String>,
        position: [f64; 3],
        rotation: RotationState,
    ) -> Self {
        Self::from_parts(
            Dimensions::new(width, length, height),
            TextureSet::single(texture),
            position,
            rotation,
        )
    }

    /// Brush with one texture per face, in [`FaceSide::ALL`] order
    pub fn with_face_textures(
        width: f64,
        length: f64,
        height: f64,
        textures: Vec<String>,
        position: [f64; 3],
        rotation: RotationState,
    ) -> Result<Self> {
        Ok(Self::from_parts(
            Dimensions::new(width, length, height),
            TextureSet::per_face(textures)?,
            position,
            rotation,
        ))
    }

    pub fn from_parts(
        dimensions: Dimensions,
        textures: TextureSet,
        position: [f64; 3],
        rotation: RotationState,
    ) -> Self {
        Self {
            dimensions,
            position: Vector3::from(position.map(round_half_even)),
            rotation,
            textures,
            convention: AxisConvention::default(),
        }
    }

    /// Rotate with a different axis convention
    pub fn with_convention(self, convention: AxisConvention) -> Self {
        Self { convention, ..self }
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn position(&self) -> &Vector3<i64> {
        &self.position
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn textures(&self) -> &TextureSet {
        &self.textures
    }

    /// The eight corners centered on the origin, before rotation
    pub fn base_corners(&self) -> [Point3<i64>; 8] {
        let h = self.dimensions.half_extents();
        [
            Point3::new(-h.x, -h.y, -h.z),
            Point3::new(h.x, -h.y, -h.z),
            Point3::new(h.x, h.y, -h.z),
            Point3::new(-h.x, h.y, -h.z),
            Point3::new(-h.x, -h.y, h.z),
            Point3::new(h.x, -h.y, h.z),
            Point3::new(h.x, h.y, h.z),
            Point3::new(-h.x, h.y, h.z),
        ]
    }

    /// Corners after rotation and translation to the brush position
    pub fn corners(&self) -> [Point3<i64>; 8] {
        self.base_corners().map(|corner| {
            let rotated = Transform::rotate_point(&corner, &self.rotation, self.convention);
            Transform::translate(&rotated, &self.position)
        })
    }

    /// The six faces, in [`FaceSide::ALL`] order
    pub fn faces(&self, projection: TextureProjection) -> Vec<BrushFace> {
        let corners = self.corners();

        FaceSide::ALL
            .iter()
            .map(|&side| {
                let normal = Transform::rotate_point(
                    &Point3::from(side.base_normal()),
                    &self.rotation,
                    self.convention,
                )
                .coords;

                BrushFace {
                    side,
                    points: side.corner_indices().map(|i| corners[i]),
                    normal,
                    texture: self.textures.name(side).to_string(),
                    params: projection.params(&normal, &self.dimensions, &self.rotation),
                }
            })
            .collect()
    }

    /// Brace-delimited block of six face lines
    pub fn to_map_text(&self, projection: TextureProjection) -> String {
        let lines: Vec<String> = self
            .faces(projection)
            .iter()
            .map(BrushFace::to_string)
            .collect();
        format!("{{\n{}\n}}", lines.join("\n"))
    }
}
