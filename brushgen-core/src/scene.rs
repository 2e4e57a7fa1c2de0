//! JSON scene descriptions.
//!
//! A scene lists the brushes of one map together with where the map is
//! written and which projection and axis convention it uses:
//!
//! ```json
//! {
//!   "output": { "directory": "maps", "file_name": "test.map" },
//!   "projection": "classified",
//!   "brushes": [
//!     { "size": [32, 64, 8], "texture": "berlin_roof_wood_dirty", "rotation": [90, 0, 0] }
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::document::{MapDocument, OutputConfig};
use crate::error::{Error, Result};
use crate::geometry::{Brush, Dimensions, TextureSet};
use crate::projection::TextureProjection;
use crate::transform::{AxisConvention, RotationState};

/// Largest absolute size or position component a scene may use (2^30 units)
pub const MAX_COORDINATE: f64 = 1_073_741_824.0;

fn check_range(field: &'static str, values: &[f64; 3]) -> Result<()> {
    match values.iter().find(|v| !v.is_finite() || v.abs() > MAX_COORDINATE) {
        Some(&value) => Err(Error::CoordinateOutOfRange {
            field,
            value,
            max: MAX_COORDINATE,
        }),
        None => Ok(()),
    }
}

/// Texture field of a brush entry: one name, or one per face
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TextureSpec {
    Single(String),
    PerFace(Vec<String>),
}

impl TextureSpec {
    pub fn to_texture_set(&self) -> Result<TextureSet> {
        match self {
            TextureSpec::Single(name) => Ok(TextureSet::single(name.as_str())),
            TextureSpec::PerFace(names) => TextureSet::per_face(names.clone()),
        }
    }
}

/// One brush entry of a scene
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrushSpec {
    /// Width, length and height
    pub size: [f64; 3],
    pub texture: TextureSpec,
    #[serde(default)]
    pub position: [f64; 3],
    /// Euler degrees
    #[serde(default)]
    pub rotation: [f64; 3],
}

impl BrushSpec {
    pub fn build(&self, convention: AxisConvention) -> Result<Brush> {
        check_range("size", &self.size)?;
        check_range("position", &self.position)?;

        let [width, length, height] = self.size;
        let brush = Brush::from_parts(
            Dimensions::new(width, length, height),
            self.texture.to_texture_set()?,
            self.position,
            RotationState::from(self.rotation),
        );
        Ok(brush.with_convention(convention))
    }
}

/// A whole map: output location, conventions and brushes
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub projection: TextureProjection,
    #[serde(default)]
    pub convention: AxisConvention,
    pub brushes: Vec<BrushSpec>,
}

impl Scene {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The single test brush the generator shipped with: a 32x64x8 plank
    /// stood on its edge by a quarter turn around X.
    pub fn demo() -> Self {
        Self {
            output: OutputConfig::new("maps", "s32_64_8_p0_0_0_r90_0_0.map"),
            projection: TextureProjection::default(),
            convention: AxisConvention::default(),
            brushes: vec![BrushSpec {
                size: [32.0, 64.0, 8.0],
                texture: TextureSpec::Single("berlin_roof_wood_dirty".to_string()),
                position: [0.0; 3],
                rotation: [90.0, 0.0, 0.0],
            }],
        }
    }

    /// Build every brush, stopping at the first invalid one
    pub fn brushes(&self) -> Result<Vec<Brush>> {
        self.brushes
            .iter()
            .map(|spec| spec.build(self.convention))
            .collect()
    }

    pub fn build_document(&self) -> Result<MapDocument> {
        let brushes = self.brushes()?;
        Ok(MapDocument::from_brushes(&brushes, self.projection))
    }
}
