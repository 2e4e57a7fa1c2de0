/// Per-face texture projection parameters
use nalgebra::{Vector2, Vector3};
use serde::Deserialize;
use std::fmt;

use crate::geometry::Dimensions;
use crate::transform::RotationState;

/// Material the editor bakes static lighting into
pub const LIGHTMAP_MATERIAL: &str = "lightmap_gray";

/// Lightmap sample resolution, doubled, as the editor stores it
pub const LIGHTMAP_SAMPLE_SIZE: u32 = 16384;

/// Texture rotation of an unrotated face
const BASE_ROTATION: f64 = 180.0;

/// How a face's texture parameters are derived.
///
/// A document uses one strategy for every face it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureProjection {
    /// Classify the face by its normal and encode the brush rotation in
    /// the texture rotation field.
    #[default]
    Classified,
    /// Snap the normal to a major axis and derive a U/V basis from it.
    AxisBasis,
}

/// Texture alignment of a single brush face
#[derive(Debug, Clone, PartialEq)]
pub struct TextureParams {
    pub scale: Vector2<f64>,
    pub offset: Vector2<f64>,
    pub rotation: f64,
    pub lightmap_offset: Vector3<f64>,
    /// U and V texture axes, only set by [`TextureProjection::AxisBasis`]
    pub uv_axes: Option<(Vector3<f64>, Vector3<f64>)>,
}

/// Which pair of brush dimensions a face spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceOrientation {
    /// Normal along Z
    Horizontal,
    /// Normal along X
    Side,
    /// Normal along Y
    Facing,
}

impl FaceOrientation {
    pub fn classify(normal: &Vector3<i64>) -> Self {
        if normal.z != 0 {
            FaceOrientation::Horizontal
        } else if normal.x != 0 {
            FaceOrientation::Side
        } else {
            FaceOrientation::Facing
        }
    }

    /// In-plane (u, v) extent of a face with this orientation
    pub fn extent(&self, dims: &Dimensions) -> Vector2<f64> {
        let (u, v) = match self {
            FaceOrientation::Horizontal => (dims.width, dims.length),
            FaceOrientation::Side => (dims.length, dims.height),
            FaceOrientation::Facing => (dims.width, dims.height),
        };
        Vector2::new(u as f64, v as f64)
    }

    /// The Euler component that turns a face of this orientation in its own plane
    pub fn rotation_source(&self, rotation: &RotationState) -> f64 {
        match self {
            FaceOrientation::Horizontal => rotation.z,
            FaceOrientation::Side => rotation.y,
            FaceOrientation::Facing => rotation.x,
        }
    }
}

impl TextureProjection {
    /// Compute the texture parameters of one face.
    ///
    /// `normal` is the face's base normal after the brush rotation.
    pub fn params(
        &self,
        normal: &Vector3<i64>,
        dims: &Dimensions,
        rotation: &RotationState,
    ) -> TextureParams {
        let orientation = FaceOrientation::classify(normal);
        let extent = orientation.extent(dims);

        // The editor's texture V axis points down
        let scale = Vector2::new(extent.x, -extent.y);
        let offset = scale / 2.0;

        match self {
            TextureProjection::Classified => {
                let rotation = (BASE_ROTATION + orientation.rotation_source(rotation)).rem_euclid(360.0);
                let lightmap_offset = if normal.x != 0 {
                    Vector3::zeros()
                } else {
                    Vector3::new(-3.0 * dims.width as f64, 0.0, 0.0)
                };

                TextureParams {
                    scale,
                    offset,
                    rotation,
                    lightmap_offset,
                    uv_axes: None,
                }
            }
            TextureProjection::AxisBasis => TextureParams {
                scale,
                offset,
                rotation: 0.0,
                lightmap_offset: Vector3::zeros(),
                uv_axes: Some(uv_basis(&normal.map(|c| c as f64))),
            },
        }
    }
}

/// Snap a direction to the nearest signed major axis.
///
/// Ties resolve to X before Y before Z. A zero vector snaps to -X.
pub fn closest_axis(direction: &Vector3<f64>) -> Vector3<f64> {
    let abs = direction.abs();
    let pick = |component: f64| if component > 0.0 { 1.0 } else { -1.0 };

    if abs.x >= abs.y && abs.x >= abs.z {
        Vector3::new(pick(direction.x), 0.0, 0.0)
    } else if abs.y >= abs.z {
        Vector3::new(0.0, pick(direction.y), 0.0)
    } else {
        Vector3::new(0.0, 0.0, pick(direction.z))
    }
}

/// U and V texture axes for a face normal
pub fn uv_basis(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let axis = closest_axis(&normal.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros));
    let reference = if axis.z != 0.0 {
        -Vector3::y()
    } else {
        -Vector3::z()
    };

    let u = axis.cross(&reference).normalize();
    let v = u.cross(&axis).normalize();
    (u, v)
}

/// Shortest decimal form of a parameter, with negative zero printed as 0
pub(crate) struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            write!(f, "0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Display for TextureParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} 0 {} {} {} {} {} {} 0",
            Num(self.scale.x),
            Num(self.scale.y),
            Num(self.offset.x),
            Num(self.offset.y),
            Num(self.rotation),
            LIGHTMAP_MATERIAL,
            LIGHTMAP_SAMPLE_SIZE,
            LIGHTMAP_SAMPLE_SIZE,
            Num(self.lightmap_offset.x),
            Num(self.lightmap_offset.y),
            Num(self.lightmap_offset.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Dimensions {
        Dimensions::new(32.0, 64.0, 8.0)
    }

    #[test]
    fn test_classify() {
        assert_eq!(FaceOrientation::classify(&Vector3::new(0, 0, -1)), FaceOrientation::Horizontal);
        assert_eq!(FaceOrientation::classify(&Vector3::new(1, 0, 0)), FaceOrientation::Side);
        assert_eq!(FaceOrientation::classify(&Vector3::new(0, -1, 0)), FaceOrientation::Facing);
        // Z wins over X when a rounded normal is diagonal
        assert_eq!(FaceOrientation::classify(&Vector3::new(1, 0, 1)), FaceOrientation::Horizontal);
    }

    #[test]
    fn test_classified_top_face() {
        let params = TextureProjection::Classified.params(
            &Vector3::new(0, 0, 1),
            &dims(),
            &RotationState::zero(),
        );
        assert_eq!(params.scale, Vector2::new(32.0, -64.0));
        assert_eq!(params.offset, Vector2::new(16.0, -32.0));
        assert_eq!(params.rotation, 180.0);
        assert_eq!(params.lightmap_offset, Vector3::new(-96.0, 0.0, 0.0));
        assert_eq!(
            params.to_string(),
            "32 -64 16 -32 180 0 lightmap_gray 16384 16384 -96 0 0 0"
        );
    }

    #[test]
    fn test_classified_side_face() {
        let params = TextureProjection::Classified.params(
            &Vector3::new(-1, 0, 0),
            &dims(),
            &RotationState::new(0.0, 270.0, 0.0),
        );
        assert_eq!(params.scale, Vector2::new(64.0, -8.0));
        assert_eq!(params.rotation, 90.0);
        assert_eq!(params.lightmap_offset, Vector3::zeros());
        assert_eq!(
            params.to_string(),
            "64 -8 32 -4 90 0 lightmap_gray 16384 16384 0 0 0 0"
        );
    }

    #[test]
    fn test_classified_rotation_wraps_negative() {
        let params = TextureProjection::Classified.params(
            &Vector3::new(0, 1, 0),
            &dims(),
            &RotationState::new(-270.0, 0.0, 0.0),
        );
        assert_eq!(params.rotation, 270.0);
        assert_eq!(params.scale, Vector2::new(32.0, -8.0));
    }

    #[test]
    fn test_odd_dimensions_print_fractional_offsets() {
        let params = TextureProjection::Classified.params(
            &Vector3::new(0, -1, 0),
            &Dimensions::new(33.0, 10.0, 5.0),
            &RotationState::zero(),
        );
        assert_eq!(
            params.to_string(),
            "33 -5 16.5 -2.5 180 0 lightmap_gray 16384 16384 -99 0 0 0"
        );
    }

    #[test]
    fn test_zero_dimensions_print_plain_zero() {
        let params = TextureProjection::Classified.params(
            &Vector3::new(1, 0, 0),
            &Dimensions::new(0.0, 0.0, 0.0),
            &RotationState::zero(),
        );
        assert_eq!(
            params.to_string(),
            "0 0 0 0 180 0 lightmap_gray 16384 16384 0 0 0 0"
        );
    }

    #[test]
    fn test_axis_basis_top_face() {
        let params = TextureProjection::AxisBasis.params(
            &Vector3::new(0, 0, 1),
            &dims(),
            &RotationState::new(0.0, 0.0, 45.0),
        );
        let (u, v) = params.uv_axes.expect("axis basis sets uv axes");
        assert_eq!(u, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(v, Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(params.rotation, 0.0);
        assert_eq!(params.lightmap_offset, Vector3::zeros());
        assert_eq!(
            params.to_string(),
            "32 -64 16 -32 0 0 lightmap_gray 16384 16384 0 0 0 0"
        );
    }

    #[test]
    fn test_axis_basis_side_face() {
        let (u, v) = uv_basis(&Vector3::new(1.0, 0.0, 0.0));
        // n = +X, ref = -Z
        assert_eq!(u, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(v, Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_closest_axis() {
        assert_eq!(closest_axis(&Vector3::new(0.2, -0.9, 0.1)), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(closest_axis(&Vector3::new(0.5, 0.5, 0.5)), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(closest_axis(&Vector3::new(0.0, 0.3, -0.7)), Vector3::new(0.0, 0.0, -1.0));
    }
}
