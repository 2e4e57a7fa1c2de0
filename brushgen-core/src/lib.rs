/// brushgen core library - box brush geometry for iwmap level files
///
/// This library provides the stateless core of the generator: integer point
/// rotation in the editor's axis convention, brush corner and face
/// derivation, per-face texture projection, map document assembly and a
/// parser for the documents it writes.

pub mod document;
pub mod error;
pub mod geometry;
pub mod map;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use document::{MapDocument, OutputConfig};
pub use error::{Error, Result};
pub use geometry::{Brush, BrushFace, Dimensions, FaceSide, TextureSet};
pub use map::{parse_map, ParsedBrush, ParsedMap};
pub use projection::{TextureParams, TextureProjection};
pub use scene::{Scene, MAX_COORDINATE};
pub use transform::{AxisConvention, RotationState, Transform};
