//! Map document assembly and output.
//!
//! A [`MapDocument`] wraps brush blocks in a single worldspawn entity. The
//! header and footer are reproduced byte for byte; the editor rejects maps
//! whose layer declarations differ.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::geometry::Brush;
use crate::projection::TextureProjection;

/// Format line, layer declarations and the opening of the worldspawn entity
pub const MAP_HEADER: &str = concat!(
    "iwmap 4\n",
    "\"000_Global\" flags  active\n",
    "\"The Map\" flags \n",
    "// entity 0\n",
    "{\n",
    "\"classname\" \"worldspawn\"\n",
);

/// Closes the worldspawn entity
pub const MAP_FOOTER: &str = "}\n";

/// Where a document is written.
///
/// The directory must already exist; creating it is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub file_name: String,
}

impl OutputConfig {
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new("maps", "brushes.map")
    }
}

/// Ordered brush blocks of one map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapDocument {
    brushes: Vec<String>,
}

impl MapDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document from already serialised brush blocks
    pub fn from_blocks(brushes: Vec<String>) -> Self {
        Self { brushes }
    }

    /// Serialise every brush with one projection strategy
    pub fn from_brushes<'a>(
        brushes: impl IntoIterator<Item = &'a Brush>,
        projection: TextureProjection,
    ) -> Self {
        let mut document = Self::new();
        for brush in brushes {
            document.push_brush(brush, projection);
        }
        document
    }

    pub fn push_brush(&mut self, brush: &Brush, projection: TextureProjection) {
        log::debug!(
            "brush {}: {:?} at {:?} rotated {:?}",
            self.brushes.len(),
            brush.dimensions(),
            brush.position(),
            brush.rotation()
        );
        self.brushes.push(brush.to_map_text(projection));
    }

    pub fn len(&self) -> usize {
        self.brushes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brushes.is_empty()
    }

    pub fn blocks(&self) -> &[String] {
        &self.brushes
    }

    /// Full document text
    pub fn render(&self) -> String {
        let mut text = String::from(MAP_HEADER);
        for (i, brush) in self.brushes.iter().enumerate() {
            text.push_str(&format!("// brush {}\n{}\n", i, brush));
        }
        text.push_str(MAP_FOOTER);
        text
    }

    /// Write the document to `path`, replacing any existing file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        log::info!("Wrote {} brushes to {}", self.brushes.len(), path.display());
        Ok(())
    }

    /// Write the document to the configured location and return its path
    pub fn write(&self, output: &OutputConfig) -> Result<PathBuf> {
        let path = output.path();
        self.write_to(&path)?;
        Ok(path)
    }
}
