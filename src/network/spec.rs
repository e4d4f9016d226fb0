use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::geometry::{propagate, ResultRow, SpatialState};
use crate::layers::LayerDescriptor;
use crate::network::input::InputShape;
use crate::network::presets;

/// The full, round-trippable state of an architecture: the input image and
/// the ordered layer list.
///
/// Editing methods return a new `ArchitectureSpec` rather than mutating in
/// place, so a caller holding a snapshot never sees it change underneath.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArchitectureSpec {
    pub input: InputShape,
    /// Ordered list of layers (input → output).
    pub layers: Vec<LayerDescriptor>,
}

impl ArchitectureSpec {
    pub fn new(input: InputShape, layers: Vec<LayerDescriptor>) -> Self {
        ArchitectureSpec { input, layers }
    }

    /// The VGG-like example network on the given input.
    pub fn example(input: InputShape) -> Self {
        ArchitectureSpec { input, layers: presets::vgg_like() }
    }

    /// Recomputes every row from the input shape.
    pub fn compute(&self) -> Vec<ResultRow> {
        propagate(SpatialState::from(self.input), &self.layers)
    }

    pub fn with_input(&self, input: InputShape) -> Self {
        ArchitectureSpec { input, layers: self.layers.clone() }
    }

    /// Appends `layer` to a copy of this spec.
    pub fn with_layer(&self, layer: LayerDescriptor) -> Self {
        let mut layers = self.layers.clone();
        layers.push(layer);
        ArchitectureSpec { input: self.input, layers }
    }

    /// Copy without the layer at 0-based `idx`; an out-of-range index leaves
    /// the copy unchanged.
    pub fn without_layer(&self, idx: usize) -> Self {
        let layers = self.layers.iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, l)| *l)
            .collect();
        ArchitectureSpec { input: self.input, layers }
    }

    /// Same input, no layers.
    pub fn cleared(&self) -> Self {
        ArchitectureSpec { input: self.input, layers: Vec::new() }
    }

    /// Applies an imported document to a copy of this spec: `input` and
    /// `layers` each replace the current value only when present, so a file
    /// holding just a layer list keeps the current input shape.
    pub fn with_import(&self, json: &str) -> Result<Self> {
        let patch: ImportPatch = serde_json::from_str(json)?;
        Ok(ArchitectureSpec {
            input: patch.input.unwrap_or(self.input),
            layers: patch.layers.unwrap_or_else(|| self.layers.clone()),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        debug!(path = %path.display(), layers = self.layers.len(), "saved architecture");
        Ok(())
    }

    /// Deserializes an `ArchitectureSpec` from a JSON file written by
    /// `save_json` (or by hand in the same format).
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: ArchitectureSpec = serde_json::from_reader(reader)?;
        debug!(path = %path.display(), layers = spec.layers.len(), "loaded architecture");
        Ok(spec)
    }
}

#[derive(Deserialize)]
struct ImportPatch {
    #[serde(default)]
    input: Option<InputShape>,
    #[serde(default)]
    layers: Option<Vec<LayerDescriptor>>,
}
