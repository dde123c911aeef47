//! The terrain entity: height field plus texture blend field.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::TerrainSettings;
use crate::error::Result;
use crate::grid::GridMapping;
use crate::heightfield::HeightField;
use crate::texture_layer::TextureBlendField;

/// Owns both editable grids. Replaced wholesale when a new terrain is created.
#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    pub heights: HeightField,
    pub blend: TextureBlendField,
}

impl Terrain {
    pub fn new(settings: &TerrainSettings) -> Result<Self> {
        let mapping = GridMapping::new(settings.origin(), settings.size(), settings.resolution);
        let heights = HeightField::new(mapping, settings.initial_height)?;
        let blend = TextureBlendField::new(
            mapping.with_resolution(settings.blend_resolution),
            &settings.base_layer,
        )?;
        tracing::info!(
            resolution = settings.resolution,
            blend_resolution = settings.blend_resolution,
            "created terrain"
        );
        Ok(Self { heights, blend })
    }

    pub fn origin(&self) -> Vec3 {
        self.heights.mapping().origin
    }

    pub fn size(&self) -> Vec3 {
        self.heights.mapping().size
    }

    /// Flat arrays plus metadata for an external save collaborator.
    pub fn to_data(&self) -> TerrainData {
        TerrainData {
            origin: self.origin().to_array(),
            size: self.size().to_array(),
            resolution: self.heights.resolution(),
            heights: self.heights.as_slice().to_vec(),
            blend_resolution: self.blend.resolution(),
            layers: self
                .blend
                .layers()
                .iter()
                .map(|layer| LayerData {
                    name: layer.name.clone(),
                    weights: layer.weights().to_vec(),
                })
                .collect(),
        }
    }

    /// Rebuild from a loader's payload, validating lengths and value ranges.
    pub fn from_data(data: TerrainData) -> Result<Self> {
        let mapping = GridMapping::new(
            Vec3::from_array(data.origin),
            Vec3::from_array(data.size),
            data.resolution,
        );
        let heights = HeightField::from_flat(mapping, data.heights)?;
        let blend = TextureBlendField::from_layers(
            mapping.with_resolution(data.blend_resolution),
            data.layers
                .into_iter()
                .map(|layer| (layer.name, layer.weights))
                .collect(),
        )?;
        Ok(Self { heights, blend })
    }
}

/// In-memory persistence shape: row-major flat arrays, values in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainData {
    pub origin: [f32; 3],
    /// Width, max height, depth
    pub size: [f32; 3],
    pub resolution: usize,
    pub heights: Vec<f32>,
    pub blend_resolution: usize,
    pub layers: Vec<LayerData>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerData {
    pub name: String,
    pub weights: Vec<f32>,
}
