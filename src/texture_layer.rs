//! Per-sample multi-layer texture blend weights (alphamap).
//!
//! Every sample holds one weight per layer. After any paint, erase or smooth pass
//! the touched samples are renormalized so their weights sum to 1; samples whose
//! total falls below the normalization epsilon are left as they are.

use glam::Vec3;

use crate::brush::BrushFootprint;
use crate::error::{Result, TerrainError};
use crate::grid::{GridMapping, GridRegion};
use crate::heightfield::validate_mapping;

/// Index of the layer that erasing grows.
pub const BASE_LAYER: usize = 0;

const DEFAULT_NORMALIZE_EPSILON: f32 = 1e-6;

/// Stable identity of a layer within one field. Indices shift when a layer is
/// removed; ids never do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// One named texture layer with a weight per grid sample.
#[derive(Clone, Debug, PartialEq)]
pub struct BlendLayer {
    pub name: String,
    id: LayerId,
    weights: Vec<f32>,
}

impl BlendLayer {
    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextureBlendField {
    mapping: GridMapping,
    layers: Vec<BlendLayer>,
    epsilon: f32,
    next_id: u32,
}

impl TextureBlendField {
    /// One base layer at full weight everywhere.
    pub fn new(mapping: GridMapping, base_layer: &str) -> Result<Self> {
        validate_mapping(&mapping)?;
        let count = mapping.resolution * mapping.resolution;
        Ok(Self {
            mapping,
            layers: vec![BlendLayer {
                name: base_layer.to_string(),
                id: LayerId(0),
                weights: vec![1.0; count],
            }],
            epsilon: DEFAULT_NORMALIZE_EPSILON,
            next_id: 1,
        })
    }

    /// Rebuild from layer-major flat arrays handed over by a loader.
    pub fn from_layers(mapping: GridMapping, layers: Vec<(String, Vec<f32>)>) -> Result<Self> {
        validate_mapping(&mapping)?;
        if layers.is_empty() {
            return Err(TerrainError::LastLayer);
        }
        let expected = mapping.resolution * mapping.resolution;
        let mut built = Vec::with_capacity(layers.len());
        for (slot, (name, weights)) in layers.into_iter().enumerate() {
            if weights.len() != expected {
                return Err(TerrainError::LengthMismatch {
                    what: "blend layer",
                    expected,
                    actual: weights.len(),
                });
            }
            if let Some((index, &value)) = weights
                .iter()
                .enumerate()
                .find(|(_, v)| !(0.0..=1.0).contains(*v))
            {
                return Err(TerrainError::ValueOutOfRange {
                    what: "blend layer",
                    index,
                    value,
                });
            }
            built.push(BlendLayer {
                name,
                id: LayerId(slot as u32),
                weights,
            });
        }
        Ok(Self {
            mapping,
            next_id: built.len() as u32,
            layers: built,
            epsilon: DEFAULT_NORMALIZE_EPSILON,
        })
    }

    pub fn set_normalize_epsilon(&mut self, epsilon: f32) {
        self.epsilon = epsilon.max(0.0);
    }

    pub fn normalize_epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn mapping(&self) -> &GridMapping {
        &self.mapping
    }

    pub fn resolution(&self) -> usize {
        self.mapping.resolution
    }

    pub fn world_to_grid(&self, world: Vec3) -> (usize, usize) {
        self.mapping.world_to_grid(world)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[BlendLayer] {
        &self.layers
    }

    /// Ids of the current layers, in index order.
    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(|l| l.id).collect()
    }

    fn index(&self, x: usize, z: usize) -> usize {
        z * self.resolution() + x
    }

    pub fn weight(&self, layer: usize, x: usize, z: usize) -> f32 {
        self.layers[layer].weights[self.index(x, z)]
    }

    /// All layer weights at `(x, z)`.
    pub fn weights_at(&self, x: usize, z: usize) -> Vec<f32> {
        let i = self.index(x, z);
        self.layers.iter().map(|l| l.weights[i]).collect()
    }

    /// Layer with the largest weight at `(x, z)`; ties go to the lower index.
    pub fn dominant_layer(&self, x: usize, z: usize) -> usize {
        let i = self.index(x, z);
        let mut best = 0;
        for (layer, l) in self.layers.iter().enumerate() {
            if l.weights[i] > self.layers[best].weights[i] {
                best = layer;
            }
        }
        best
    }

    /// New layer at weight 0 everywhere, so existing sums are unchanged.
    pub fn add_layer(&mut self, name: &str) -> usize {
        let count = self.resolution() * self.resolution();
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push(BlendLayer {
            name: name.to_string(),
            id,
            weights: vec![0.0; count],
        });
        tracing::debug!(layer = name, count = self.layers.len(), "added blend layer");
        self.layers.len() - 1
    }

    /// Drop a layer and renormalize. Samples left with no weight fall back to the base layer.
    pub fn remove_layer(&mut self, index: usize) -> Result<BlendLayer> {
        self.check_layer(index)?;
        if self.layers.len() == 1 {
            return Err(TerrainError::LastLayer);
        }
        let removed = self.layers.remove(index);
        let count = self.resolution() * self.resolution();
        for i in 0..count {
            if !self.normalize_index(i) {
                self.reset_to_base(i);
            }
        }
        tracing::debug!(layer = %removed.name, "removed blend layer");
        Ok(removed)
    }

    fn reset_to_base(&mut self, i: usize) {
        for layer in &mut self.layers {
            layer.weights[i] = 0.0;
        }
        self.layers[BASE_LAYER].weights[i] = 1.0;
    }

    fn check_layer(&self, layer: usize) -> Result<()> {
        if layer >= self.layers.len() {
            return Err(TerrainError::LayerOutOfRange {
                index: layer,
                count: self.layers.len(),
            });
        }
        Ok(())
    }

    /// Clamp to `[0, 1]` then rescale to unit sum. Returns false (and leaves the
    /// sample untouched beyond clamping) when the total is below epsilon.
    fn normalize_index(&mut self, i: usize) -> bool {
        let mut sum = 0.0;
        for layer in &mut self.layers {
            let w = layer.weights[i].clamp(0.0, 1.0);
            layer.weights[i] = w;
            sum += w;
        }
        if sum < self.epsilon {
            return false;
        }
        for layer in &mut self.layers {
            layer.weights[i] /= sum;
        }
        true
    }

    /// Renormalize every sample.
    pub fn normalize_all(&mut self) {
        let count = self.resolution() * self.resolution();
        for i in 0..count {
            self.normalize_index(i);
        }
    }

    /// Raise `layer` by `influence` at one sample, lowering the others evenly.
    pub fn paint_sample(&mut self, x: usize, z: usize, layer: usize, influence: f32) -> Result<()> {
        self.check_layer(layer)?;
        let i = self.index(x, z);
        let others = self.layers.len() - 1;
        let share = if others > 0 { influence / others as f32 } else { 0.0 };
        for (index, l) in self.layers.iter_mut().enumerate() {
            let w = &mut l.weights[i];
            if index == layer {
                *w = (*w + influence).min(1.0);
            } else {
                *w = (*w - share).max(0.0);
            }
        }
        self.normalize_index(i);
        Ok(())
    }

    /// Lower `layer` by `influence` at one sample, growing the base layer by the same amount.
    pub fn erase_sample(&mut self, x: usize, z: usize, layer: usize, influence: f32) -> Result<()> {
        self.check_layer(layer)?;
        let i = self.index(x, z);
        let w = &mut self.layers[layer].weights[i];
        *w = (*w - influence).max(0.0);
        let base = &mut self.layers[BASE_LAYER].weights[i];
        *base = (*base + influence).min(1.0);
        self.normalize_index(i);
        Ok(())
    }

    /// Paint every footprint sample with its influence times `scale`.
    pub fn paint(&mut self, footprint: &BrushFootprint, layer: usize, scale: f32) -> Result<()> {
        self.check_layer(layer)?;
        for cell in footprint.iter() {
            self.paint_sample(cell.x, cell.z, layer, cell.influence * scale)?;
        }
        Ok(())
    }

    pub fn erase(&mut self, footprint: &BrushFootprint, layer: usize, scale: f32) -> Result<()> {
        self.check_layer(layer)?;
        for cell in footprint.iter() {
            self.erase_sample(cell.x, cell.z, layer, cell.influence * scale)?;
        }
        Ok(())
    }

    /// Blend each footprint sample's weight vector toward its 3×3 neighborhood mean.
    /// Neighbors are read from the state before this pass; grid edges use the
    /// neighbors that exist.
    pub fn smooth(&mut self, footprint: &BrushFootprint, scale: f32) {
        if footprint.is_empty() {
            return;
        }
        let res = self.resolution();
        let source = footprint.region.expand(1, res);
        let before = self.get_region(&source);

        for cell in footprint.iter() {
            let t = (cell.influence * scale).clamp(0.0, 1.0);
            let i = self.index(cell.x, cell.z);
            let x_range = cell.x.saturating_sub(1)..=(cell.x + 1).min(res - 1);
            let z_range = cell.z.saturating_sub(1)..=(cell.z + 1).min(res - 1);
            let neighbors = x_range.clone().count() * z_range.clone().count();

            for (layer, plane) in before.iter().enumerate() {
                let mut total = 0.0;
                for nz in z_range.clone() {
                    for nx in x_range.clone() {
                        total += plane[source.local_index(nx, nz)];
                    }
                }
                let mean = total / neighbors as f32;
                let w = &mut self.layers[layer].weights[i];
                *w += (mean - *w) * t;
            }
            self.normalize_index(i);
        }
    }

    /// Copy of every layer's weights inside `region`, layer-major.
    pub fn get_region(&self, region: &GridRegion) -> Vec<Vec<f32>> {
        assert!(
            region.fits(self.resolution()),
            "region {region:?} outside {}x{} blend field",
            self.resolution(),
            self.resolution()
        );
        let res = self.resolution();
        self.layers
            .iter()
            .map(|layer| {
                let mut out = Vec::with_capacity(region.len());
                for z in region.z..region.z + region.height {
                    let row = z * res;
                    out.extend_from_slice(&layer.weights[row + region.x..row + region.x + region.width]);
                }
                out
            })
            .collect()
    }

    /// Write layer-major `data` into `region`, plane `i` going to layer `i`.
    /// Layers missing from `data` are zeroed there and extra planes are ignored;
    /// in either case the touched samples are renormalized.
    pub fn set_region(&mut self, region: &GridRegion, data: &[Vec<f32>]) {
        let planes: Vec<Option<&Vec<f32>>> = (0..self.layers.len()).map(|i| data.get(i)).collect();
        let exact = data.len() == self.layers.len();
        self.write_planes(region, &planes, exact);
    }

    /// Write planes captured with `ids` back to the layers that still carry those
    /// ids. Planes of removed layers are dropped and layers added since are zeroed
    /// there, after which the touched samples are renormalized.
    pub fn restore_region(&mut self, region: &GridRegion, ids: &[LayerId], data: &[Vec<f32>]) {
        assert_eq!(ids.len(), data.len(), "one layer id per plane");
        let planes: Vec<Option<&Vec<f32>>> = self
            .layers
            .iter()
            .map(|layer| ids.iter().position(|&id| id == layer.id).map(|p| &data[p]))
            .collect();
        let exact = ids.len() == self.layers.len() && planes.iter().all(Option::is_some);
        self.write_planes(region, &planes, exact);
    }

    fn write_planes(&mut self, region: &GridRegion, planes: &[Option<&Vec<f32>>], exact: bool) {
        assert!(
            region.fits(self.resolution()),
            "region {region:?} outside {}x{} blend field",
            self.resolution(),
            self.resolution()
        );
        let res = self.resolution();
        for (layer, &plane) in self.layers.iter_mut().zip(planes) {
            if let Some(plane) = plane {
                assert_eq!(plane.len(), region.len(), "region buffer length mismatch");
            }
            for (x, z) in region.cells() {
                let value = plane.map_or(0.0, |p| p[region.local_index(x, z)]);
                layer.weights[z * res + x] = value;
            }
        }
        // planes captured with the current layer set are restored verbatim
        if !exact {
            for (x, z) in region.cells() {
                let i = self.index(x, z);
                if !self.normalize_index(i) {
                    self.reset_to_base(i);
                }
            }
        }
    }
}
