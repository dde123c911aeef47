//! Undo/redo history for terrain edits.
//!
//! Each entry is an immutable copy of the rectangle an operation was about to
//! touch, in either the height field or the blend field. History is linear: a
//! new snapshot clears the redo stack. Undo restores the captured rectangle
//! verbatim, even if later strokes overlapped part of it.

use std::collections::VecDeque;

use crate::grid::GridRegion;
use crate::heightfield::HeightField;
use crate::terrain::Terrain;
use crate::texture_layer::{LayerId, TextureBlendField};

/// Which field an entry belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UndoTarget {
    Heights,
    Blend,
}

#[derive(Clone, Debug, PartialEq)]
enum SnapshotData {
    Heights(Vec<f32>),
    /// Layer-major weights, keyed by the layer each plane was read from
    Blend {
        layers: Vec<LayerId>,
        planes: Vec<Vec<f32>>,
    },
}

/// Snapshot of one rectangular region.
#[derive(Clone, Debug, PartialEq)]
pub struct UndoEntry {
    region: GridRegion,
    description: String,
    data: SnapshotData,
}

impl UndoEntry {
    pub fn heights(field: &HeightField, region: GridRegion, description: impl Into<String>) -> Self {
        Self {
            region,
            description: description.into(),
            data: SnapshotData::Heights(field.get_region(&region)),
        }
    }

    pub fn blend(
        field: &TextureBlendField,
        region: GridRegion,
        description: impl Into<String>,
    ) -> Self {
        Self {
            region,
            description: description.into(),
            data: SnapshotData::Blend {
                layers: field.layer_ids(),
                planes: field.get_region(&region),
            },
        }
    }

    pub fn region(&self) -> GridRegion {
        self.region
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn target(&self) -> UndoTarget {
        match self.data {
            SnapshotData::Heights(_) => UndoTarget::Heights,
            SnapshotData::Blend { .. } => UndoTarget::Blend,
        }
    }

    pub fn width(&self) -> usize {
        self.region.width
    }

    pub fn height(&self) -> usize {
        self.region.height
    }

    /// Snapshot of the same region as it is now in `terrain`.
    fn recapture(&self, terrain: &Terrain) -> Self {
        match self.data {
            SnapshotData::Heights(_) => {
                Self::heights(&terrain.heights, self.region, self.description.clone())
            }
            SnapshotData::Blend { .. } => {
                Self::blend(&terrain.blend, self.region, self.description.clone())
            }
        }
    }

    fn restore(&self, terrain: &mut Terrain) {
        match &self.data {
            SnapshotData::Heights(data) => terrain.heights.set_region(&self.region, data),
            SnapshotData::Blend { layers, planes } => {
                terrain.blend.restore_region(&self.region, layers, planes)
            }
        }
    }
}

/// Bounded LIFO of snapshots plus a redo stack.
#[derive(Debug)]
pub struct UndoManager {
    /// Oldest at the front, most recent at the back
    past: VecDeque<UndoEntry>,
    /// Most recent at the end
    future: Vec<UndoEntry>,
    capacity: usize,
}

impl UndoManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store an entry taken before a forward edit. Clears the redo stack and
    /// evicts the oldest entries past capacity.
    pub fn push(&mut self, entry: UndoEntry) {
        self.future.clear();
        self.past.push_back(entry);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
    }

    pub fn snapshot_heights(
        &mut self,
        field: &HeightField,
        region: GridRegion,
        description: impl Into<String>,
    ) {
        self.push(UndoEntry::heights(field, region, description));
    }

    pub fn snapshot_blend(
        &mut self,
        field: &TextureBlendField,
        region: GridRegion,
        description: impl Into<String>,
    ) {
        self.push(UndoEntry::blend(field, region, description));
    }

    /// Restore the most recent snapshot, keeping the current state of that region
    /// for redo. Returns the restored entry's description, or `None` when empty.
    pub fn undo(&mut self, terrain: &mut Terrain) -> Option<String> {
        let entry = self.past.pop_back()?;
        self.future.push(entry.recapture(terrain));
        entry.restore(terrain);
        Some(entry.description)
    }

    /// Mirror of [`undo`](Self::undo).
    pub fn redo(&mut self, terrain: &mut Terrain) -> Option<String> {
        let entry = self.future.pop()?;
        self.past.push_back(entry.recapture(terrain));
        entry.restore(terrain);
        Some(entry.description)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    pub fn redo_count(&self) -> usize {
        self.future.len()
    }

    /// Description of the entry the next undo would restore.
    pub fn peek_undo(&self) -> Option<&str> {
        self.past.back().map(UndoEntry::description)
    }

    pub fn peek_redo(&self) -> Option<&str> {
        self.future.last().map(UndoEntry::description)
    }

    /// Undo entries from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &UndoEntry> {
        self.past.iter()
    }
}
