//! Sparse voxel store keyed by grid coordinate
//!
//! The store is never empty: it starts with a seed voxel at the origin and
//! refuses to remove the last remaining voxel.

use std::collections::HashMap;

use super::coord::GridCoord;
use super::voxel::{Voxel, VoxelId};

/// Returned by [`VoxelStore::add`] when the cell is already taken
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occupied(pub Voxel);

/// Container owning every placed voxel
pub struct VoxelStore {
    /// Map from grid coordinate to the voxel in that cell
    voxels: HashMap<GridCoord, Voxel>,
    /// Next identity handed out
    next_id: u64,
}

impl VoxelStore {
    /// Create a store holding only the seed voxel
    pub fn new() -> Self {
        let mut store = Self {
            voxels: HashMap::new(),
            next_id: 1,
        };
        store.insert_unchecked(GridCoord::ORIGIN);
        store
    }

    /// Check if a cell is occupied
    pub fn has(&self, coord: GridCoord) -> bool {
        self.voxels.contains_key(&coord)
    }

    /// Get the voxel in a cell
    pub fn get(&self, coord: GridCoord) -> Option<&Voxel> {
        self.voxels.get(&coord)
    }

    /// Number of placed voxels (always at least one)
    pub fn count(&self) -> usize {
        self.voxels.len()
    }

    /// Place a voxel. An occupied cell is left untouched.
    pub fn add(&mut self, coord: GridCoord) -> Result<Voxel, Occupied> {
        if let Some(existing) = self.voxels.get(&coord) {
            return Err(Occupied(*existing));
        }
        Ok(self.insert_unchecked(coord))
    }

    /// Whether [`VoxelStore::remove`] would succeed for this cell
    pub fn can_remove(&self, coord: GridCoord) -> bool {
        self.voxels.len() > 1 && self.voxels.contains_key(&coord)
    }

    /// Remove a voxel, returning it. Refuses empty cells and the last voxel.
    pub fn take(&mut self, coord: GridCoord) -> Option<Voxel> {
        if !self.can_remove(coord) {
            return None;
        }
        self.voxels.remove(&coord)
    }

    /// Remove a voxel. Refuses empty cells and the last voxel.
    pub fn remove(&mut self, coord: GridCoord) -> bool {
        self.take(coord).is_some()
    }

    /// Empty the store and put the seed voxel back at the origin
    pub fn clear_and_reseed(&mut self) {
        self.voxels.clear();
        self.insert_unchecked(GridCoord::ORIGIN);
        log::info!("Voxel store reseeded");
    }

    /// Replace the whole set at once. Duplicates collapse; an empty list reseeds.
    ///
    /// The new map is built aside and swapped in, so the set is never seen
    /// half-replaced. Returns the resulting count.
    pub fn replace_all(&mut self, coords: impl IntoIterator<Item = GridCoord>) -> usize {
        let mut voxels = HashMap::new();
        for coord in coords {
            voxels.entry(coord).or_insert_with(|| {
                let id = VoxelId(self.next_id);
                self.next_id += 1;
                Voxel::new(id, coord)
            });
        }
        self.voxels = voxels;
        if self.voxels.is_empty() {
            self.insert_unchecked(GridCoord::ORIGIN);
        }
        self.voxels.len()
    }

    /// Iterate all voxels (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &Voxel> {
        self.voxels.values()
    }

    /// All occupied coordinates in sorted order
    pub fn sorted_coords(&self) -> Vec<GridCoord> {
        let mut coords: Vec<GridCoord> = self.voxels.keys().copied().collect();
        coords.sort_unstable();
        coords
    }

    fn insert_unchecked(&mut self, coord: GridCoord) -> Voxel {
        let voxel = Voxel::new(VoxelId(self.next_id), coord);
        self.next_id += 1;
        self.voxels.insert(coord, voxel);
        voxel
    }
}

impl Default for VoxelStore {
    fn default() -> Self {
        Self::new()
    }
}
