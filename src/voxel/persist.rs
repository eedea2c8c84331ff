//! Flat import/export of the occupied cells.
//!
//! The persisted layout is a JSON document holding the grid pitch and a
//! list of cell positions in world units (integer multiples of the pitch).

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use super::coord::GridCoord;
use super::store::VoxelStore;

/// Current version of the export format
pub const EXPORT_VERSION: u32 = 1;

/// Serialized voxel set
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoxelExport {
    /// Format version for compatibility
    pub version: u32,
    /// Pitch the positions were written with
    pub grid_pitch: f32,
    /// Occupied cell positions, sorted
    pub voxels: Vec<[f32; 3]>,
}

impl VoxelExport {
    /// Capture the store's occupied cells
    pub fn from_store(store: &VoxelStore, grid_pitch: f32) -> Self {
        let voxels = store
            .sorted_coords()
            .into_iter()
            .map(|c| c.to_position(grid_pitch).to_array())
            .collect();
        Self {
            version: EXPORT_VERSION,
            grid_pitch,
            voxels,
        }
    }

    /// Snap every position into a cell of `session_pitch`.
    ///
    /// Positions recorded with a different pitch are rescaled first so the
    /// cell layout survives.
    pub fn to_coords(&self, session_pitch: f32) -> Result<Vec<GridCoord>> {
        if self.version != EXPORT_VERSION {
            return Err(Error::Import(format!("unsupported version: {}", self.version)));
        }
        if !(self.grid_pitch.is_finite() && self.grid_pitch > 0.0) {
            return Err(Error::Import(format!("invalid grid pitch: {}", self.grid_pitch)));
        }

        let rescale = session_pitch / self.grid_pitch;
        self.voxels
            .iter()
            .map(|p| {
                let pos = Vec3::from_array(*p) * rescale;
                GridCoord::try_from_position(pos, session_pitch)
                    .ok_or_else(|| Error::Import(format!("invalid voxel position: {:?}", p)))
            })
            .collect()
    }

    /// Replace the store's contents with this export. Returns the new count.
    pub fn apply(&self, store: &mut VoxelStore, session_pitch: f32) -> Result<usize> {
        let coords = self.to_coords(session_pitch)?;
        let count = store.replace_all(coords);
        log::info!("Imported {} voxels", count);
        Ok(count)
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write to a file
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        log::info!("Exported {} voxels to {}", self.voxels.len(), path.as_ref().display());
        Ok(())
    }

    /// Read from a file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn sample_store() -> VoxelStore {
        let mut store = VoxelStore::new();
        for c in [GridCoord::new(0, 0, 1), GridCoord::new(0, 1, 1), GridCoord::new(-3, 0, 2)] {
            store.add(c).unwrap();
        }
        store
    }

    #[test]
    fn test_roundtrip_into_fresh_store() {
        let store = sample_store();
        let export = VoxelExport::from_store(&store, 1.0);
        let json = export.to_json().unwrap();

        let mut fresh = VoxelStore::new();
        fresh.clear_and_reseed();
        VoxelExport::from_json(&json).unwrap().apply(&mut fresh, 1.0).unwrap();

        let a: HashSet<GridCoord> = store.sorted_coords().into_iter().collect();
        let b: HashSet<GridCoord> = fresh.sorted_coords().into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_roundtrip_without_origin() {
        let mut store = sample_store();
        assert!(store.remove(GridCoord::ORIGIN));

        let export = VoxelExport::from_store(&store, 0.5);
        let mut fresh = VoxelStore::new();
        export.apply(&mut fresh, 0.5).unwrap();

        assert_eq!(fresh.sorted_coords(), store.sorted_coords());
        assert!(!fresh.has(GridCoord::ORIGIN));
    }

    #[test]
    fn test_near_integer_positions_snap() {
        let export = VoxelExport {
            version: EXPORT_VERSION,
            grid_pitch: 1.0,
            voxels: vec![[0.999_9, 2.000_1, -1.0], [1.0, 2.0, -0.999_8]],
        };
        let coords = export.to_coords(1.0).unwrap();
        assert_eq!(coords, vec![GridCoord::new(1, 2, -1), GridCoord::new(1, 2, -1)]);
    }

    #[test]
    fn test_pitch_rescale() {
        let export = VoxelExport {
            version: EXPORT_VERSION,
            grid_pitch: 2.0,
            voxels: vec![[4.0, 0.0, -2.0]],
        };
        assert_eq!(export.to_coords(0.5).unwrap(), vec![GridCoord::new(2, 0, -1)]);
    }

    #[test]
    fn test_rejects_bad_data() {
        let bad_version = VoxelExport { version: 99, grid_pitch: 1.0, voxels: vec![] };
        assert!(matches!(bad_version.to_coords(1.0), Err(Error::Import(_))));

        let bad_pitch = VoxelExport { version: EXPORT_VERSION, grid_pitch: 0.0, voxels: vec![] };
        assert!(bad_pitch.to_coords(1.0).is_err());

        let huge = VoxelExport { version: EXPORT_VERSION, grid_pitch: 1.0, voxels: vec![[1e20, 0.0, 0.0]] };
        assert!(huge.to_coords(1.0).is_err());

        assert!(matches!(VoxelExport::from_json("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_failed_import_leaves_store_untouched() {
        let mut store = sample_store();
        let before = store.sorted_coords();
        let bad = VoxelExport { version: EXPORT_VERSION, grid_pitch: 1.0, voxels: vec![[0.0, 0.0, 0.0], [1e20, 0.0, 0.0]] };
        assert!(bad.apply(&mut store, 1.0).is_err());
        assert_eq!(store.sorted_coords(), before);
    }

    #[test]
    fn test_file_persistence() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("sculpt.json");

        let store = sample_store();
        VoxelExport::from_store(&store, 1.0).save_to_path(&path).expect("save failed");

        let loaded = VoxelExport::load_from_path(&path).expect("load failed");
        let mut fresh = VoxelStore::new();
        loaded.apply(&mut fresh, 1.0).unwrap();
        assert_eq!(fresh.sorted_coords(), store.sorted_coords());
    }
}
