//! Pinchcraft - gesture-driven voxel construction engine
//!
//! One hand orbits, zooms and locks the view; the other targets a cube face
//! and places or removes voxels with pinches. The host feeds hand landmarks
//! and calls [`engine::ConstructionEngine::tick`] once per rendered frame.

pub mod core;
pub mod gesture;
pub mod voxel;
pub mod engine;
pub mod render;

pub use engine::{ConstructionEngine, EngineConfig, FrameSnapshot, LandmarkFeed};
