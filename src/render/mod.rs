//! Renderer-facing data
//!
//! The renderer itself lives outside the engine; this module only shapes
//! engine state into buffers it can upload.

pub mod instance;

pub use instance::{build_instances, OrbitUniform, VoxelInstance};
