//! Engine configuration.
//!
//! Everything here is fixed for a session except `sensitivity`, the hand
//! enable flags and the bindings, which the engine exposes setters for.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::camera_controller::ZoomBand;
use crate::core::error::Error;
use crate::core::types::Result;
use crate::gesture::classifier::{DEFAULT_OPEN_THRESHOLD, DEFAULT_PALM_SCALE, DEFAULT_PINCH_THRESHOLD};
use crate::gesture::{GestureBindings, Handedness, HandRole};
use crate::voxel::coord::DEFAULT_GRID_PITCH;
use crate::voxel::edit::log::DEFAULT_HISTORY;

/// How the selected face is chosen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceMode {
    /// Free face nearest the palm, re-picked every frame. Holding the cycle
    /// pinch freezes the pick and each new press steps to the next face.
    #[default]
    Nearest,
    /// Sticky pick that only moves on a cycle press or when it stops being valid.
    Cycle,
}

/// Targeting parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// How strongly nearer voxels win over laterally closer ones
    pub depth_weight: f32,
    /// Voxels farther than this from the palm (view units, lateral) are ignored
    pub max_focus_distance: f32,
    pub face_mode: FaceMode,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            depth_weight: 0.3,
            max_focus_distance: 3.0,
            face_mode: FaceMode::Nearest,
        }
    }
}

/// Full engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Edge length of one grid cell
    pub grid_pitch: f32,
    /// Rotation gain multiplier
    pub sensitivity: f32,
    /// Per-frame velocity decay for orbit inertia
    pub damping: f32,
    /// Detector label of the hand that orbits the view
    pub orbit_hand: Handedness,
    /// Detector label of the hand that builds
    pub build_hand: Handedness,
    pub orbit_hand_enabled: bool,
    pub build_hand_enabled: bool,
    /// Scale from normalized image units to view units
    pub palm_scale: f32,
    /// Thumb-to-fingertip distance that counts as a pinch
    pub pinch_threshold: f32,
    /// Wrist-to-fingertip distance that counts as an open hand
    pub open_hand_threshold: f32,
    pub zoom: ZoomBand,
    pub targeting: TargetingConfig,
    pub bindings: GestureBindings,
    /// Number of edits kept for undo
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_pitch: DEFAULT_GRID_PITCH,
            sensitivity: 1.0,
            damping: 0.95,
            orbit_hand: Handedness::Left,
            build_hand: Handedness::Right,
            orbit_hand_enabled: true,
            build_hand_enabled: true,
            palm_scale: DEFAULT_PALM_SCALE,
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            open_hand_threshold: DEFAULT_OPEN_THRESHOLD,
            zoom: ZoomBand::default(),
            targeting: TargetingConfig::default(),
            bindings: GestureBindings::default(),
            history_capacity: DEFAULT_HISTORY,
        }
    }
}

impl EngineConfig {
    /// Detector label assigned to a role
    pub fn hand_for(&self, role: HandRole) -> Handedness {
        match role {
            HandRole::Orbit => self.orbit_hand,
            HandRole::Build => self.build_hand,
        }
    }

    /// Whether a role is currently enabled
    pub fn is_enabled(&self, role: HandRole) -> bool {
        match role {
            HandRole::Orbit => self.orbit_hand_enabled,
            HandRole::Build => self.build_hand_enabled,
        }
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f32) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::Config(format!("{} must be positive, got {}", name, value)))
            }
        }

        positive("grid_pitch", self.grid_pitch)?;
        positive("sensitivity", self.sensitivity)?;
        positive("palm_scale", self.palm_scale)?;
        positive("pinch_threshold", self.pinch_threshold)?;
        positive("open_hand_threshold", self.open_hand_threshold)?;
        positive("zoom.min", self.zoom.min)?;
        positive("zoom.step", self.zoom.step)?;
        positive("targeting.max_focus_distance", self.targeting.max_focus_distance)?;

        if !(0.0..=1.0).contains(&self.damping) {
            return Err(Error::Config(format!("damping must be in [0, 1], got {}", self.damping)));
        }
        if !(self.zoom.min < self.zoom.max) {
            return Err(Error::Config(format!(
                "zoom.min ({}) must be below zoom.max ({})",
                self.zoom.min, self.zoom.max
            )));
        }
        if !(self.zoom.min..=self.zoom.max).contains(&self.zoom.initial) {
            return Err(Error::Config(format!(
                "zoom.initial ({}) outside [{}, {}]",
                self.zoom.initial, self.zoom.min, self.zoom.max
            )));
        }
        if !self.targeting.depth_weight.is_finite() || self.targeting.depth_weight < 0.0 {
            return Err(Error::Config(format!(
                "targeting.depth_weight must be non-negative, got {}",
                self.targeting.depth_weight
            )));
        }
        if self.orbit_hand == self.build_hand {
            return Err(Error::Config("orbit_hand and build_hand must differ".to_string()));
        }
        Ok(())
    }

    /// Parse and validate from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Load and validate from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config = Self::from_value(serde_json::from_reader(BufReader::new(file))?)?;
        log::info!("Loaded engine config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Only an object is accepted; serde would otherwise fill fields from an
    /// array by position.
    fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::Config("engine config must be a JSON object".to_string()));
        }
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Write to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
