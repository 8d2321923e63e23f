//! Viewer configuration.
//!
//! Loaded once at startup from a TOML file; every field has a default so a
//! missing file or a partial file still yields a runnable viewer.

use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, LatticeResult};

/// Lattice generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Samples along each axis (total points = this cubed). Must be >= 2.
    pub samples_per_axis: u32,
    /// Lower bound of the lattice extent on every axis.
    pub min: f32,
    /// Upper bound of the lattice extent on every axis.
    pub max: f32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            samples_per_axis: 10,
            min: -0.7,
            max: 0.7,
        }
    }
}

/// Fixed camera parameters for the frame transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view, degrees.
    pub fov_y_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Camera pull-back along +z (the lattice is translated by -distance).
    pub distance: f32,
}

impl CameraConfig {
    /// Vertical field of view in radians.
    #[must_use]
    pub fn fov_y_radians(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            distance: 3.0,
        }
    }
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Window title.
    pub window_title: String,
    /// Initial window width in pixels.
    pub window_width: u32,
    /// Initial window height in pixels.
    pub window_height: u32,
    /// Target render cadence in frames per second.
    pub target_fps: u32,
    /// Clear color, linear RGBA.
    pub clear_color: [f64; 4],
    /// Lattice generation parameters.
    pub lattice: LatticeConfig,
    /// Camera parameters.
    pub camera: CameraConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: "LATTICE".to_string(),
            window_width: 1280,
            window_height: 720,
            target_fps: 60,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            lattice: LatticeConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidConfig`] if the text is not valid
    /// TOML or does not match the schema.
    pub fn from_toml_str(text: &str) -> LatticeResult<Self> {
        toml::from_str(text).map_err(|e| LatticeError::InvalidConfig(e.to_string()))
    }

    /// Loads a configuration file, falling back to defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidConfig`] if the file exists but
    /// cannot be read or parsed.
    pub fn load_or_default(path: &std::path::Path) -> LatticeResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| LatticeError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}
