use crate::boundary::Polyline;
use crate::color::ThresholdClassifier;
use crate::geometry::{CameraView, PinholeCamera};
use crate::types::ObstacleSpan;
use crate::GoalParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DemoOutputConfig {
    pub json_out: Option<PathBuf>,
    /// Frame with the candidate and accepted spots outlined.
    pub overlay: Option<PathBuf>,
}

/// Inputs of one `goal_demo` run.
#[derive(Clone, Debug, Deserialize)]
pub struct DemoConfig {
    pub input: PathBuf,
    pub camera: PinholeCamera,
    pub field_boundary: Polyline,
    #[serde(default)]
    pub view: CameraView,
    #[serde(default)]
    pub timestamp_ms: u64,
    #[serde(default)]
    pub classifier: ThresholdClassifier,
    #[serde(default)]
    pub body_contour: Option<Polyline>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpan>,
    #[serde(default)]
    pub params: GoalParams,
    #[serde(default)]
    pub output: DemoOutputConfig,
}

pub fn load_config(path: &Path) -> Result<DemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: DemoConfig = serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    if config.field_boundary.is_empty() {
        return Err(format!("Config {} has an empty field_boundary", path.display()));
    }
    Ok(config)
}
