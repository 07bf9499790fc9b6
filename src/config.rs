use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Context;
use serde::{Deserialize, Serialize};
/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "WAVEVIEW_CONFIG";
/// Picked up from the working directory when `CONFIG_ENV` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "waveview.json";
/// Render a single frame to disk instead of opening a window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub elapsed_ms: u64,
    pub width: u32,
    pub height: u32,
    pub path: PathBuf,
}
impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            elapsed_ms: 0,
            width: 640,
            height: 480,
            path: PathBuf::from("waveview.png"),
        }
    }
}
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
    pub snapshot: Option<SnapshotConfig>,
}
impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "waveview".to_owned(),
            width: 640.0,
            height: 480.0,
            min_width: 160.0,
            min_height: 120.0,
            snapshot: None,
        }
    }
}
impl ViewerConfig {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_path(Path::new(&path));
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            Self::from_path(fallback)
        } else {
            Ok(Self::default())
        }
    }
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config in {}", path.display()))
    }
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
