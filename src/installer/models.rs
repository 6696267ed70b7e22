use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A modpack manifest, read once from `manifest.json` in the pack root.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: String,
    pub author: String,
    pub minecraft: MinecraftInfo,
    pub overrides: Option<String>,
    pub files: Option<Vec<ManifestFile>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MinecraftInfo {
    pub version: String,
    #[serde(rename = "modLoaders", default)]
    pub mod_loaders: Vec<ModLoader>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModLoader {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManifestFile {
    #[serde(rename = "projectID")]
    pub project_id: u64,
    #[serde(rename = "fileID")]
    pub file_id: u64,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
