//! Archive extraction using the system unzip command.

use anyhow::{Result, bail};
use std::path::Path;
use tokio::process::Command;

/// Extract a ZIP archive into `extract_path` with `unzip -q -o`.
pub async fn extract_zip(archive_path: &Path, extract_path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(extract_path).await?;

    let output = Command::new("unzip")
        .arg("-q")
        .arg("-o")
        .arg(archive_path)
        .arg("-d")
        .arg(extract_path)
        .output()
        .await?;

    if !output.status.success() {
        bail!("Failed to extract ZIP: {}", archive_path.display());
    }
    Ok(())
}
