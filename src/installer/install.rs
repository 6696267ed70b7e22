//! The two installation phases: download mods, then merge overrides.

use super::models::Manifest;
use crate::downloader::curse::fetch_mod_file;
use crate::downloader::http::HttpClient;
use crate::utils::fs::{make_dir, patch_dirs, rmdir_all};
use anyhow::{Context, Result, anyhow};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything one install run needs, threaded explicitly through both phases.
struct InstallSession {
    pack_root: PathBuf,
    manifest: Manifest,
    overrides: String,
}

/// Phase 1: read the manifest, reconcile with any prior install, create the
/// target tree, and download every mod strictly one at a time. The first
/// failure aborts everything; on success phase 2 runs.
pub async fn install_pack(
    client: &HttpClient,
    work_root: &Path,
    pack_dir: &Path,
    zip_name: &str,
) -> Result<()> {
    println!("* Checking for manifest.json");
    let manifest = Manifest::load(&pack_dir.join("manifest.json")).map_err(|err| {
        debug!("manifest load failed: {err}");
        anyhow!("no manifest")
    })?;

    let name = manifest
        .name
        .clone()
        .unwrap_or_else(|| zip_name.to_string());
    println!(
        "Starting setup of modpack {name} version {} by {}..",
        manifest.version, manifest.author
    );

    let pack_root = resolve_install_root(work_root, pack_dir, zip_name, &name, &manifest)?;

    println!("* Getting mod list..");
    let files = manifest
        .files
        .clone()
        .filter(|files| !files.is_empty())
        .ok_or_else(|| anyhow!("No files in manifest"))?;

    println!("* Starting downloads..");
    let overrides = manifest
        .overrides
        .clone()
        .unwrap_or_else(|| String::from("overrides"));
    let session = InstallSession {
        pack_root,
        manifest,
        overrides,
    };

    make_dir(&session.pack_root.join("minecraft"))?;
    make_dir(&session.pack_root.join("minecraft").join("mods"))?;

    let mods_dir = session.pack_root.join("minecraft").join("mods");
    for (index, entry) in files.iter().enumerate() {
        let filename = fetch_mod_file(client, entry.project_id, entry.file_id, &mods_dir).await?;
        println!("[{}/{}] {filename} OK", index + 1, files.len());
    }

    println!("* Applying patches..");
    session.apply_overrides()
}

/// When the manifest names the pack differently from the zip, either merge the
/// extracted tree into the existing install of that name or rename it.
fn resolve_install_root(
    work_root: &Path,
    pack_dir: &Path,
    zip_name: &str,
    name: &str,
    manifest: &Manifest,
) -> Result<PathBuf> {
    if name == zip_name {
        return Ok(pack_dir.to_path_buf());
    }

    let install_root = work_root.join(name);
    if install_root.exists() {
        println!("Found an existing installation, checking for version..");
        let existing_manifest = install_root.join("manifest.json");
        let existing = Manifest::load(&existing_manifest)
            .with_context(|| format!("could not read {}", existing_manifest.display()))?;

        if existing.version != manifest.version {
            println!("This is a new version, removing old..");
            rmdir_all(&install_root.join("mods"))?;
            println!("Updating..");
        } else {
            println!("Version is current, verifying installation..");
        }
        patch_dirs(&install_root, pack_dir)?;
        rmdir_all(pack_dir)?;
    } else {
        fs::rename(pack_dir, &install_root)?;
    }
    Ok(install_root)
}

impl InstallSession {
    /// Phase 2: merge the overrides into `minecraft/`, drop the emptied
    /// overrides directory, and report. The success line always prints before
    /// the post-install instructions.
    fn apply_overrides(&self) -> Result<()> {
        let overrides_dir = self.pack_root.join(&self.overrides);
        let minecraft_dir = self.pack_root.join("minecraft");

        if overrides_dir.exists() {
            patch_dirs(&minecraft_dir, &overrides_dir)?;
        }

        println!("* Cleaning up..");
        rmdir_all(&overrides_dir)?;

        println!("Modpack downloaded successfully.");
        self.print_instructions();
        Ok(())
    }

    fn print_instructions(&self) {
        let minecraft = &self.manifest.minecraft;
        println!(
            "\nThis modpack requires Minecraft Version {}",
            minecraft.version
        );
        for loader in &minecraft.mod_loaders {
            println!("You'll also need: {} or later!", loader.id);
            if loader.id.starts_with("forge") {
                println!(
                    "Forge can be downloaded from http://files.minecraftforge.net/maven/net/minecraftforge/forge/index_{}.html",
                    minecraft.version
                );
            }
        }
        println!(
            "\nYour game is installed at `{}/minecraft`",
            self.pack_root.display()
        );
        println!(
            "Create a new profile on the Minecraft Launcher using this path and the mod loaders specified beforehand."
        );
    }
}
