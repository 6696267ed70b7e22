//! Top-level orchestration: fetch the pack archive, extract it, install it.

use super::install::install_pack;
use crate::downloader::http::HttpClient;
use crate::downloader::stream::download_file;
use crate::utils::archive::extract_zip;
use crate::utils::fs::make_dir;
use anyhow::{Result, bail};

/// Anything that is not a zip is rejected before extraction.
fn pack_name_from(filename: &str) -> Result<String> {
    if !filename.contains(".zip") {
        bail!("Unsupported archive: Most likely not a mod pack.");
    }
    Ok(filename.replacen(".zip", "", 1))
}

/// Install the modpack served by `<base_url>/files/latest`.
pub async fn install_from_url(base_url: &str) -> Result<()> {
    let client = HttpClient::new()?;
    let cwd = std::env::current_dir()?;

    make_dir(&cwd.join("packs"))?;

    let filename =
        download_file(&client, &format!("{base_url}/files/latest"), &cwd, "download").await?;
    let pack_name = pack_name_from(&filename)?;

    let pack_dir = cwd.join("packs").join(&pack_name);
    make_dir(&pack_dir)?;

    println!("* Extracting archive..");
    extract_zip(&cwd.join(&filename), &pack_dir).await?;
    tokio::fs::remove_file(cwd.join(&filename)).await?;

    install_pack(&client, &cwd.join("packs"), &pack_dir, &pack_name).await
}
