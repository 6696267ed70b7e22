//! CurseForge project lookup and mod file retrieval.

use super::http::HttpClient;
use super::stream::download_file;
use anyhow::{Result, bail};
use log::debug;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const PROJECT_LOOKUP_URL: &str = "https://mods.curse.com/project";
const PROJECT_FILES_URL: &str = "https://minecraft.curseforge.com/projects";

/// Extract the project slug from a redirect target.
///
/// The slug is the last path segment with its leading `<digits>-` id prefix
/// stripped, percent-decoded. `.../123456-example-mod-name` gives
/// `example-mod-name`.
pub fn slug_from_location(location: &str) -> String {
    static ID_PREFIX: OnceLock<Regex> = OnceLock::new();
    let id_prefix = ID_PREFIX.get_or_init(|| Regex::new(r"^\d+-").expect("static pattern"));

    let segment = location.rsplit('/').next().unwrap_or("");
    let stripped = id_prefix.replace(segment, "");
    percent_decode_str(&stripped).decode_utf8_lossy().into_owned()
}

/// Resolve a numeric project id to its slug via the lookup host's redirect.
pub async fn resolve_project_slug(client: &HttpClient, project_id: u64) -> Result<String> {
    let page = match client
        .fetch(&format!("{PROJECT_LOOKUP_URL}/{project_id}"))
        .await
    {
        Ok(page) => page,
        Err(err) => {
            debug!("project {project_id} lookup failed: {err}");
            bail!("noloc");
        }
    };
    debug!(
        "project {project_id} lookup: {} ({} body bytes)",
        page.status,
        page.body.len()
    );

    let Some(location) = page.location else {
        bail!("noloc");
    };

    let slug = slug_from_location(&location);
    if slug.is_empty() {
        bail!("failed");
    }
    Ok(slug)
}

/// Fetch one mod archive into `mods_dir`, given its project and file ids.
pub async fn fetch_mod_file(
    client: &HttpClient,
    project_id: u64,
    file_id: u64,
    mods_dir: &Path,
) -> Result<String> {
    let slug = resolve_project_slug(client, project_id).await?;
    download_file(
        client,
        &format!("{PROJECT_FILES_URL}/{slug}/files/{file_id}/download"),
        mods_dir,
        &format!("{file_id}.jar"),
    )
    .await
}
