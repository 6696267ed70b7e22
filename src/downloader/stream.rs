//! Streaming file download with manual redirect handling.

use super::http::HttpClient;
use super::progress::{override_line, progress_bar};
use anyhow::{Result, bail};
use futures_util::StreamExt;
use log::debug;
use percent_encoding::percent_decode_str;
use reqwest::StatusCode;
use reqwest::header::LOCATION;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

/// The saved name is always the URL's last path segment, percent-decoded.
fn filename_from_url(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// Download `link` into `target`, following redirects until a real response.
///
/// `suggested_name` only labels the 404 error; the file on disk is named after
/// the final URL. An already-present file of that name short-circuits the
/// download. Returns the saved filename.
pub async fn download_file(
    client: &HttpClient,
    link: &str,
    target: &Path,
    suggested_name: &str,
) -> Result<String> {
    let mut current = Url::parse(link)?;

    loop {
        println!("Hitting {current}");
        let response = client.get(current.as_str()).await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if let Some(location) = location {
            current = current.join(&location)?;
            continue;
        }

        if response.status() == StatusCode::NOT_FOUND {
            bail!("Failed download of {suggested_name}");
        }

        let fname = filename_from_url(&current);
        let destination = target.join(&fname);
        if destination.exists() {
            debug!("{fname} already present, skipping download");
            return Ok(fname);
        }

        // No content length leaves the fraction NaN; the progress line shows it.
        let total = response
            .content_length()
            .map(|len| len as f64)
            .unwrap_or(f64::NAN);
        let total_mb = total / 1024.0 / 1024.0;

        let mut file = File::create(&destination).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => {
                    println!();
                    return Err(err.into());
                }
            };
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;

            let fraction = written as f64 / total;
            override_line(&format!(
                "Downloading {fname} {:.1}MB of {total_mb:.1}MB {}",
                written as f64 / 1024.0 / 1024.0,
                progress_bar(10, fraction)
            ));
        }
        file.flush().await?;

        override_line(&format!("Downloading {fname} {total_mb:.1}MB - DONE"));
        println!();
        return Ok(fname);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_the_last_path_segment() {
        let url = Url::parse("https://example.com/files/2291665/pack.zip").unwrap();
        assert_eq!(filename_from_url(&url), "pack.zip");
    }

    #[test]
    fn filename_is_percent_decoded() {
        let url = Url::parse("https://example.com/files/My%20Mod%20Pack.zip").unwrap();
        assert_eq!(filename_from_url(&url), "My Mod Pack.zip");
    }

    #[test]
    fn query_is_not_part_of_the_filename() {
        let url = Url::parse("https://example.com/dl/pack.zip?token=abc").unwrap();
        assert_eq!(filename_from_url(&url), "pack.zip");
    }
}
