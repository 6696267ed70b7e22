//! HTTP client construction and buffered fetches.
//!
//! Redirects are never followed automatically: the slug resolver and the
//! streaming downloader both read the `Location` header themselves.

use anyhow::Result;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, LOCATION};
use reqwest::{Client, StatusCode, redirect};

/// The download hosts expect a plain curl-style client.
const USER_AGENT: &str = "curl/7.53.1";

pub struct HttpClient {
    client: Client,
}

/// A fully buffered GET response.
pub struct FetchedPage {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,enq=0.5"));

        let client = Client::builder()
            .use_rustls_tls()
            .redirect(redirect::Policy::none())
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Issue a GET without consuming the body.
    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        Ok(self.client.get(url).send().await?)
    }

    /// Issue a GET and buffer the whole body in memory.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self.get(url).await?;
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        Ok(FetchedPage {
            status,
            location,
            body,
        })
    }
}
