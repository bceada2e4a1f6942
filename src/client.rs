// src/client.rs

//! HTTP client for the NASA APOD service
//!
//! Wraps a blocking reqwest client with a fixed timeout. Every operation is
//! a single round trip: a failed request is surfaced to the caller, never
//! retried.

use crate::error::{Error, Result};
use indicatif::ProgressBar;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, info};

/// Endpoint serving the Astronomy Picture of the Day
pub const APOD_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Buffer size for streaming downloads (8 KB)
const STREAM_BUFFER_SIZE: usize = 8192;

/// One day's APOD record as served by the remote API
///
/// Unknown response fields are ignored; only the descriptive metadata and
/// the asset location are consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct Descriptor {
    pub title: String,
    pub explanation: String,
    /// Location of the image asset
    pub url: String,
}

/// Outcome of probing the endpoint with an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    /// The endpoint accepted the key (HTTP 200)
    Valid,
    /// The endpoint rejected the key (HTTP 403)
    Forbidden,
    /// Any other response status
    Unexpected(u16),
}

/// HTTP client wrapper for the APOD endpoint and asset downloads
pub struct ApodClient {
    client: Client,
}

impl ApodClient {
    /// Create a new client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::InitError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch today's descriptor
    ///
    /// Exactly one attempt. A 403 is an authentication failure, any other
    /// non-2xx status is surfaced with its code.
    pub fn fetch_apod(&self, api_key: &str) -> Result<Descriptor> {
        debug!("Fetching APOD descriptor from {}", APOD_ENDPOINT);

        let response = self
            .client
            .get(APOD_ENDPOINT)
            .query(&[("api_key", api_key)])
            .send()
            .map_err(|e| Error::NetworkError(format!("Failed to reach {APOD_ENDPOINT}: {e}")))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(Error::AuthError(
                "the API rejected the configured key (403)".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(Error::UnexpectedStatus(status.as_u16()));
        }

        let descriptor: Descriptor = response
            .json()
            .map_err(|e| Error::ParseError(format!("Failed to parse APOD response: {e}")))?;

        info!("Fetched descriptor: {}", descriptor.title);
        Ok(descriptor)
    }

    /// Probe the endpoint to classify an API key
    pub fn probe_key(&self, api_key: &str) -> Result<KeyStatus> {
        debug!("Probing {} for key validity", APOD_ENDPOINT);

        let response = self
            .client
            .get(APOD_ENDPOINT)
            .query(&[("api_key", api_key)])
            .send()
            .map_err(|e| Error::NetworkError(format!("Failed to reach {APOD_ENDPOINT}: {e}")))?;

        let status = response.status();
        let key_status = if status.is_success() {
            KeyStatus::Valid
        } else if status == StatusCode::FORBIDDEN {
            KeyStatus::Forbidden
        } else {
            KeyStatus::Unexpected(status.as_u16())
        };
        Ok(key_status)
    }

    /// Download a URL into memory
    pub fn download_to_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.download_to_bytes_with_progress(url, None)
    }

    /// Download a URL into memory, streaming in chunks so an optional
    /// progress bar can track position
    pub fn download_to_bytes_with_progress(
        &self,
        url: &str,
        progress: Option<&ProgressBar>,
    ) -> Result<Vec<u8>> {
        debug!("Downloading {}", url);

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::DownloadError(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::DownloadError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let total_size = response.content_length().unwrap_or(0);
        if let Some(pb) = progress {
            if total_size > 0 {
                pb.set_length(total_size);
            }
        }

        let mut data = Vec::with_capacity(total_size as usize);
        let mut buffer = [0u8; STREAM_BUFFER_SIZE];
        loop {
            let bytes_read = response
                .read(&mut buffer)
                .map_err(|e| Error::DownloadError(format!("Failed to read response: {e}")))?;
            if bytes_read == 0 {
                break;
            }
            data.extend_from_slice(&buffer[..bytes_read]);
            if let Some(pb) = progress {
                pb.set_position(data.len() as u64);
            }
        }

        debug!("Downloaded {} bytes from {}", data.len(), url);
        Ok(data)
    }
}
