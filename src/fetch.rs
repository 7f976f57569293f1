//! Page and image fetching with an on-disk cache.
//!
//! Fetch failures are not errors to the caller: they are logged and come back
//! as `None`, meaning "nothing to process". A cache hit returns the cached
//! content without touching the network.

use std::fs;
use std::path::Path;
use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{Error, Result};

/// Fetches text and binary resources, optionally through a cache file.
pub trait Fetcher {
    /// Fetch `url` as text decoded with `encoding` (UTF-8 when `None`).
    fn fetch_text(&self, url: &str, cache_path: Option<&Path>, encoding: Option<&str>) -> Option<String>;

    /// Fetch `url` as raw bytes.
    fn fetch_blob(&self, url: &str, cache_path: Option<&Path>) -> Option<Vec<u8>>;
}

/// [`Fetcher`] for `http(s):` URLs and local `file:` paths.
///
/// Text is cached as UTF-8 regardless of the source encoding.
#[derive(Debug, Clone)]
pub struct CachedFetcher {
    client: reqwest::blocking::Client,
}

impl CachedFetcher {
    /// Fetcher with a 30 second request timeout.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("obento_feed/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(path) = url.strip_prefix("file:") {
            log::debug!("Reading local file {}", path);
            return Ok(fs::read(path)?);
        }
        log::info!("GET {}", url);
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }

    fn text_uncached(&self, url: &str, encoding: Option<&str>) -> Result<String> {
        let bytes = self.get_bytes(url)?;
        decode(&bytes, encoding)
    }
}

impl Fetcher for CachedFetcher {
    fn fetch_text(&self, url: &str, cache_path: Option<&Path>, encoding: Option<&str>) -> Option<String> {
        if let Some(path) = cache_path.filter(|p| p.exists()) {
            log::debug!("Cache hit: {}", path.display());
            return fs::read_to_string(path)
                .map_err(|e| log::warn!("Failed to read cache {}: {}", path.display(), e))
                .ok();
        }

        let text = match self.text_uncached(url, encoding) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Failed to fetch {}: {}", url, e);
                return None;
            },
        };
        if let Some(path) = cache_path {
            store(path, text.as_bytes());
        }
        Some(text)
    }

    fn fetch_blob(&self, url: &str, cache_path: Option<&Path>) -> Option<Vec<u8>> {
        if let Some(path) = cache_path.filter(|p| p.exists()) {
            log::debug!("Cache hit: {}", path.display());
            return fs::read(path)
                .map_err(|e| log::warn!("Failed to read cache {}: {}", path.display(), e))
                .ok();
        }

        let bytes = match self.get_bytes(url) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to fetch {}: {}", url, e);
                return None;
            },
        };
        if let Some(path) = cache_path {
            store(path, &bytes);
        }
        Some(bytes)
    }
}

/// Decode `bytes` with the encoding named by `label`.
pub fn decode(bytes: &[u8], label: Option<&str>) -> Result<String> {
    let encoding = match label {
        Some(label) => Encoding::for_label(label.as_bytes())
            .ok_or_else(|| Error::Unsupported(format!("encoding '{}'", label)))?,
        None => UTF_8,
    };
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!("Malformed {} input replaced", actual.name());
    }
    Ok(text.into_owned())
}

/// Write a cache file; failure only costs a refetch next time.
fn store(path: &Path, content: &[u8]) {
    let result = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| fs::write(path, content));
    match result {
        Ok(()) => log::debug!("Cached {} bytes at {}", content.len(), path.display()),
        Err(e) => log::warn!("Failed to write cache {}: {}", path.display(), e),
    }
}
