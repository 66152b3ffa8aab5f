//! Image assets for the export backend.
//!
//! The exported page has to be self-contained, so every portrait referenced by
//! the render tree is resolved to decoded pixels before emission:
//! - `data:` URLs are decoded in place; a malformed one is a render failure
//! - `http(s)` URLs go through an `AssetResolver`; unreachable ones are omitted
//! - anything else (relative paths, `blob:` URLs) is omitted with a warning
//!
//! The HTTP resolver only connects to public addresses. Hostnames are checked
//! after DNS resolution, IP literals before the request, and every redirect
//! hop the same way.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use bytes::Bytes;
use image::RgbaImage;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use reqwest::{redirect, Client, Url};
use thiserror::Error;
use tracing::{debug, warn};

use crate::imaging::transparency::decode_capped;
use crate::layout::tree::{Block, RenderTree};
use crate::render::RenderError;

const MAX_REDIRECTS: usize = 5;

pub type ImageAssets = HashMap<String, RgbaImage>;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("asset exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("invalid asset URL: {0}")]
    InvalidUrl(String),

    #[error("{0} is not a public address")]
    Blocked(String),
}

/// Fetches remote assets. Carried in `AppState` as `Arc<dyn AssetResolver>`.
#[async_trait]
pub trait AssetResolver: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, AssetError>;
}

pub struct HttpAssetResolver {
    client: Client,
    max_bytes: usize,
}

impl HttpAssetResolver {
    pub fn new(timeout: Duration, max_bytes: usize) -> anyhow::Result<Self> {
        let redirects = redirect::Policy::custom(|attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else if let Some(ip) = literal_ip(attempt.url()).filter(|ip| !is_public_ip(*ip)) {
                attempt.error(AssetError::Blocked(ip.to_string()))
            } else {
                attempt.follow()
            }
        });
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirects)
            .dns_resolver(Arc::new(PublicOnly))
            .build()?;
        Ok(Self { client, max_bytes })
    }
}

/// Whether an address may be fetched from. Loopback, private, link-local,
/// shared (CGNAT), documentation, multicast and unspecified ranges are not.
pub fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, ..] = v4.octets();
            !(v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_multicast()
                || v4.is_documentation()
                || a == 0
                || (a == 100 && (b & 0xc0) == 64))
        }
        IpAddr::V6(v6) => {
            if let Some(v4) = v6.to_ipv4_mapped() {
                return is_public_ip(IpAddr::V4(v4));
            }
            let first = v6.segments()[0];
            !(v6.is_loopback()
                || v6.is_unspecified()
                || v6.is_multicast()
                || (first & 0xfe00) == 0xfc00
                || (first & 0xffc0) == 0xfe80)
        }
    }
}

/// The host of `url` when it is an IP literal. Those never reach the resolver.
fn literal_ip(url: &Url) -> Option<IpAddr> {
    url.host_str()?
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .ok()
}

/// DNS resolver that drops non-public addresses.
struct PublicOnly;

impl Resolve for PublicOnly {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(public_addrs(name.as_str().to_string()))
    }
}

async fn public_addrs(host: String) -> Result<Addrs, Box<dyn std::error::Error + Send + Sync>> {
    let public: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), 0))
        .await?
        .filter(|addr| is_public_ip(addr.ip()))
        .collect();
    if public.is_empty() {
        return Err(Box::new(AssetError::Blocked(host)));
    }
    Ok(Box::new(public.into_iter()))
}

#[async_trait]
impl AssetResolver for HttpAssetResolver {
    async fn fetch(&self, url: &str) -> Result<Bytes, AssetError> {
        let parsed = Url::parse(url.trim()).map_err(|e| AssetError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AssetError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        if let Some(ip) = literal_ip(&parsed).filter(|ip| !is_public_ip(*ip)) {
            return Err(AssetError::Blocked(ip.to_string()));
        }
        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status(status.as_u16()));
        }
        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            return Err(AssetError::TooLarge {
                limit: self.max_bytes,
            });
        }
        let body = response.bytes().await?;
        if body.len() > self.max_bytes {
            return Err(AssetError::TooLarge {
                limit: self.max_bytes,
            });
        }
        debug!(url, bytes = body.len(), "Fetched image asset");
        Ok(body)
    }
}

/// Distinct image sources in emission order.
pub fn image_sources(tree: &RenderTree) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for block in tree.regions.iter().flat_map(|r| r.blocks.iter()) {
        if let Block::Header(header) = block {
            if let Some(image) = &header.image {
                if !sources.contains(&image.src) {
                    sources.push(image.src.clone());
                }
            }
        }
    }
    sources
}

/// Decodes a base64 `data:` URL into raw bytes.
pub fn decode_data_url(src: &str) -> Result<Vec<u8>, RenderError> {
    let rest = src
        .strip_prefix("data:")
        .ok_or_else(|| RenderError::DataUrl("missing 'data:' prefix".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| RenderError::DataUrl("missing ',' separator".to_string()))?;
    if !meta.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(RenderError::DataUrl(
            "only base64 data URLs can carry images".to_string(),
        ));
    }
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| RenderError::DataUrl(e.to_string()))
}

pub fn is_remote(src: &str) -> bool {
    let lower = src.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Collects raw bytes for every image in the tree.
pub async fn fetch_image_bytes(
    tree: &RenderTree,
    resolver: &dyn AssetResolver,
) -> Result<HashMap<String, Vec<u8>>, RenderError> {
    let mut raw = HashMap::new();
    for src in image_sources(tree) {
        let bytes = if src.starts_with("data:") {
            decode_data_url(&src)?
        } else if is_remote(&src) {
            match resolver.fetch(&src).await {
                Ok(body) => body.to_vec(),
                Err(e) => {
                    warn!(src = %src, "Profile image unreachable, omitted from export: {e}");
                    continue;
                }
            }
        } else {
            warn!(src = %src, "Unsupported image source, omitted from export");
            continue;
        };
        raw.insert(src, bytes);
    }
    Ok(raw)
}

/// Decodes fetched bytes, refusing images over `max_pixels` before decoding.
/// CPU-bound; run on a blocking thread.
pub fn decode_images(
    raw: HashMap<String, Vec<u8>>,
    max_pixels: u64,
) -> Result<ImageAssets, RenderError> {
    raw.into_iter()
        .map(|(src, bytes)| {
            let decoded = decode_capped(&bytes, max_pixels).map_err(|e| RenderError::ImageDecode {
                src: truncate_src(&src),
                reason: e.to_string(),
            })?;
            Ok((src, decoded))
        })
        .collect()
}

/// Data URLs can be megabytes long; keep error messages readable.
fn truncate_src(src: &str) -> String {
    const MAX: usize = 64;
    if src.len() <= MAX {
        return src.to_string();
    }
    let cut = (0..=MAX).rev().find(|i| src.is_char_boundary(*i)).unwrap_or(0);
    format!("{}…", &src[..cut])
}
