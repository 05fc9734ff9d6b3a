//! Feed-facing configuration: placeholder photos and the demo server

use crate::feed::card::{DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_TEMPLATE, DEFAULT_SEED_BOUND};
use serde::Deserialize;
use std::net::SocketAddr;

// ─────────────────────────────────────────────────────────────────────────────
// Placeholder photos
// ─────────────────────────────────────────────────────────────────────────────

/// How post cards build their photo URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    /// URL template with `{seed}` and `{size}` placeholders
    pub url_template: String,
    /// Seeds are drawn from `[0, seed_bound)`
    pub seed_bound: u32,
    /// Photo edge in pixels
    pub size: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_IMAGE_TEMPLATE.to_string(),
            seed_bound: DEFAULT_SEED_BOUND,
            size: DEFAULT_IMAGE_SIZE,
        }
    }
}

/// `[image]` section as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileImage {
    pub url_template: Option<String>,
    pub seed_bound: Option<u32>,
    pub size: Option<u32>,
}

impl ImageConfig {
    pub fn from_file(file: FileImage) -> Self {
        let defaults = Self::default();

        let seed_bound = match file.seed_bound {
            Some(0) => {
                eprintln!(
                    "Warning: image.seed_bound must be positive, using {}",
                    defaults.seed_bound
                );
                defaults.seed_bound
            }
            Some(bound) => bound,
            None => defaults.seed_bound,
        };

        Self {
            url_template: file.url_template.unwrap_or(defaults.url_template),
            seed_bound,
            size: file.size.unwrap_or(defaults.size),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Demo server
// ─────────────────────────────────────────────────────────────────────────────

/// Local posts server used by `--demo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Address to bind (port 0 picks a free port)
    pub bind_addr: SocketAddr,
    /// Size of the generated corpus; pages past the end are empty
    pub total_posts: u32,
    /// Artificial delay per request, to make the loading state visible
    pub latency_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            total_posts: 100,
            latency_ms: 400,
        }
    }
}

/// `[demo]` section as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDemo {
    pub bind_addr: Option<String>,
    pub total_posts: Option<u32>,
    pub latency_ms: Option<u64>,
}

impl DemoConfig {
    pub fn from_file(file: FileDemo) -> Self {
        let defaults = Self::default();

        let bind_addr = match file.bind_addr {
            Some(addr) => addr.parse().unwrap_or_else(|e| {
                eprintln!(
                    "Warning: invalid demo.bind_addr {:?} ({}), using {}",
                    addr, e, defaults.bind_addr
                );
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        Self {
            bind_addr,
            total_posts: file.total_posts.unwrap_or(defaults.total_posts),
            latency_ms: file.latency_ms.unwrap_or(defaults.latency_ms),
        }
    }
}
