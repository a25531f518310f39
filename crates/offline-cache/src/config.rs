//! Worker Configuration
//!
//! The cache name carries the version. Bumping it makes the next activation
//! evict every older bucket.

/// Versioned cache bucket name
pub const CACHE_NAME: &str = "checklist-creator-v1";

/// Application shell, precached on install
pub const SHELL_ASSETS: &[&str] = &[
    "/",
    "/manifest.json",
    "/icon-192.png",
    "/icon-512.png",
    "/globals.css",
];

/// Requests whose URL contains this marker get no offline fallback
pub const API_MARKER: &str = "/api/";

/// Cached document served when a page request cannot be answered
pub const FALLBACK_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    pub cache_name: String,
    pub shell_assets: Vec<String>,
    pub api_marker: String,
    pub fallback_path: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            cache_name: CACHE_NAME.to_string(),
            shell_assets: SHELL_ASSETS.iter().map(|path| path.to_string()).collect(),
            api_marker: API_MARKER.to_string(),
            fallback_path: FALLBACK_PATH.to_string(),
        }
    }
}

impl WorkerConfig {
    /// API requests propagate failures instead of falling back to the shell
    pub fn is_api_request(&self, url: &str) -> bool {
        url.contains(&self.api_marker)
    }
}
