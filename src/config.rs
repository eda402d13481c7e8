use anyhow::Context;

/// Upstream used when `CLOUDFLARE_URI` is unset or empty.
pub const DEFAULT_UPSTREAM_URI: &str = "https://weathered-recipe-d2b6.elishasmile31472.workers.dev";

/// Matches the "Max 10MB" advertised on the upload page.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    /// Inference endpoint the proxy forwards images to.
    pub upstream_uri: String,
    /// Bearer token for the upstream. `None` means no `Authorization` header.
    pub api_token: Option<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let upstream_uri = get("CLOUDFLARE_URI").unwrap_or_else(|| DEFAULT_UPSTREAM_URI.to_string());
        let api_token = get("CLOUDFLARE_API");

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES is not a byte count: {raw:?}"))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            upstream_uri,
            api_token,
            max_upload_bytes,
        })
    }
}
