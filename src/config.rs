use std::path::PathBuf;
use std::time::Duration;

use crate::image_fetch::DEFAULT_IMAGE_BASE_URL;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub image_base_url: String,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads `.env.local` and `.env` first, then the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("DATA_DIR")
            .and_then(non_empty)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let image_base_url = lookup("IMAGE_BASE_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());
        let timeout_secs = lookup("HTTP_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
            .clamp(1, 120);

        Self {
            data_dir,
            image_base_url,
            http_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

fn non_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn blank_and_invalid_values_are_ignored() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("DATA_DIR", "   "),
            ("HTTP_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn timeout_is_clamped() {
        let cfg = Config::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECS", "9999")]));
        assert_eq!(cfg.http_timeout, Duration::from_secs(120));
        let cfg = Config::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECS", "0")]));
        assert_eq!(cfg.http_timeout, Duration::from_secs(1));
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("DATA_DIR", "/srv/nonpb"),
            ("IMAGE_BASE_URL", "http://localhost:8080/img"),
        ]));
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/nonpb"));
        assert_eq!(cfg.image_base_url, "http://localhost:8080/img");
    }
}
