// src/config.rs
//! Fetch options and their optional file-based overrides.
//!
//! Options can be built in code (`FetchOptions::default()` + field edits) or
//! loaded from a TOML/JSON file. File lookup order:
//! 1) $MCHART_CONFIG_PATH
//! 2) config/mchart.toml
//! 3) config/mchart.json

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "MCHART_CONFIG_PATH";

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Options for one chart fetch.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FetchOptions {
    /// Extract cover image URLs. When false the image field is always empty.
    pub include_images: bool,
    /// Cap on extracted entries; `None` keeps everything the page yields.
    pub max_entries: Option<usize>,
    /// Substitute the default chart for unknown names instead of erroring.
    pub fallback_to_default: bool,
    /// Total fetch attempts for retryable HTTP outcomes.
    pub max_retries: u32,
    /// First retry delay; doubles per attempt.
    pub backoff_base_ms: u64,
    /// Ceiling for the doubled backoff delay.
    pub backoff_cap_ms: u64,
    /// Per-request HTTP timeout.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            include_images: true,
            max_entries: None,
            fallback_to_default: true,
            max_retries: 3,
            backoff_base_ms: 500,
            backoff_cap_ms: 8_000,
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Load options from an explicit path. Supports TOML or JSON.
pub fn load_options_from(path: &Path) -> Result<FetchOptions> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading fetch options from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_options(&content, ext.as_str())
}

/// Load options using env var + fallbacks; defaults when no file exists.
pub fn load_options_default() -> Result<FetchOptions> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_options_from(&pb);
        } else {
            return Err(anyhow!("MCHART_CONFIG_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/mchart.toml");
    if toml_p.exists() {
        return load_options_from(&toml_p);
    }
    let json_p = PathBuf::from("config/mchart.json");
    if json_p.exists() {
        return load_options_from(&json_p);
    }
    Ok(FetchOptions::default())
}

fn parse_options(s: &str, hint_ext: &str) -> Result<FetchOptions> {
    if hint_ext == "json" || s.trim_start().starts_with('{') {
        if let Ok(v) = serde_json::from_str(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = toml::from_str(s) {
        return Ok(v);
    }
    if let Ok(v) = serde_json::from_str(s) {
        return Ok(v);
    }
    Err(anyhow!("unsupported fetch options format"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn defaults_are_sane() {
        let o = FetchOptions::default();
        assert!(o.include_images);
        assert!(o.fallback_to_default);
        assert_eq!(o.max_retries, 3);
        assert_eq!(o.max_entries, None);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let o = parse_options("include_images = false\nmax_entries = 10\n", "toml").unwrap();
        assert!(!o.include_images);
        assert_eq!(o.max_entries, Some(10));
        assert_eq!(o.max_retries, 3);
    }

    #[test]
    fn json_form_parses() {
        let o = parse_options(r#"{ "max_retries": 5, "timeout_secs": 10 }"#, "json").unwrap();
        assert_eq!(o.max_retries, 5);
        assert_eq!(o.timeout_secs, 10);
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();

        env::remove_var(ENV_PATH);

        // No files in temp CWD -> pure defaults
        let v = load_options_default().unwrap();
        assert_eq!(v, FetchOptions::default());

        // Env var takes precedence
        let p_toml = tmp.path().join("mchart.toml");
        fs::write(&p_toml, "max_retries = 7\n").unwrap();
        env::set_var(ENV_PATH, p_toml.display().to_string());
        let v2 = load_options_default().unwrap();
        assert_eq!(v2.max_retries, 7);
        env::remove_var(ENV_PATH);

        env::set_current_dir(&old).unwrap();
    }
}
