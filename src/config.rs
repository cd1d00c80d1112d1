use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::theme::Theme;

const RECENT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub graphql_endpoint: Option<String>,
    pub graphql_ws_endpoint: Option<String>,
    pub theme: Option<Theme>,
    #[serde(default)]
    pub recent_searches: Vec<String>,
    /// Where `save` writes. `None` keeps the config in memory only.
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Config {
    /// Returns the config directory path (~/.config/chainview on Linux)
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("chainview"))
            .context("Could not determine config directory")
    }

    /// Load config from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from `path`, or a default bound to `path` if it is missing
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {path:?}"))?;
            toml::from_str::<Self>(&contents).context("Failed to parse config file")?
        } else {
            Self::default()
        };

        config.path = Some(path);
        Ok(config)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {dir:?}"))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {path:?}"))?;

        Ok(())
    }

    /// Set the endpoints and persist. An empty websocket URL clears it.
    pub fn set_endpoint(&mut self, url: String, ws_url: Option<String>) -> Result<()> {
        self.graphql_endpoint = Some(url);
        if let Some(ws) = ws_url {
            self.graphql_ws_endpoint = Some(ws).filter(|s| !s.trim().is_empty());
        }
        self.save()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = Some(theme);
        self.save()
    }

    /// Add a search to recent history (keeps last 10)
    pub fn add_recent_search(&mut self, query: String) -> Result<()> {
        self.recent_searches.retain(|s| s != &query);
        self.recent_searches.insert(0, query);
        self.recent_searches.truncate(RECENT_SEARCH_LIMIT);
        self.save()
    }
}

/// HTTP and websocket endpoints must be absolute URLs with the right scheme.
pub fn validate_endpoint(url: &str, schemes: &[&str]) -> Result<()> {
    let parsed = reqwest::Url::parse(url.trim()).with_context(|| format!("Invalid URL: {url}"))?;
    if !schemes.contains(&parsed.scheme()) {
        anyhow::bail!(
            "Unsupported scheme {:?}, expected one of {}",
            parsed.scheme(),
            schemes.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("chainview-test-{}-{name}", std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn test_in_memory_config_never_writes() {
        let mut config = Config::default();
        config.add_recent_search("1".into()).unwrap();
        assert!(config.path().is_none());
    }

    #[test]
    fn test_recent_searches_dedup_and_limit() {
        let mut config = Config::default();
        for i in 0..12 {
            config.add_recent_search(i.to_string()).unwrap();
        }
        config.add_recent_search("5".into()).unwrap();

        assert_eq!(config.recent_searches.len(), 10);
        assert_eq!(config.recent_searches[0], "5");
        assert_eq!(config.recent_searches.iter().filter(|s| *s == "5").count(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_config_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        let mut config = Config::load_from(&path).unwrap();
        assert!(config.graphql_endpoint.is_none());
        config
            .set_endpoint(
                "http://localhost:8000/graphql".into(),
                Some("ws://localhost:8000/graphql".into()),
            )
            .unwrap();
        config.set_theme(Theme::Light).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.graphql_endpoint.as_deref(), Some("http://localhost:8000/graphql"));
        assert_eq!(reloaded.graphql_ws_endpoint.as_deref(), Some("ws://localhost:8000/graphql"));
        assert_eq!(reloaded.theme, Some(Theme::Light));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_empty_ws_clears() {
        let mut config = Config::default();
        config
            .set_endpoint("http://a".into(), Some("ws://b".into()))
            .unwrap();
        config.set_endpoint("http://a".into(), Some("".into())).unwrap();
        assert_eq!(config.graphql_ws_endpoint, None);
    }

    #[test]
    fn test_validate_endpoint() {
        assert!(validate_endpoint("http://localhost:8000/graphql", &["http", "https"]).is_ok());
        assert!(validate_endpoint("ws://localhost:8000/graphql", &["http", "https"]).is_err());
        assert!(validate_endpoint("localhost", &["http", "https"]).is_err());
    }
}
