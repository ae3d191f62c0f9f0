//! Configuration for the showcase binary.
//!
//! Provides [`ShowcaseConfig`], loaded from TOML files, environment
//! variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `SHOWCASE_CONFIG` environment variable
//! 3. XDG default: `~/.config/showcase/config.toml`
//! 4. Built-in defaults
//!
//! `SHOWCASE_<SECTION>_<KEY>` variables overlay string values of the file.
//! The deployment variables `CMS_API_BASE` and `CMS_API_TOKEN` are applied
//! last and win over everything else.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use showcase_cms::PocketBaseSettings;
use showcase_core::{Error, Result};
use showcase_web::SiteSettings;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SHOWCASE_CONFIG";

/// Legacy variable overriding `cms.api_base`.
pub const CMS_API_BASE_ENV: &str = "CMS_API_BASE";

/// Legacy variable overriding `cms.api_token`.
pub const CMS_API_TOKEN_ENV: &str = "CMS_API_TOKEN";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the showcase binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// CMS connection.
    pub cms: PocketBaseSettings,

    /// HTTP listener.
    pub server: ServerConfig,

    /// Page metadata.
    pub site: SiteSettings,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,

    /// IP address to bind to.
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl ServerConfig {
    /// The socket address to bind, with `port` overriding the configured one.
    pub fn socket_addr(&self, port: Option<u16>) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .map_err(|e| Error::config(format!("Invalid server.host '{}': {e}", self.host)))?;
        Ok(SocketAddr::new(ip, port.unwrap_or(self.port)))
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl ShowcaseConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::load_layers(Self::resolve_config_path(config_path))?;
        config.apply_legacy_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load the file (if present) and the `SHOWCASE_*` overlay.
    fn load_layers(path: Option<PathBuf>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = path {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("SHOWCASE");
        env_opts.add_section("cms");
        env_opts.add_section("server");
        env_opts.add_section("site");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))
    }

    /// Overlay `CMS_API_BASE` and `CMS_API_TOKEN` as read through `lookup`.
    /// Unset or blank values leave the loaded settings untouched.
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(base) = non_blank(CMS_API_BASE_ENV) {
            self.cms.api_base = base;
        }
        if let Some(token) = non_blank(CMS_API_TOKEN_ENV) {
            self.cms.api_token = token;
        }
    }

    /// Check the settings needed to talk to the CMS and serve pages.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API token is missing, the API
    /// base is not a usable URL, or the server host is not an IP address.
    pub fn validate(&self) -> Result<()> {
        if self.cms.api_token.trim().is_empty() {
            return Err(Error::config(format!(
                "Missing {CMS_API_TOKEN_ENV} environment variable (or cms.api_token in the config file)"
            )));
        }
        self.cms.file_resolver()?;
        self.server.socket_addr(None)?;
        Ok(())
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        resolve_path_with(explicit, |key| std::env::var(key).ok())
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("showcase").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Copy with the API token masked, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if !config.cms.api_token.is_empty() {
            config.cms.api_token = "********".to_string();
        }
        config
    }
}

fn resolve_path_with<F>(explicit: Option<&str>, lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }
    if let Some(path) = lookup(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    ShowcaseConfig::default_config_path()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn valid() -> ShowcaseConfig {
        let mut config = ShowcaseConfig::default();
        config.cms.api_token = "token".into();
        config
    }

    #[test]
    fn test_showcase_config_default() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.cms.api_base, "http://127.0.0.1:8090");
        assert!(config.cms.api_token.is_empty());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.site.title, "Product Showcase");
    }

    #[test]
    fn test_showcase_config_from_toml() {
        let config: ShowcaseConfig = toml::from_str(
            r#"
                [cms]
                api_base = "http://cms.internal:8090"
                api_token = "secret"
                thumb = ""
                timeout_secs = 5

                [server]
                port = 8080
                host = "0.0.0.0"

                [site]
                title = "Accounts"
            "#,
        )
        .unwrap();
        assert_eq!(config.cms.api_base, "http://cms.internal:8090");
        assert_eq!(config.cms.thumb, "");
        assert_eq!(config.cms.timeout_secs, Some(5));
        assert_eq!(config.cms.files_collection, "products");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.site.title, "Accounts");
        assert!(config.site.logo.is_empty());
    }

    #[test]
    fn test_showcase_config_to_toml() {
        let config = valid();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[cms]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("port = 3000"));

        let parsed: ShowcaseConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_layers_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
                [cms]
                api_token = "from-file"
                [server]
                port = 9090
            "#,
        );

        let config = ShowcaseConfig::load_layers(Some(path)).unwrap();
        assert_eq!(config.cms.api_token, "from-file");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_layers_missing_file_uses_defaults() {
        let config =
            ShowcaseConfig::load_layers(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.cms.thumb, "50x50");
    }

    #[test]
    fn test_legacy_env_overrides_file() {
        let mut config = valid();
        config.apply_legacy_env(lookup(&[
            (CMS_API_BASE_ENV, "http://cms:8090"),
            (CMS_API_TOKEN_ENV, "from-env"),
        ]));
        assert_eq!(config.cms.api_base, "http://cms:8090");
        assert_eq!(config.cms.api_token, "from-env");
    }

    #[test]
    fn test_legacy_env_ignores_blank_values() {
        let mut config = valid();
        config.apply_legacy_env(lookup(&[(CMS_API_TOKEN_ENV, "  "), (CMS_API_BASE_ENV, "")]));
        assert_eq!(config.cms.api_token, "token");
        assert_eq!(config.cms.api_base, "http://127.0.0.1:8090");
    }

    #[test]
    fn test_validate_requires_token() {
        let err = ShowcaseConfig::default().validate().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("CMS_API_TOKEN"));
    }

    #[test]
    fn test_validate_rejects_bad_base() {
        let mut config = valid();
        config.cms.api_base = "not a url".into();
        assert!(config.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_validate_rejects_bad_host() {
        let mut config = valid();
        config.server.host = "localhost".into();
        assert!(config.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_socket_addr_port_override() {
        let server = ServerConfig::default();
        assert_eq!(server.socket_addr(None).unwrap().port(), 3000);
        assert_eq!(
            server.socket_addr(Some(8081)).unwrap(),
            "127.0.0.1:8081".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = resolve_path_with(Some("/explicit/config.toml"), lookup(&[]));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_env() {
        let path = resolve_path_with(None, lookup(&[(CONFIG_ENV, "/env/config.toml")]));
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_default() {
        let path = resolve_path_with(None, lookup(&[]));
        if let Some(p) = path {
            assert!(p.ends_with("showcase/config.toml"));
        }
    }

    #[test]
    fn test_redacted_masks_token() {
        let redacted = valid().redacted();
        assert_eq!(redacted.cms.api_token, "********");
        assert!(ShowcaseConfig::default().redacted().cms.api_token.is_empty());
    }

    #[test]
    fn test_showcase_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShowcaseConfig>();
    }
}
