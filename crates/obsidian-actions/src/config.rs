use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::ActionClient;
use crate::http::HttpBridgeTransport;
use crate::request::{DEFAULT_APP, DEFAULT_PREFIX};
use crate::vault::Vault;
use crate::xcall::XcallTransport;
use crate::{ActionError, Result};

pub const CONFIG_DIR: &str = ".obsidian-actions";
pub const CONFIG_FILE: &str = "config.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// TransportConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportConfig {
    Xcall {
        /// Explicit `xcall` path; discovered when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        binary: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_secs: Option<u64>,
    },
    Http {
        base_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_secs: Option<u64>,
    },
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig::Xcall {
            binary: None,
            timeout_secs: None,
        }
    }
}

impl TransportConfig {
    pub fn timeout_secs(&self) -> Option<u64> {
        match self {
            TransportConfig::Xcall { timeout_secs, .. } => *timeout_secs,
            TransportConfig::Http { timeout_secs, .. } => *timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<String>,
    #[serde(default = "default_app")]
    pub app: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub transport: TransportConfig,
}

fn default_app() -> String {
    DEFAULT_APP.to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault: None,
            app: default_app(),
            prefix: default_prefix(),
            transport: TransportConfig::default(),
        }
    }
}

/// `~/.obsidian-actions/config.yaml`.
pub fn default_path() -> Result<PathBuf> {
    let home = home::home_dir()
        .ok_or_else(|| ActionError::Config("home directory not found: set HOME".to_string()))?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Write atomically through a tempfile in the target directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let dir = path.parent().unwrap_or(Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(data.as_bytes())?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.vault.as_deref().map_or(true, str::is_empty) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "no vault set; vault commands need --vault".to_string(),
            });
        }

        if self.app.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "app must not be empty".to_string(),
            });
        }

        if let TransportConfig::Http { base_url, .. } = &self.transport {
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!(
                        "transport.base_url '{base_url}' must start with http:// or https://"
                    ),
                });
            }
        }

        if self.transport.timeout_secs() == Some(0) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "transport.timeout_secs must be greater than 0".to_string(),
            });
        }

        warnings
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Build the configured transport and wrap it in a client.
    pub fn build_client(&self) -> Result<ActionClient> {
        if self.transport.timeout_secs() == Some(0) {
            return Err(ActionError::Config(
                "transport.timeout_secs must be greater than 0".to_string(),
            ));
        }
        let timeout = self.transport.timeout_secs().map(Duration::from_secs);
        let client = match &self.transport {
            TransportConfig::Xcall { binary, .. } => {
                let mut t = match binary {
                    Some(path) => XcallTransport::new(path),
                    None => XcallTransport::discover()?,
                };
                if let Some(d) = timeout {
                    t = t.with_timeout(d);
                }
                ActionClient::new(t)
            }
            TransportConfig::Http { base_url, .. } => {
                ActionClient::new(HttpBridgeTransport::new(base_url, timeout)?)
            }
        };
        Ok(client.with_app(&self.app).with_prefix(&self.prefix))
    }

    /// Build a client scoped to the configured vault.
    pub fn build_vault(&self) -> Result<Vault> {
        let name = self
            .vault
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ActionError::Config("no vault configured".to_string()))?;
        Ok(Vault::new(self.build_client()?, name))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load_or_default(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.app, "obsidian");
        assert_eq!(cfg.prefix, "actions-uri");
    }

    #[test]
    fn parses_http_transport() {
        let yaml = r#"
vault: Personal
transport:
  type: http
  base_url: http://127.0.0.1:27125
  timeout_secs: 5
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.vault.as_deref(), Some("Personal"));
        assert_eq!(
            cfg.transport,
            TransportConfig::Http {
                base_url: "http://127.0.0.1:27125".into(),
                timeout_secs: Some(5),
            }
        );
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.yaml");
        let cfg = Config {
            vault: Some("Work".into()),
            transport: TransportConfig::Xcall {
                binary: Some("/usr/local/bin/xcall".into()),
                timeout_secs: Some(30),
            },
            ..Default::default()
        };
        cfg.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), cfg);
    }

    #[test]
    fn validate_flags_missing_vault_as_warning() {
        let warnings = Config::default().validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
    }

    #[test]
    fn validate_flags_bad_bridge_and_zero_timeout() {
        let cfg = Config {
            vault: Some("v".into()),
            transport: TransportConfig::Http {
                base_url: "localhost:8080".into(),
                timeout_secs: Some(0),
            },
            ..Default::default()
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.level == WarnLevel::Error));
    }

    #[test]
    fn build_vault_requires_name() {
        let cfg = Config {
            transport: TransportConfig::Http {
                base_url: "http://127.0.0.1:1".into(),
                timeout_secs: None,
            },
            ..Default::default()
        };
        assert!(matches!(cfg.build_vault(), Err(ActionError::Config(_))));
    }

    #[test]
    fn build_client_uses_configured_transport() {
        let cfg = Config {
            transport: TransportConfig::Xcall {
                binary: Some("/opt/xcall".into()),
                timeout_secs: None,
            },
            ..Default::default()
        };
        assert_eq!(cfg.build_client().unwrap().transport_name(), "xcall");
    }

    #[test]
    fn build_client_rejects_zero_timeout() {
        let cfg = Config {
            transport: TransportConfig::Xcall {
                binary: Some("/opt/xcall".into()),
                timeout_secs: Some(0),
            },
            ..Default::default()
        };
        assert!(matches!(
            cfg.build_client(),
            Err(ActionError::Config(ref m)) if m.contains("greater than 0")
        ));
    }
}
