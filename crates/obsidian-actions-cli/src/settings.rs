use anyhow::Context;
use obsidian_actions::config::{self, Config, TransportConfig};
use obsidian_actions::{ActionClient, Vault};
use std::path::{Path, PathBuf};

/// Flag-level overrides applied on top of the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub vault: Option<String>,
    pub xcall: Option<PathBuf>,
    pub bridge: Option<String>,
    pub timeout: Option<u64>,
}

/// Resolved configuration for one invocation.
pub struct Settings {
    pub config: Config,
    pub path: PathBuf,
    pub json: bool,
}

/// Resolve the config file path.
///
/// Priority:
/// 1. `--config` flag / `OBSIDIAN_ACTIONS_CONFIG` env var (passed in as `explicit`)
/// 2. `~/.obsidian-actions/config.yaml`
pub fn resolve_path(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    Ok(config::default_path()?)
}

impl Settings {
    pub fn load(explicit: Option<&Path>, overrides: Overrides, json: bool) -> anyhow::Result<Self> {
        let path = resolve_path(explicit)?;
        let mut config = Config::load_or_default(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;
        apply(&mut config, overrides);
        Ok(Settings { config, path, json })
    }

    pub fn client(&self) -> anyhow::Result<ActionClient> {
        self.config
            .build_client()
            .context("failed to set up transport")
    }

    pub fn vault(&self) -> anyhow::Result<Vault> {
        if self.config.vault.as_deref().map_or(true, str::is_empty) {
            anyhow::bail!("no vault given: pass --vault, set OBSIDIAN_VAULT, or add `vault:` to the config");
        }
        self.config.build_vault().context("failed to set up vault")
    }
}

fn apply(config: &mut Config, overrides: Overrides) {
    if let Some(v) = overrides.vault {
        config.vault = Some(v);
    }
    let timeout = overrides.timeout.or(config.transport.timeout_secs());
    if let Some(base_url) = overrides.bridge {
        config.transport = TransportConfig::Http {
            base_url,
            timeout_secs: timeout,
        };
    } else if let Some(binary) = overrides.xcall {
        config.transport = TransportConfig::Xcall {
            binary: Some(binary),
            timeout_secs: timeout,
        };
    } else if overrides.timeout.is_some() {
        match &mut config.transport {
            TransportConfig::Xcall { timeout_secs, .. } => *timeout_secs = timeout,
            TransportConfig::Http { timeout_secs, .. } => *timeout_secs = timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let p = Path::new("/tmp/custom.yaml");
        assert_eq!(resolve_path(Some(p)).unwrap(), p);
    }

    #[test]
    fn bridge_overrides_xcall_and_keeps_timeout() {
        let mut cfg = Config {
            transport: TransportConfig::Xcall {
                binary: None,
                timeout_secs: Some(7),
            },
            ..Default::default()
        };
        apply(
            &mut cfg,
            Overrides {
                bridge: Some("http://localhost:1".into()),
                ..Default::default()
            },
        );
        assert_eq!(
            cfg.transport,
            TransportConfig::Http {
                base_url: "http://localhost:1".into(),
                timeout_secs: Some(7),
            }
        );
    }

    #[test]
    fn timeout_alone_updates_current_transport() {
        let mut cfg = Config::default();
        apply(
            &mut cfg,
            Overrides {
                vault: Some("Work".into()),
                timeout: Some(3),
                ..Default::default()
            },
        );
        assert_eq!(cfg.vault.as_deref(), Some("Work"));
        assert_eq!(cfg.transport.timeout_secs(), Some(3));
    }
}
