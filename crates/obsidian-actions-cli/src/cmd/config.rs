use crate::output::print_json;
use crate::settings::Settings;
use anyhow::Context;
use clap::Subcommand;
use obsidian_actions::config::{Config, TransportConfig, WarnLevel};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration (file plus flags)
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Write a config file from the current flags
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(settings: &Settings, subcmd: ConfigSubcommand) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(settings),
        ConfigSubcommand::Validate => validate(settings),
        ConfigSubcommand::Init { force } => init(settings, force),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(settings: &Settings) -> anyhow::Result<()> {
    let cfg = &settings.config;
    if settings.json {
        return print_json(&serde_json::json!({
            "path": settings.path,
            "config": cfg,
        }));
    }

    println!("Config file: {}", settings.path.display());
    println!("  vault:     {}", cfg.vault.as_deref().unwrap_or("(none)"));
    println!("  app:       {}", cfg.app);
    println!("  prefix:    {}", cfg.prefix);
    match &cfg.transport {
        TransportConfig::Xcall {
            binary,
            timeout_secs,
        } => {
            let binary = binary
                .as_ref()
                .map(|b| b.display().to_string())
                .unwrap_or_else(|| "(auto-detect)".to_string());
            println!("  transport: xcall ({binary})");
            print_timeout(*timeout_secs);
        }
        TransportConfig::Http {
            base_url,
            timeout_secs,
        } => {
            println!("  transport: http ({base_url})");
            print_timeout(*timeout_secs);
        }
    }
    Ok(())
}

fn print_timeout(timeout_secs: Option<u64>) {
    match timeout_secs {
        Some(t) => println!("  timeout:   {t}s"),
        None => println!("  timeout:   none"),
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(settings: &Settings) -> anyhow::Result<()> {
    let warnings = settings.config.validate();

    if settings.json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(settings: &Settings, force: bool) -> anyhow::Result<()> {
    if settings.path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            settings.path.display()
        );
    }
    let cfg: &Config = &settings.config;
    cfg.save(&settings.path)
        .with_context(|| format!("failed to write {}", settings.path.display()))?;
    println!("Wrote {}", settings.path.display());
    Ok(())
}
