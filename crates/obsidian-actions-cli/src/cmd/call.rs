use crate::output::{print_json, print_value};
use crate::settings::Settings;
use anyhow::Context;
use obsidian_actions::{ActionRequest, Params, Scalar};

/// Parse a `key=value` pair given with `-p`.
pub fn parse_param(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn params(settings: &Settings, pairs: Vec<(String, String)>, no_vault: bool) -> Params {
    let mut params: Params = pairs
        .into_iter()
        .map(|(k, v)| (k, Scalar::Str(v)))
        .collect();
    if !no_vault {
        if let Some(vault) = settings.config.vault.as_deref().filter(|v| !v.is_empty()) {
            params
                .entry("vault".to_string())
                .or_insert_with(|| Scalar::from(vault));
        }
    }
    params
}

// ---------------------------------------------------------------------------
// call
// ---------------------------------------------------------------------------

pub fn run_call(
    settings: &Settings,
    route: &str,
    pairs: Vec<(String, String)>,
    no_vault: bool,
) -> anyhow::Result<()> {
    let client = settings.client()?;
    let response = client
        .call(route, params(settings, pairs, no_vault))
        .with_context(|| format!("'{route}' failed"))?;
    if settings.json {
        return print_json(&response);
    }
    print_value(response.value.as_ref(), false)
}

// ---------------------------------------------------------------------------
// url
// ---------------------------------------------------------------------------

pub fn run_url(
    settings: &Settings,
    route: &str,
    pairs: Vec<(String, String)>,
    no_vault: bool,
) -> anyhow::Result<()> {
    let cfg = &settings.config;
    let request = ActionRequest::new(&cfg.app, &cfg.prefix, route, params(settings, pairs, no_vault))?;
    if settings.json {
        return print_json(&serde_json::json!({
            "uri": request.to_uri(),
            "path": request.path(),
            "params": request.params(),
        }));
    }
    println!("{request}");
    Ok(())
}

// ---------------------------------------------------------------------------
// open-uri
// ---------------------------------------------------------------------------

pub fn run_uri(settings: &Settings, uri: &str) -> anyhow::Result<()> {
    let response = settings
        .client()?
        .call_uri(uri)
        .with_context(|| format!("'{uri}' failed"))?;
    if settings.json {
        return print_json(&response);
    }
    print_value(response.value.as_ref(), false)
}
