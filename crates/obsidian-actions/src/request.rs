//! Action URI construction.
//!
//! ```text
//! obsidian://actions-uri/note/get?file=notes%2Ftodo.md&vault=Personal
//! └──┬───┘   └───┬─────┘ └──┬───┘ └────────────────┬────────────────┘
//!   app        prefix     route        percent-encoded, sorted query
//! ```

use std::fmt;

use crate::types::{Params, Scalar};
use crate::{ActionError, Result};

pub const DEFAULT_APP: &str = "obsidian";
pub const DEFAULT_PREFIX: &str = "actions-uri";

/// A fully validated action, ready to be rendered for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    app: String,
    segments: Vec<String>,
    params: Params,
}

impl ActionRequest {
    /// Validate `route` and attach it under `prefix`.
    ///
    /// `route` is one or more `/`-separated identifiers, e.g. `note/get`.
    /// Float parameters must be finite.
    pub fn new(app: &str, prefix: &str, route: &str, params: Params) -> Result<Self> {
        if let Some((k, _)) = params
            .iter()
            .find(|(_, v)| matches!(v, Scalar::Float(x) if !x.is_finite()))
        {
            return Err(ActionError::InvalidArguments(format!(
                "parameter '{k}' is not a finite number"
            )));
        }
        let mut segments = split_route(prefix)?;
        let route_segments = split_route(route)?;
        if route_segments.is_empty() {
            return Err(ActionError::InvalidAction(route.to_string()));
        }
        segments.extend(route_segments);
        Ok(ActionRequest {
            app: short_app_name(app).to_string(),
            segments,
            params,
        })
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The `/`-joined path after `app://`.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Percent-encoded query string without the leading `?`; empty when
    /// there are no parameters.
    pub fn query(&self) -> String {
        encode_query(&self.params)
    }

    /// The `app://path?query` form dispatched to URI handlers.
    pub fn to_uri(&self) -> String {
        let query = self.query();
        if query.is_empty() {
            format!("{}://{}", self.app, self.path())
        } else {
            format!("{}://{}?{}", self.app, self.path(), query)
        }
    }
}

impl fmt::Display for ActionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

/// Build a URI from loose parts.
///
/// With no actions at all the bare scheme name is returned, which opens the
/// application without running anything. Parameters without actions are
/// rejected.
pub fn build_url(app: &str, actions: &[&str], params: &Params) -> Result<String> {
    if actions.is_empty() {
        if !params.is_empty() {
            return Err(ActionError::InvalidAction(
                "parameters given without an action".to_string(),
            ));
        }
        return Ok(short_app_name(app).to_string());
    }
    let route = actions.join("/");
    Ok(ActionRequest::new(app, "", &route, params.clone())?.to_uri())
}

fn short_app_name(app: &str) -> &str {
    app.strip_suffix(".app").unwrap_or(app)
}

fn split_route(route: &str) -> Result<Vec<String>> {
    if route.is_empty() {
        return Ok(Vec::new());
    }
    route
        .split('/')
        .map(|seg| {
            if is_identifier(seg) {
                Ok(seg.to_string())
            } else {
                Err(ActionError::InvalidAction(route.to_string()))
            }
        })
        .collect()
}

fn is_identifier(seg: &str) -> bool {
    !seg.is_empty()
        && seg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn encode_query(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), encode_value(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_value(v: &Scalar) -> String {
    urlencoding::encode(&v.to_string()).into_owned()
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, Scalar)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_params_produce_no_query() {
        let req = ActionRequest::new("obsidian", DEFAULT_PREFIX, "info", Params::new()).unwrap();
        assert_eq!(req.to_uri(), "obsidian://actions-uri/info");
        assert_eq!(req.query(), "");
    }

    #[test]
    fn params_are_sorted_and_encoded() {
        let req = ActionRequest::new(
            "obsidian",
            DEFAULT_PREFIX,
            "note/get",
            params(&[
                ("vault", "My Vault".into()),
                ("file", "notes/todo.md".into()),
                ("silent", true.into()),
            ]),
        )
        .unwrap();
        assert_eq!(
            req.to_uri(),
            "obsidian://actions-uri/note/get?file=notes%2Ftodo.md&silent=true&vault=My%20Vault"
        );
    }

    #[test]
    fn app_suffix_is_stripped() {
        let req = ActionRequest::new("Obsidian.app", "", "open", Params::new()).unwrap();
        assert_eq!(req.to_uri(), "Obsidian://open");
    }

    #[test]
    fn invalid_routes_are_rejected() {
        for bad in ["", "note//get", "note/get?x=1", "with space", "/info", "info/"] {
            let err = ActionRequest::new("obsidian", DEFAULT_PREFIX, bad, Params::new());
            assert!(
                matches!(err, Err(ActionError::InvalidAction(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn build_url_without_actions_is_bare_app() {
        assert_eq!(build_url("obsidian.app", &[], &Params::new()).unwrap(), "obsidian");
    }

    #[test]
    fn build_url_rejects_params_without_actions() {
        let p = params(&[("file", "a.md".into())]);
        assert!(build_url("obsidian", &[], &p).is_err());
    }

    #[test]
    fn build_url_joins_actions() {
        let p = params(&[("vault", "v".into())]);
        assert_eq!(
            build_url("obsidian", &["actions-uri", "command", "list"], &p).unwrap(),
            "obsidian://actions-uri/command/list?vault=v"
        );
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = ActionRequest::new(
                "obsidian",
                DEFAULT_PREFIX,
                "command/execute",
                params(&[("pause-in-secs", Scalar::Float(x))]),
            )
            .unwrap_err();
            assert!(
                matches!(err, ActionError::InvalidArguments(ref m) if m.contains("pause-in-secs")),
                "{x} should be rejected"
            );
        }
        let ok = ActionRequest::new(
            "obsidian",
            DEFAULT_PREFIX,
            "command/execute",
            params(&[("pause-in-secs", Scalar::Float(1.5))]),
        )
        .unwrap();
        assert_eq!(ok.query(), "pause-in-secs=1.5");
    }
}
