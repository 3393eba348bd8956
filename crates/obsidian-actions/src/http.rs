use std::time::Duration;

use crate::request::ActionRequest;
use crate::transport::Transport;
use crate::types::Payload;
use crate::{ActionError, Result};

const NAME: &str = "http";

/// Sends actions to an HTTP bridge that forwards them to Obsidian.
///
/// `obsidian://actions-uri/note/get?file=a.md` becomes
/// `GET <base_url>/actions-uri/note/get?file=a.md`.
#[derive(Debug, Clone)]
pub struct HttpBridgeTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpBridgeTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ActionError::Config(format!(
                "bridge URL must start with http:// or https://, got '{base_url}'"
            )));
        }
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| ActionError::transport(NAME, format!("failed to build client: {e}")))?;
        Ok(HttpBridgeTransport {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/{}?{}", self.base_url, path, query)
        }
    }

    fn get(&self, url: &str) -> Result<Payload> {
        tracing::debug!(url, "http bridge request");
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| {
                let what = if e.is_timeout() { "timed out" } else { "request failed" };
                ActionError::transport(NAME, format!("{what}: {e}"))
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ActionError::transport(NAME, format!("failed to read body: {e}")))?;

        if status.is_success() {
            return Ok(Payload::Success(body));
        }
        tracing::debug!(status = status.as_u16(), "http bridge returned failure");
        if body.trim().is_empty() {
            Ok(Payload::Failure(format!("bridge returned HTTP {status}")))
        } else {
            Ok(Payload::Failure(body))
        }
    }
}

impl Transport for HttpBridgeTransport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn dispatch(&self, request: &ActionRequest) -> Result<Payload> {
        self.get(&self.endpoint(&request.path(), &request.query()))
    }

    fn dispatch_uri(&self, uri: &str) -> Result<Payload> {
        let (_, rest) = uri.split_once("://").ok_or_else(|| {
            ActionError::InvalidArguments(format!("'{uri}' is not an action URI"))
        })?;
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        self.get(&self.endpoint(path, query))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Params, Scalar};
    use mockito::Matcher;

    fn note_get() -> ActionRequest {
        let mut params = Params::new();
        params.insert("file".into(), Scalar::from("notes/todo.md"));
        params.insert("vault".into(), Scalar::from("My Vault"));
        ActionRequest::new("obsidian", "actions-uri", "note/get", params).unwrap()
    }

    #[test]
    fn rejects_non_http_base() {
        let err = HttpBridgeTransport::new("obsidian://x", None).unwrap_err();
        assert!(matches!(err, ActionError::Config(_)));
    }

    #[test]
    fn maps_request_onto_path_and_query() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/actions-uri/note/get")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("file".into(), "notes/todo.md".into()),
                Matcher::UrlEncoded("vault".into(), "My Vault".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"success": true, "value": "body"}"#)
            .create();

        let transport = HttpBridgeTransport::new(&format!("{}/", server.url()), None).unwrap();
        let payload = transport.dispatch(&note_get()).unwrap();

        mock.assert();
        assert_eq!(
            payload,
            Payload::Success(r#"{"success": true, "value": "body"}"#.into())
        );
    }

    #[test]
    fn error_status_is_failure_payload() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", Matcher::Any)
            .with_status(404)
            .with_body(r#"{"errorCode": 404, "errorMessage": "Note not found"}"#)
            .create();

        let transport = HttpBridgeTransport::new(&server.url(), None).unwrap();
        let payload = transport.dispatch(&note_get()).unwrap();
        assert!(matches!(payload, Payload::Failure(ref b) if b.contains("Note not found")));
    }

    #[test]
    fn empty_error_body_reports_status() {
        let mut server = mockito::Server::new();
        server.mock("GET", Matcher::Any).with_status(500).create();

        let transport = HttpBridgeTransport::new(&server.url(), None).unwrap();
        let payload = transport.dispatch(&note_get()).unwrap();
        assert!(matches!(payload, Payload::Failure(ref b) if b.contains("500")));
    }

    #[test]
    fn raw_uri_is_forwarded() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/actions-uri/info")
            .match_query(Matcher::UrlEncoded("vault".into(), "v".into()))
            .with_body("{}")
            .create();

        let transport = HttpBridgeTransport::new(&server.url(), None).unwrap();
        transport
            .dispatch_uri("obsidian://actions-uri/info?vault=v")
            .unwrap();
        mock.assert();
    }

    #[test]
    fn unreachable_bridge_is_transport_error() {
        // Port 9 (discard) is closed on test machines.
        let transport =
            HttpBridgeTransport::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let err = transport.dispatch(&note_get()).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn silent_bridge_times_out() {
        // Connections queue in the backlog but are never answered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let transport =
            HttpBridgeTransport::new(&format!("http://{addr}"), Some(Duration::from_millis(200)))
                .unwrap();
        let started = std::time::Instant::now();
        let err = transport.dispatch(&note_get()).unwrap_err();

        assert!(err.is_transport());
        assert!(err.to_string().contains("timed out"), "{err}");
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }
}
