use crate::request::{ActionRequest, DEFAULT_APP, DEFAULT_PREFIX};
use crate::transport::Transport;
use crate::types::{failure_to_error, Params, Payload, Response};
use crate::{ActionError, Result};

// ─── ActionClient ─────────────────────────────────────────────────────────

/// Turns `(action, params)` into an action URI, sends it through a
/// [`Transport`] and decodes the reply.
///
/// Every call is independent: one request goes out, one [`Response`] or one
/// error comes back. Nothing is retried or cached.
///
/// ```rust,ignore
/// use obsidian_actions::{ActionClient, Params, XcallTransport};
///
/// let client = ActionClient::new(XcallTransport::discover()?);
/// let mut params = Params::new();
/// params.insert("vault".into(), "Personal".into());
/// let tags = client.call("tags/list", params)?;
/// ```
pub struct ActionClient {
    transport: Box<dyn Transport>,
    app: String,
    prefix: String,
}

impl ActionClient {
    /// A client for `obsidian://actions-uri/...`.
    pub fn new(transport: impl Transport + 'static) -> Self {
        ActionClient {
            transport: Box::new(transport),
            app: DEFAULT_APP.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Target a different URI scheme (e.g. a renamed app).
    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = app.into();
        self
    }

    /// Replace the route prefix; an empty prefix puts the action directly
    /// after `app://`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Build the request for `action` without sending it.
    pub fn request(&self, action: &str, params: Params) -> Result<ActionRequest> {
        ActionRequest::new(&self.app, &self.prefix, action, params)
    }

    /// Run `action` with `params`.
    ///
    /// Fails with [`ActionError::Transport`] when nothing could be
    /// delivered, [`ActionError::Remote`] when the app reports failure, and
    /// [`ActionError::MalformedResponse`] when the reply cannot be decoded.
    pub fn call(&self, action: &str, params: Params) -> Result<Response> {
        let request = self.request(action, params)?;
        tracing::debug!(
            transport = self.transport.name(),
            uri = %request,
            "dispatching action"
        );
        let payload = self.transport.dispatch(&request)?;
        decode(action, payload)
    }

    /// Send a caller-built URI verbatim and decode the reply.
    pub fn call_uri(&self, uri: &str) -> Result<Response> {
        if !uri.contains("://") {
            return Err(ActionError::InvalidArguments(format!(
                "'{uri}' is not a full URI (missing '://')"
            )));
        }
        tracing::debug!(transport = self.transport.name(), uri, "dispatching raw URI");
        let payload = self.transport.dispatch_uri(uri)?;
        decode(uri, payload)
    }
}

fn decode(action: &str, payload: Payload) -> Result<Response> {
    let result = match payload {
        Payload::Success(text) => Response::from_payload(&text).and_then(Response::into_result),
        Payload::Failure(text) => Err(failure_to_error(&text)),
    };
    if let Err(e @ ActionError::Remote { .. }) = &result {
        tracing::warn!(action, error = %e, "action failed");
    }
    result
}

// ─── Tests ────────────────────────────────────────────────────────────────
