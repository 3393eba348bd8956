//! `obsidian-actions`: typed client for the Obsidian Actions URI plugin.
//!
//! The plugin (<https://github.com/czottmann/obsidian-actions-uri>) exposes
//! vault operations as `obsidian://actions-uri/<route>?...` URIs and answers
//! over x-callback-url. This crate builds those URIs, delivers them, and
//! decodes the callback payload.
//!
//! # Architecture
//!
//! ```text
//! Vault            ← typed routes (note/get, file/list, …), adds vault=<name>
//!     │
//!     ▼
//! ActionClient     ← validates the route, renders the URI, decodes the reply
//!     │
//!     ▼
//! dyn Transport    ← XcallTransport (local `xcall -url …`)
//!                    HttpBridgeTransport (GET <bridge>/<route>?…)
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use obsidian_actions::{ActionClient, Vault, XcallTransport};
//!
//! let client = ActionClient::new(XcallTransport::discover()?);
//! let vault = Vault::new(client, "Personal");
//! let note = vault.note_get("todo", false, true)?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod transport;
pub mod types;
pub mod vault;
pub mod xcall;

pub use client::ActionClient;
pub use config::{Config, ConfigWarning, TransportConfig, WarnLevel};
pub use error::{ActionError, Result};
pub use http::HttpBridgeTransport;
pub use request::{build_url, ActionRequest};
pub use transport::Transport;
pub use types::{Params, Payload, Response, Scalar};
pub use vault::{Args, NoteCreate, NoteInsert, Vault};
pub use xcall::{find_xcall, XcallTransport};
