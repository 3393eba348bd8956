//! Local transport through the `xcall` helper.
//!
//! `xcall` (<https://github.com/martinfinke/xcall>) opens an x-callback-url
//! and blocks until the target app calls back. An `x-success` callback is
//! printed to stdout as JSON, an `x-error` callback to stderr.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::request::ActionRequest;
use crate::transport::Transport;
use crate::types::Payload;
use crate::{ActionError, Result};

const NAME: &str = "xcall";
const APP_BINARY: &str = "xcall.app/Contents/MacOS/xcall";
const POLL_INTERVAL: Duration = Duration::from_millis(10);

// ─── Binary discovery ─────────────────────────────────────────────────────

/// Locations checked after `PATH`, in order.
pub fn default_app_locations() -> Vec<PathBuf> {
    let mut out = vec![Path::new("/Applications").join(APP_BINARY)];
    if let Some(home) = home::home_dir() {
        out.push(home.join("Applications").join(APP_BINARY));
    }
    out
}

/// Find the `xcall` binary: `PATH` first, then the app bundle locations.
pub fn find_xcall() -> Result<PathBuf> {
    if let Ok(path) = which::which("xcall") {
        return Ok(path);
    }
    find_in(&default_app_locations())
}

fn find_in(candidates: &[PathBuf]) -> Result<PathBuf> {
    for path in candidates {
        if path.exists() {
            if !is_executable_file(path) {
                return Err(ActionError::transport(
                    NAME,
                    format!("{} does not appear to be an executable file", path.display()),
                ));
            }
            return Ok(path.clone());
        }
    }
    Err(ActionError::transport(
        NAME,
        "did not find the `xcall` binary; install xcall.app from https://github.com/martinfinke/xcall",
    ))
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

// ─── XcallTransport ───────────────────────────────────────────────────────

/// Runs `xcall -url <uri>` once per request.
#[derive(Debug, Clone)]
pub struct XcallTransport {
    binary: PathBuf,
    timeout: Option<Duration>,
}

impl XcallTransport {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        XcallTransport {
            binary: binary.into(),
            timeout: None,
        }
    }

    /// Use the first `xcall` found by [`find_xcall`].
    pub fn discover() -> Result<Self> {
        Ok(Self::new(find_xcall()?))
    }

    /// Kill `xcall` and fail with a transport error when the app has not
    /// called back within `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn run(&self, uri: &str) -> Result<Payload> {
        tracing::debug!(binary = %self.binary.display(), uri, "spawning xcall");

        let mut child = Command::new(&self.binary)
            .arg("-url")
            .arg(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ActionError::transport(
                    NAME,
                    format!("failed to spawn {}: {e}", self.binary.display()),
                )
            })?;

        // Pipes are drained on their own threads while we wait.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // On timeout the readers are left detached: a grandchild of xcall can
        // keep the pipes open after the kill, and joining would block on it.
        let status = self.wait(&mut child)?;
        let out = collect(stdout)?;
        let err = collect(stderr)?;

        if !err.trim().is_empty() {
            tracing::debug!(stderr = %err.trim(), "xcall reported x-error");
            return Ok(Payload::Failure(err));
        }
        if !status.success() {
            return Err(ActionError::transport(
                NAME,
                match status.code() {
                    Some(code) => format!("xcall exited with code {code}"),
                    None => "xcall terminated by signal".to_string(),
                },
            ));
        }
        Ok(Payload::Success(out))
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        let io_err = |e: std::io::Error| ActionError::transport(NAME, e.to_string());
        let Some(timeout) = self.timeout else {
            return child.wait().map_err(io_err);
        };

        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait().map_err(io_err)? {
                return Ok(status);
            }
            if started.elapsed() >= timeout {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(timeout_ms = timeout.as_millis() as u64, "xcall timed out");
                return Err(ActionError::transport(
                    NAME,
                    format!("no callback within {}ms", timeout.as_millis()),
                ));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Transport for XcallTransport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn dispatch(&self, request: &ActionRequest) -> Result<Payload> {
        self.run(&request.to_uri())
    }

    fn dispatch_uri(&self, uri: &str) -> Result<Payload> {
        self.run(uri)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<std::io::Result<String>>> {
    pipe.map(|mut r| {
        thread::spawn(move || {
            let mut buf = String::new();
            r.read_to_string(&mut buf)?;
            Ok(buf)
        })
    })
}

fn collect(handle: Option<JoinHandle<std::io::Result<String>>>) -> Result<String> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };
    handle
        .join()
        .map_err(|_| ActionError::transport(NAME, "pipe reader panicked"))?
        .map_err(|e| ActionError::transport(NAME, format!("failed to read xcall output: {e}")))
}

// ─── Tests ────────────────────────────────────────────────────────────────
