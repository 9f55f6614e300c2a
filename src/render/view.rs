use std::path::PathBuf;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tiny_http::{Header, Response, Server};
use tracing::{debug, info, warn};

use crate::{
    discover::Fingerprints,
    pipeline::{Pipeline, PipelineError},
    render::markdown,
};

/// Errors raised while serving the interactive view.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The HTTP listener could not be started.
    #[error("failed to bind 127.0.0.1:{port}: {message}")]
    Bind {
        /// The requested port.
        port: u16,
        /// The underlying listener error.
        message: String,
    },

    /// The initial pipeline run failed; there is nothing to serve.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Payload of the `/api/document` endpoint.
#[derive(Debug, Serialize)]
struct DocumentPayload {
    version: String,
    markdown: String,
    warnings: Vec<String>,
    error: Option<String>,
}

/// The interactive single-page view of a document pipeline.
///
/// Serves an auto-refreshing page: the browser polls `/api/document` and
/// re-renders whenever the version digest changes. Every poll re-runs the
/// pipeline into a fresh document, so edits show up as soon as the
/// process producing them restarts; a failing rerun keeps the last good
/// document on screen and surfaces the error in the page.
///
/// The accept loop is single-threaded and synchronous; one request is
/// served at a time, which is all an authoring preview needs.
pub struct ViewServer<'a> {
    pipeline: &'a Pipeline,
    port: u16,
    watch_root: Option<PathBuf>,
}

impl<'a> ViewServer<'a> {
    /// Creates a view over the given pipeline.
    #[must_use]
    pub const fn new(pipeline: &'a Pipeline, port: u16) -> Self {
        Self {
            pipeline,
            port,
            watch_root: None,
        }
    }

    /// Also fingerprint document sources under `root`, logging when they
    /// change between polls.
    #[must_use]
    pub fn watch(mut self, root: impl Into<PathBuf>) -> Self {
        self.watch_root = Some(root.into());
        self
    }

    /// Runs the pipeline once, then serves the view until the process is
    /// terminated.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial pipeline run fails or the listener
    /// cannot bind.
    pub fn serve(&self) -> Result<(), ViewError> {
        let mut last_good = markdown::render(self.pipeline.run()?.snapshot());
        let mut last_error: Option<String> = None;
        let mut fingerprints = self.capture_fingerprints();

        let server = Server::http(("127.0.0.1", self.port)).map_err(|error| ViewError::Bind {
            port: self.port,
            message: error.to_string(),
        })?;
        info!("serving document view on http://127.0.0.1:{}", self.port);

        for request in server.incoming_requests() {
            let response = match request.url() {
                "/" => html_response(PAGE_SHELL),
                "/api/document" => {
                    self.refresh(&mut last_good, &mut last_error, &mut fingerprints);
                    json_response(&DocumentPayload {
                        version: version_of(&last_good.markdown),
                        markdown: last_good.markdown.clone(),
                        warnings: last_good
                            .warnings
                            .iter()
                            .map(ToString::to_string)
                            .collect(),
                        error: last_error.clone(),
                    })
                }
                _ => Response::from_string("not found").with_status_code(404),
            };
            if let Err(error) = request.respond(response) {
                warn!("failed to send response: {error}");
            }
        }
        Ok(())
    }

    /// Re-runs the pipeline; a failure keeps the previous document.
    fn refresh(
        &self,
        last_good: &mut markdown::Rendered,
        last_error: &mut Option<String>,
        fingerprints: &mut Option<Fingerprints>,
    ) {
        if let (Some(previous), Some(root)) = (fingerprints.as_ref(), &self.watch_root) {
            match Fingerprints::capture(root) {
                Ok(current) => {
                    let changed = current.changed_since(previous);
                    if !changed.is_empty() {
                        info!(files = changed.len(), "document sources changed");
                    }
                    *fingerprints = Some(current);
                }
                Err(error) => debug!("fingerprint capture failed: {error}"),
            }
        }

        match self.pipeline.run() {
            Ok(document) => {
                *last_good = markdown::render(document.snapshot());
                *last_error = None;
            }
            Err(error) => {
                warn!("pipeline rerun failed: {error}");
                *last_error = Some(error.to_string());
            }
        }
    }

    fn capture_fingerprints(&self) -> Option<Fingerprints> {
        let root = self.watch_root.as_ref()?;
        match Fingerprints::capture(root) {
            Ok(fingerprints) => Some(fingerprints),
            Err(error) => {
                debug!("fingerprint capture failed: {error}");
                None
            }
        }
    }
}

/// Content digest used as the page refresh trigger.
#[must_use]
pub fn version_of(markdown: &str) -> String {
    let hash = Sha256::digest(markdown.as_bytes());
    format!("{hash:x}")
}

fn html_response(body: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body).with_header(
        Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
            .expect("static header is valid"),
    )
}

fn json_response(payload: &DocumentPayload) -> Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string(payload).expect("payload serialization must not fail");
    Response::from_string(body).with_header(
        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
            .expect("static header is valid"),
    )
}

/// The served page: renders the document markdown client-side and polls
/// for a new version once a second.
const PAGE_SHELL: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>pyforge</title>
<script src="https://cdn.jsdelivr.net/npm/marked/marked.min.js"></script>
<style>
  body { max-width: 50rem; margin: 2rem auto; padding: 0 1rem;
         font-family: system-ui, sans-serif; line-height: 1.5; }
  table { border-collapse: collapse; }
  th, td { border: 1px solid #ccc; padding: 0.3rem 0.6rem; }
  .error { background: #fee; border: 1px solid #c00; padding: 0.5rem 1rem; }
  .warning { color: #850; }
</style>
</head>
<body>
<div id="status"></div>
<div id="content"></div>
<script>
let version = null;
async function poll() {
  try {
    const response = await fetch('/api/document');
    const doc = await response.json();
    const status = document.getElementById('status');
    status.innerHTML = '';
    if (doc.error) {
      status.innerHTML = '<div class="error">' + doc.error + '</div>';
    }
    for (const warning of doc.warnings) {
      status.innerHTML += '<div class="warning">' + warning + '</div>';
    }
    if (doc.version !== version) {
      version = doc.version;
      document.getElementById('content').innerHTML = marked.parse(doc.markdown);
    }
  } catch (error) {
    // Server restarting; keep polling.
  }
}
poll();
setInterval(poll, 1000);
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_changes_with_content() {
        let a = version_of("# Doc v1");
        let b = version_of("# Doc v2");
        assert_ne!(a, b);
        assert_eq!(a, version_of("# Doc v1"));
    }

    #[test]
    fn payload_serializes_without_error_field_noise() {
        let payload = DocumentPayload {
            version: "abc".to_string(),
            markdown: "# Doc".to_string(),
            warnings: vec![],
            error: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"version\":\"abc\""));
        assert!(json.contains("\"error\":null"));
    }
}
