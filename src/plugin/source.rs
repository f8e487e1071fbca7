//! Plugin sources: in-memory payloads, sequences, files and URLs.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MosaicError, Result};

use super::Plugin;

/// The execution context plugins are loaded in.
///
/// File-system sources are only available on a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Host,
    Browser,
}

impl Environment {
    /// The context this binary was compiled for.
    pub fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Environment::Browser
        } else {
            Environment::Host
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Environment::Host => "host",
            Environment::Browser => "browser",
        }
    }

    /// Fail unless file-system access is available.
    pub fn require_files(&self) -> Result<()> {
        match self {
            Environment::Host => Ok(()),
            Environment::Browser => Err(MosaicError::Environment {
                environment: self.name().to_string(),
            }),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where a plugin payload comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PluginSource {
    /// An already-classified plugin.
    Plugin(Plugin),
    /// A loosely-typed payload, classified on load.
    Payload(Value),
    /// Sources loaded strictly in order.
    Sequence(Vec<PluginSource>),
    /// A file, or a directory scanned for plugin files.
    File(PathBuf),
    /// A document fetched over HTTP.
    Url(String),
}

impl PluginSource {
    /// Interpret a string as a URL or a path, by its lexical form only.
    pub fn parse(s: &str) -> Self {
        if is_url(s) {
            PluginSource::Url(s.to_string())
        } else {
            PluginSource::File(PathBuf::from(s))
        }
    }

    /// Short description for logs and reports.
    pub fn describe(&self) -> String {
        match self {
            PluginSource::Plugin(plugin) => format!("{} '{}'", plugin.kind(), plugin.name()),
            PluginSource::Payload(_) => "payload".to_string(),
            PluginSource::Sequence(items) => format!("sequence of {}", items.len()),
            PluginSource::File(path) => path.display().to_string(),
            PluginSource::Url(url) => url.clone(),
        }
    }
}

impl From<Value> for PluginSource {
    /// Arrays become sequences and strings become paths or URLs.
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => {
                PluginSource::Sequence(items.into_iter().map(PluginSource::from).collect())
            }
            Value::String(s) => PluginSource::parse(&s),
            other => PluginSource::Payload(other),
        }
    }
}

impl From<Plugin> for PluginSource {
    fn from(plugin: Plugin) -> Self {
        PluginSource::Plugin(plugin)
    }
}

impl From<&str> for PluginSource {
    fn from(s: &str) -> Self {
        PluginSource::parse(s)
    }
}

impl From<PathBuf> for PluginSource {
    fn from(path: PathBuf) -> Self {
        PluginSource::File(path)
    }
}

impl<T: Into<PluginSource>> From<Vec<T>> for PluginSource {
    fn from(items: Vec<T>) -> Self {
        PluginSource::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// Check whether a string names an HTTP(S) resource.
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Whether a file name or URL path names a YAML document.
fn is_yaml(name: &str) -> bool {
    name.ends_with(".yaml") || name.ends_with(".yml")
}

/// Decode structured data, YAML or JSON depending on the name.
fn decode(content: &str, name: &str) -> std::result::Result<Value, String> {
    if is_yaml(name) {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }
}

/// Read and decode a plugin document from disk.
pub(crate) fn read_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(MosaicError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| MosaicError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    decode(&content, &path.to_string_lossy()).map_err(|message| MosaicError::Parse {
        message: format!("{}: {}", path.display(), message),
        help: Some("Plugin files must contain a JSON or YAML payload or a list of them".to_string()),
    })
}

/// Fetch and decode a plugin document with a single GET.
pub(crate) fn fetch_document(client: &Client, url: &str) -> Result<Value> {
    let fetch_error = |message: String| MosaicError::Fetch {
        url: url.to_string(),
        message,
    };

    let response = client.get(url).send().map_err(|e| fetch_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_error(format!("HTTP {}", status)));
    }

    let body = response.text().map_err(|e| fetch_error(e.to_string()))?;
    if body.trim().is_empty() {
        return Err(fetch_error("empty response body".to_string()));
    }

    let name = url.split(['?', '#']).next().unwrap_or(url);
    decode(&body, name).map_err(|e| fetch_error(format!("invalid payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use tempfile::tempdir;

    /// Serve one canned HTTP response on a local port and return its URL.
    fn serve_once(status: &str, body: &str, path: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{}{}", addr, path)
    }

    #[test]
    fn test_parse_source_form() {
        assert_eq!(
            PluginSource::parse("https://cdn.example.com/material.json"),
            PluginSource::Url("https://cdn.example.com/material.json".to_string())
        );
        assert_eq!(
            PluginSource::parse("plugins/material.json"),
            PluginSource::File(PathBuf::from("plugins/material.json"))
        );
        // Lexical only: no scheme, no URL.
        assert!(matches!(
            PluginSource::parse("example.com/material.json"),
            PluginSource::File(_)
        ));
    }

    #[test]
    fn test_from_value_nested() {
        let source = PluginSource::from(json!([
            {"type": "library", "name": "a"},
            ["b.json", "http://example.com/c.json"]
        ]));

        let PluginSource::Sequence(items) = source else {
            panic!("expected sequence");
        };
        assert!(matches!(items[0], PluginSource::Payload(_)));
        let PluginSource::Sequence(inner) = &items[1] else {
            panic!("expected nested sequence");
        };
        assert!(matches!(inner[0], PluginSource::File(_)));
        assert!(matches!(inner[1], PluginSource::Url(_)));
    }

    #[test]
    fn test_browser_rejects_files() {
        assert!(Environment::Host.require_files().is_ok());
        assert!(matches!(
            Environment::Browser.require_files(),
            Err(MosaicError::Environment { .. })
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_document(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, MosaicError::NotFound { .. }));
    }

    #[test]
    fn test_read_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            read_document(&path).unwrap_err(),
            MosaicError::Parse { .. }
        ));
    }

    #[test]
    fn test_read_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("material.library.yaml");
        fs::write(&path, "type: library\nname: material\n").unwrap();

        let value = read_document(&path).unwrap();
        assert_eq!(value, json!({"type": "library", "name": "material"}));
    }

    #[test]
    fn test_fetch_success() {
        let url = serve_once("200 OK", r#"{"type":"publisher","name":"s3"}"#, "/s3.json");
        let value = fetch_document(&Client::new(), &url).unwrap();
        assert_eq!(value["name"], "s3");
    }

    #[test]
    fn test_fetch_yaml_by_path() {
        let url = serve_once("200 OK", "type: publisher\nname: s3\n", "/s3.yaml?v=2");
        let value = fetch_document(&Client::new(), &url).unwrap();
        assert_eq!(value["type"], "publisher");
    }

    #[test]
    fn test_fetch_non_success_status() {
        let url = serve_once("404 Not Found", "missing", "/gone.json");
        let err = fetch_document(&Client::new(), &url).unwrap_err();
        match err {
            MosaicError::Fetch { message, .. } => assert!(message.contains("404")),
            other => panic!("expected Fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_empty_body() {
        let url = serve_once("200 OK", "", "/empty.json");
        assert!(matches!(
            fetch_document(&Client::new(), &url),
            Err(MosaicError::Fetch { .. })
        ));
    }

    #[test]
    fn test_fetch_undecodable_body() {
        let url = serve_once("200 OK", "<html></html>", "/page.json");
        assert!(matches!(
            fetch_document(&Client::new(), &url),
            Err(MosaicError::Fetch { .. })
        ));
    }
}
