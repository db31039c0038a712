//! Raw content acquisition from URLs, files, and stdin.
//!
//! Each loader returns the undecoded document text. Failures are mapped to
//! the specific [`ReadableError`] variant for their cause so the exit code
//! can tell a missing file from an unreadable one, or a dead host from a
//! 404.

use std::fs;
use std::io::Read;
use std::path::Path;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use url::Url;

use crate::{ReadableError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Proxy URL applied to every scheme.
    pub proxy: Option<String>,
    /// Skip TLS certificate verification (`--insecure`).
    pub insecure: bool,
    /// Custom User-Agent string; falls back to [`default_user_agent`].
    pub user_agent: Option<String>,
    /// Connect and read timeout in seconds.
    pub timeout: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { proxy: None, insecure: false, user_agent: None, timeout: 30 }
    }
}

impl FetchOptions {
    /// The User-Agent header value that will be sent.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(default_user_agent)
    }
}

/// User-Agent used when none is configured.
pub fn default_user_agent() -> String {
    format!("Mozilla/5.0 (compatible; readable/{})", env!("CARGO_PKG_VERSION"))
}

/// Fetches HTML content from a URL.
///
/// Follows redirects and fails on any non-success status.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, options: &FetchOptions) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| ReadableError::InvalidUrl { url: url.to_string(), reason: e.to_string() })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ReadableError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme `{}`", parsed.scheme()),
        });
    }

    let mut builder = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(options.timeout))
        .timeout(Duration::from_secs(options.timeout))
        .danger_accept_invalid_certs(options.insecure);

    // The proxy is resolved once into the options; reqwest's own env lookup stays off.
    builder = match &options.proxy {
        Some(proxy) => builder.proxy(
            reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| ReadableError::Usage(format!("invalid proxy `{proxy}`: {e}")))?,
        ),
        None => builder.no_proxy(),
    };

    let client = builder.build().map_err(|e| network_error(url, options, e))?;

    tracing::debug!(url, proxy = ?options.proxy, insecure = options.insecure, "sending request");

    let response = client
        .get(parsed)
        .header("User-Agent", options.effective_user_agent())
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .send()
        .await
        .map_err(|e| network_error(url, options, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ReadableError::HttpStatus { url: url.to_string(), status: status.as_u16() });
    }

    response.text().await.map_err(|e| network_error(url, options, e))
}

#[cfg(feature = "fetch")]
fn network_error(url: &str, options: &FetchOptions, err: reqwest::Error) -> ReadableError {
    if err.is_timeout() {
        ReadableError::Timeout { url: url.to_string(), timeout: options.timeout }
    } else if err.is_connect() {
        ReadableError::HostUnreachable { url: url.to_string(), reason: error_chain(&err) }
    } else if let Some(status) = err.status() {
        ReadableError::HttpStatus { url: url.to_string(), status: status.as_u16() }
    } else {
        ReadableError::Network { url: url.to_string(), reason: error_chain(&err) }
    }
}

/// reqwest hides the useful cause (DNS, TLS) a few levels down.
#[cfg(feature = "fetch")]
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| ReadableError::from_io(e, path))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    read_to_end(std::io::stdin().lock())
}

/// Reads a whole stream, replacing invalid UTF-8 sequences.
pub fn read_to_end(mut reader: impl Read) -> Result<String> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_fetch_options_default() {
        let options = FetchOptions::default();
        assert_eq!(options.timeout, 30);
        assert!(!options.insecure);
        assert!(options.effective_user_agent().contains("readable/"));
    }

    #[test]
    fn test_custom_user_agent() {
        let options = FetchOptions { user_agent: Some("test-agent".into()), ..Default::default() };
        assert_eq!(options.effective_user_agent(), "test-agent");
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_url_invalid() {
        let options = FetchOptions::default();
        let result = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(fetch_url("not-a-url", &options));

        assert!(matches!(result, Err(ReadableError::InvalidUrl { .. })));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_url_unsupported_scheme() {
        let options = FetchOptions::default();
        let result = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(fetch_url("ftp://example.com/page.html", &options));

        assert!(matches!(result, Err(ReadableError::InvalidUrl { .. })));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_invalid_proxy_is_usage_error() {
        let options = FetchOptions { proxy: Some("http://exa mple.com:8080".into()), ..Default::default() };
        let result = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(fetch_url("https://example.com", &options));

        assert!(matches!(result, Err(ReadableError::Usage(_))));
    }

    /// Serves `response` to the first connection and returns the URL to request.
    #[cfg(feature = "fetch")]
    fn serve_once(response: &'static str) -> String {
        use std::io::Write as _;

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else { return };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => return,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(response.as_bytes());
        });
        format!("http://{addr}/page.html")
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_fetch_url_success() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 12\r\nConnection: close\r\n\r\n<p>hello</p>",
        );
        let body = fetch_url(&url, &FetchOptions::default()).await.unwrap();
        assert_eq!(body, "<p>hello</p>");
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_http_error_status() {
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let err = fetch_url(&url, &FetchOptions::default()).await.unwrap_err();
        assert!(matches!(err, ReadableError::HttpStatus { status: 404, .. }), "{err:?}");
        assert_eq!(err.exit_code(), crate::ExitCode::NoHost);
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_refused_connection_is_host_unreachable() {
        let options = FetchOptions { timeout: 5, ..Default::default() };
        let err = fetch_url("http://127.0.0.1:1/", &options).await.unwrap_err();
        assert!(matches!(err, ReadableError::HostUnreachable { .. }), "{err:?}");
        assert_eq!(err.exit_code(), crate::ExitCode::NoHost);
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file(Path::new("/nonexistent/path/file.html"));
        assert!(matches!(result, Err(ReadableError::InputNotFound(_))));
    }

    #[test]
    fn test_fetch_file_reads_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<p>hello</p>").unwrap();
        assert_eq!(fetch_file(&path).unwrap(), "<p>hello</p>");
    }

    #[test]
    fn test_read_to_end_lossy() {
        let text = read_to_end(Cursor::new(b"<p>caf\xe9</p>".to_vec())).unwrap();
        assert!(text.starts_with("<p>caf"));
        assert!(text.ends_with("</p>"));
    }
}
