// src/api/logging.rs
//! Request/response diagnostics, layered over any transport.

use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::config::HttpLoggingLevel;
use crate::error::TransportError;
use std::sync::Arc;
use std::time::Instant;

const REDACTED: &str = "<redacted>";

/// Emits what [`HttpLoggingLevel`] asks for through the `log` facade and
/// forwards everything else untouched.
pub struct LoggingTransport {
    inner: Arc<dyn Transport>,
    level: HttpLoggingLevel,
}

impl LoggingTransport {
    /// Wraps `inner`, or returns it unchanged when logging is off.
    pub fn wrap(inner: Arc<dyn Transport>, level: HttpLoggingLevel) -> Arc<dyn Transport> {
        if level == HttpLoggingLevel::None {
            inner
        } else {
            Arc::new(Self { inner, level })
        }
    }

    fn log_headers(&self, direction: &str, headers: &[(String, String)]) {
        if self.level.includes_headers() {
            for line in header_lines(direction, headers) {
                log::info!("{}", line);
            }
        }
    }

    fn log_body(&self, direction: &str, body: Option<&str>) {
        if self.level.includes_body() {
            log::info!("{}", body_line(direction, body));
        }
    }
}

fn header_lines(direction: &str, headers: &[(String, String)]) -> Vec<String> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if name.eq_ignore_ascii_case("authorization") {
                REDACTED
            } else {
                value.as_str()
            };
            format!("{} {}: {}", direction, name, value)
        })
        .collect()
}

/// Bodies are logged whole.
fn body_line(direction: &str, body: Option<&str>) -> String {
    match body {
        Some(body) if !body.is_empty() => format!("{} body: {}", direction, body),
        _ => format!("{} body: <empty>", direction),
    }
}

#[async_trait::async_trait]
impl Transport for LoggingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = request.method;
        let url = request.url.clone();

        log::info!("--> {} {}", method, url);
        self.log_headers("-->", &request.headers);
        self.log_body("-->", request.body.as_deref());

        let started = Instant::now();
        let result = self.inner.send(request).await;
        let elapsed = started.elapsed();

        match &result {
            Ok(response) => {
                log::info!(
                    "<-- {} {} {} ({}ms)",
                    response.status,
                    method,
                    url,
                    elapsed.as_millis()
                );
                self.log_headers("<--", &response.headers);
                self.log_body("<--", Some(&response.body));
            }
            Err(e) => log::info!("<-- FAILED {} {}: {}", method, url, e),
        }
        result
    }

    fn close(&self) {
        self.inner.close();
    }
}
