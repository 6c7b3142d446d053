// src/api/http.rs
//! Production transport over reqwest.
//!
//! A thin wrapper: it routes through the configured proxy, sends whatever the
//! client built and returns the raw response. Authentication headers are the
//! client's business, not the transport's.

use super::transport::{
    HttpMethod, HttpRequest, HttpResponse, Transport, TransportFactory, TransportSettings,
};
use crate::error::TransportError;
use parking_lot::RwLock;
use reqwest::{Client, Method, Proxy};
use std::sync::Arc;

/// A reqwest-backed transport; one connection pool shared by all sends.
pub struct ReqwestTransport {
    client: RwLock<Option<Client>>,
}

impl ReqwestTransport {
    pub fn new(settings: &TransportSettings) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .connect_timeout(settings.connect_timeout);

        if let Some(proxy) = &settings.proxy {
            let proxy = Proxy::all(proxy.url())
                .map_err(|e| TransportError::InvalidProxy(format!("{}: {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;
        Ok(Self {
            client: RwLock::new(Some(client)),
        })
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
        }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let client = self.client.read().clone().ok_or(TransportError::Closed)?;

        let mut builder = client.request(Self::method(request.method), request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn close(&self) {
        // Sends already in flight hold their own handle.
        self.client.write().take();
    }
}

/// Opens a [`ReqwestTransport`] per client.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReqwestTransportFactory;

impl TransportFactory for ReqwestTransportFactory {
    fn open(&self, settings: &TransportSettings) -> Result<Arc<dyn Transport>, TransportError> {
        log::debug!(
            "Opening HTTP transport (proxy: {})",
            settings
                .proxy
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "none".to_string())
        );
        Ok(Arc::new(ReqwestTransport::new(settings)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpProxy;
    use std::time::Duration;
    use url::Url;

    fn settings(proxy: Option<HttpProxy>) -> TransportSettings {
        TransportSettings {
            user_agent: "notion-typed-tests".to_string(),
            proxy,
            connect_timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn builds_with_and_without_proxy() {
        assert!(ReqwestTransport::new(&settings(None)).is_ok());
        let proxy = HttpProxy::new("127.0.0.1", 3128).unwrap();
        assert!(ReqwestTransport::new(&settings(Some(proxy))).is_ok());
    }

    #[tokio::test]
    async fn closed_transport_refuses_to_send() {
        let transport = ReqwestTransport::new(&settings(None)).unwrap();
        transport.close();
        transport.close();

        let url = Url::parse("https://api.notion.com/v1/users/me").unwrap();
        let result = transport.send(HttpRequest::new(HttpMethod::Get, url)).await;
        assert_eq!(result, Err(TransportError::Closed));
    }
}
