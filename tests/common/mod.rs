// tests/common/mod.rs
//! Recording transport double shared by the integration tests.
#![allow(dead_code)]

use notion_typed::{
    ApiKey, ClientConfiguration, ClientConfigurationBuilder, HttpRequest, HttpResponse,
    NotionClient, Transport, TransportError, TransportFactory, TransportSettings,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_API_KEY: &str = "secret_test_key_1234567890abcdef";

type Responder = dyn Fn(&HttpRequest) -> HttpResponse + Send + Sync;

/// One request as the double saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request: HttpRequest,
    /// `host:port` the request was sent to: the proxy when one is configured,
    /// otherwise the origin server.
    pub connected_to: String,
}

struct Shared {
    responder: Box<Responder>,
    delay: Mutex<Option<Duration>>,
    requests: Mutex<Vec<RecordedRequest>>,
    opened: Mutex<Vec<TransportSettings>>,
    closes: AtomicUsize,
}

/// A factory whose transports answer from a closure and record everything.
#[derive(Clone)]
pub struct MockNotion {
    shared: Arc<Shared>,
}

impl MockNotion {
    pub fn new(
        responder: impl Fn(&HttpRequest) -> HttpResponse + Send + Sync + 'static,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                responder: Box::new(responder),
                delay: Mutex::new(None),
                requests: Mutex::new(Vec::new()),
                opened: Mutex::new(Vec::new()),
                closes: AtomicUsize::new(0),
            }),
        }
    }

    /// Always answers with `status` and `body`.
    pub fn replying(status: u16, body: &'static str) -> Self {
        Self::new(move |_| HttpResponse::new(status, body))
    }

    /// Makes every send wait before answering.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.shared.delay.lock() = Some(delay);
        self
    }

    pub fn client(&self) -> NotionClient {
        self.client_with(|builder| builder)
    }

    pub fn client_with(
        &self,
        configure: impl FnOnce(ClientConfigurationBuilder) -> ClientConfigurationBuilder,
    ) -> NotionClient {
        let builder = ClientConfiguration::builder(test_api_key());
        let configuration = configure(builder).build().unwrap();
        NotionClient::with_transport_factory(configuration, Arc::new(self.clone()))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests()
            .last()
            .map(|recorded| recorded.request.clone())
            .expect("no request was sent")
    }

    /// Settings of every transport opened so far.
    pub fn opened(&self) -> Vec<TransportSettings> {
        self.shared.opened.lock().clone()
    }

    /// How many times `close` was called on any transport.
    pub fn close_count(&self) -> usize {
        self.shared.closes.load(Ordering::SeqCst)
    }
}

impl TransportFactory for MockNotion {
    fn open(&self, settings: &TransportSettings) -> Result<Arc<dyn Transport>, TransportError> {
        self.shared.opened.lock().push(settings.clone());
        Ok(Arc::new(MockTransport {
            shared: Arc::clone(&self.shared),
            settings: settings.clone(),
            closed: Mutex::new(false),
        }))
    }
}

struct MockTransport {
    shared: Arc<Shared>,
    settings: TransportSettings,
    closed: Mutex<bool>,
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if *self.closed.lock() {
            return Err(TransportError::Closed);
        }

        let connected_to = match &self.settings.proxy {
            Some(proxy) => proxy.to_string(),
            None => format!(
                "{}:{}",
                request.url.host_str().unwrap_or_default(),
                request.url.port_or_known_default().unwrap_or_default()
            ),
        };
        self.shared.requests.lock().push(RecordedRequest {
            request: request.clone(),
            connected_to,
        });

        let delay = *self.shared.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok((self.shared.responder)(&request))
    }

    fn close(&self) {
        *self.closed.lock() = true;
        self.shared.closes.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn test_api_key() -> ApiKey {
    ApiKey::new(TEST_API_KEY).unwrap()
}

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {}", path, e))
}
