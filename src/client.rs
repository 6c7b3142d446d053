// src/client.rs
//! The disposable, cloneable entry point of the library.
//!
//! A client is either `Open` or `Closed`. While open it lazily acquires one
//! transport on first use and shares it between all clones and concurrent
//! calls. [`NotionClient::close`] releases that transport, wakes every call
//! still waiting on it, and leaves the client permanently closed.

use crate::api::http::ReqwestTransportFactory;
use crate::api::logging::LoggingTransport;
use crate::api::pagination::collect_all;
use crate::api::parser::decode_response;
use crate::api::service::{NotionService, Operation};
use crate::api::transport::{Transport, TransportFactory, TransportSettings};
use crate::config::ClientConfiguration;
use crate::constants::NOTION_VERSION;
use crate::error::{NotionError, Result};
use crate::model::{
    Database, DatabaseQuery, NewPage, Page, PageUpdate, Pagination, ResultPage, User,
};
use crate::types::{DatabaseId, PageId, UserId};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use std::sync::Arc;
use tokio::sync::watch;

enum ClientState {
    Open {
        transport: Option<Arc<dyn Transport>>,
    },
    Closed,
}

struct ClientInner {
    configuration: ClientConfiguration,
    service: NotionService,
    factory: Arc<dyn TransportFactory>,
    state: RwLock<ClientState>,
    closed: watch::Sender<bool>,
}

impl Drop for ClientInner {
    fn drop(&mut self) {
        if let ClientState::Open {
            transport: Some(transport),
        } = self.state.get_mut()
        {
            transport.close();
        }
    }
}

/// A Notion API client. Clones share one transport and one lifecycle.
#[derive(Clone)]
pub struct NotionClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("base_url", &self.inner.configuration.base_url().as_str())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl NotionClient {
    /// A client sending requests over reqwest.
    pub fn new(configuration: ClientConfiguration) -> Self {
        Self::with_transport_factory(configuration, Arc::new(ReqwestTransportFactory))
    }

    /// A client whose transport comes from `factory`. No transport is opened
    /// until the first call.
    pub fn with_transport_factory(
        configuration: ClientConfiguration,
        factory: Arc<dyn TransportFactory>,
    ) -> Self {
        let service = NotionService::new(configuration.base_url().clone());
        let (closed, _) = watch::channel(false);
        Self {
            inner: Arc::new(ClientInner {
                configuration,
                service,
                factory,
                state: RwLock::new(ClientState::Open { transport: None }),
                closed,
            }),
        }
    }

    pub fn configuration(&self) -> &ClientConfiguration {
        &self.inner.configuration
    }

    pub fn is_closed(&self) -> bool {
        matches!(*self.inner.state.read(), ClientState::Closed)
    }

    pub fn users(&self) -> Users<'_> {
        Users { client: self }
    }

    pub fn pages(&self) -> Pages<'_> {
        Pages { client: self }
    }

    pub fn databases(&self) -> Databases<'_> {
        Databases { client: self }
    }

    /// Moves the client to `Closed` and releases the transport if one was
    /// opened. Calls in flight fail with [`NotionError::ClientClosed`].
    /// Closing again does nothing.
    pub fn close(&self) {
        let previous = std::mem::replace(&mut *self.inner.state.write(), ClientState::Closed);
        if let ClientState::Open { transport } = previous {
            if let Some(transport) = transport {
                transport.close();
            }
            self.inner.closed.send_replace(true);
            log::info!("Notion client closed");
        }
    }

    /// Returns the shared transport, opening it on first use.
    fn transport(&self) -> Result<Arc<dyn Transport>> {
        let state = self.inner.state.upgradable_read();
        match &*state {
            ClientState::Closed => return Err(NotionError::ClientClosed),
            ClientState::Open {
                transport: Some(transport),
            } => return Ok(Arc::clone(transport)),
            ClientState::Open { transport: None } => {}
        }

        // Only one upgradable guard exists at a time, so nobody else can
        // have opened a transport or closed the client in between.
        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        let configuration = &self.inner.configuration;
        let settings = TransportSettings {
            user_agent: configuration.user_agent().to_string(),
            proxy: configuration.http().http_proxy.clone(),
            connect_timeout: configuration.http().connect_timeout,
        };
        let transport = LoggingTransport::wrap(
            self.inner.factory.open(&settings)?,
            configuration.http().logging_level,
        );
        log::info!("Opened transport for {}", configuration.base_url());
        *state = ClientState::Open {
            transport: Some(Arc::clone(&transport)),
        };
        Ok(transport)
    }

    async fn execute<T>(&self, operation: Operation<T>) -> Result<T> {
        let mut closed = self.inner.closed.subscribe();
        let transport = self.transport()?;

        let Operation { mut request, decode } = operation;
        let configuration = &self.inner.configuration;
        request.set_header("Authorization", configuration.api_key().bearer());
        request.set_header("Notion-Version", NOTION_VERSION);
        request.set_header("User-Agent", configuration.user_agent());
        if request.body.is_some() {
            request.set_header("Content-Type", "application/json");
        }
        log::debug!("{} {}", request.method, request.url);

        let timeout = configuration.http().request_timeout;
        let exchange = async {
            tokio::select! {
                biased;
                _ = closed.wait_for(|closed| *closed) => Err(NotionError::ClientClosed),
                response = transport.send(request) => response.map_err(NotionError::from),
            }
        };

        let response = match tokio::time::timeout(timeout, exchange).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) if self.is_closed() => {
                log::debug!("Call ended by close: {}", e);
                return Err(NotionError::ClientClosed);
            }
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(NotionError::Timeout { after: timeout }),
        };
        decode_response(&response, decode)
    }

    fn service(&self) -> &NotionService {
        &self.inner.service
    }
}

/// User operations.
pub struct Users<'a> {
    client: &'a NotionClient,
}

impl Users<'_> {
    pub async fn get_user(&self, id: &UserId) -> Result<User> {
        self.client
            .execute(self.client.service().get_user(id)?)
            .await
    }

    /// The bot user behind the configured token.
    pub async fn me(&self) -> Result<User> {
        self.client.execute(self.client.service().me()?).await
    }

    pub async fn list_users(&self, pagination: &Pagination) -> Result<ResultPage<User>> {
        self.client
            .execute(self.client.service().list_users(pagination)?)
            .await
    }

    /// Every user of the workspace, following cursors.
    pub async fn list_all(&self) -> Result<Vec<User>> {
        collect_all(|pagination| async move { self.list_users(&pagination).await }).await
    }
}

/// Page operations.
pub struct Pages<'a> {
    client: &'a NotionClient,
}

impl Pages<'_> {
    pub async fn get_page(&self, id: &PageId) -> Result<Page> {
        self.client
            .execute(self.client.service().get_page(id)?)
            .await
    }

    pub async fn create_page(&self, page: &NewPage) -> Result<Page> {
        self.client
            .execute(self.client.service().create_page(page)?)
            .await
    }

    pub async fn update_page(&self, id: &PageId, update: &PageUpdate) -> Result<Page> {
        self.client
            .execute(self.client.service().update_page(id, update)?)
            .await
    }
}

/// Database operations.
pub struct Databases<'a> {
    client: &'a NotionClient,
}

impl Databases<'_> {
    pub async fn get_database(&self, id: &DatabaseId) -> Result<Database> {
        self.client
            .execute(self.client.service().get_database(id)?)
            .await
    }

    pub async fn query_database(
        &self,
        id: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<ResultPage<Page>> {
        self.client
            .execute(self.client.service().query_database(id, query)?)
            .await
    }

    /// Runs `query` and follows cursors until every matching page is read.
    pub async fn query_all(&self, id: &DatabaseId, query: &DatabaseQuery) -> Result<Vec<Page>> {
        collect_all(|pagination| {
            let query = DatabaseQuery {
                start_cursor: pagination.start_cursor,
                page_size: pagination.page_size,
                ..query.clone()
            };
            async move { self.query_database(id, &query).await }
        })
        .await
    }
}
