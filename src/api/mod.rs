// src/api/mod.rs
//! Notion API interaction: wire shapes, the transport seam and the service layer.
//!
//! Requests are described by [`service::NotionService`], sent by a
//! [`Transport`], and their responses decoded by [`parser::decode_response`]
//! with the converters from [`crate::convert`].

pub mod http;
pub mod logging;
pub mod pagination;
pub mod parser;
pub mod responses;
pub mod service;
pub mod transport;

// Re-export the public interface
pub use http::{ReqwestTransport, ReqwestTransportFactory};
pub use logging::LoggingTransport;
pub use service::{NotionService, Operation};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, Transport, TransportFactory, TransportSettings,
};
