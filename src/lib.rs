// src/lib.rs
//! notion-typed: a typed client for the Notion API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Client**: `NotionClient` and its `users()`, `pages()`, `databases()` groups
//! - **Configuration**: `ClientConfiguration`, `HttpConfiguration`, `HttpProxy`, `HttpLoggingLevel`
//! - **Error handling**: `NotionError`, `ConversionError`, `TransportError`, `ValidationError`
//! - **Domain model**: `User`, `Page`, `Database`, `PropertyValue`, `RichText`, etc.
//! - **Domain types**: `UserId`, `PageId`, `DatabaseId`, `ApiKey`, `Color`
//! - **Conversion**: the `ApiConverter` trait and one converter per entity, in [`convert`]
//! - **Transport**: the `Transport` seam and its reqwest implementation

pub mod api;
mod client;
pub mod config;
pub mod constants;
pub mod convert;
mod error;
pub mod model;
pub mod types;

// --- Client ---
pub use crate::client::{Databases, NotionClient, Pages, Users};

// --- Configuration ---
pub use crate::config::{
    ClientConfiguration, ClientConfigurationBuilder, HttpConfiguration, HttpLoggingLevel,
    HttpProxy,
};

// --- Error Handling ---
pub use crate::error::{ConversionError, NotionError, NotionErrorCode, Result, TransportError};
pub use crate::types::ValidationError;

// --- Domain Model ---
pub use crate::model::{
    Annotations, Bot, BotOwner, Database, DatabaseQuery, DateOrDateTime, DateValue,
    FileReference, FileSource, FormulaResult, Link, Mention, NewPage, Page, PageUpdate,
    Pagination, Person, PropertySpec, PropertyType, PropertyTypeValue, PropertyValue, Reference,
    ResultPage, RichText, RichTextContent, RollupResult, RollupValue, SelectOption, UniqueId,
    User, UserReference, UserType,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, BlockId, Color, DatabaseId, Id, PageId, UserId};

// --- Conversion ---
pub use crate::convert::ApiConverter;

// --- Transport ---
pub use crate::api::{
    HttpMethod, HttpRequest, HttpResponse, LoggingTransport, ReqwestTransport,
    ReqwestTransportFactory, Transport, TransportFactory, TransportSettings,
};
