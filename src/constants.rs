// src/constants.rs
//! Constants that define the operational boundaries of the client.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// The `Notion-Version` header sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Base URL of the public API. Always ends with a slash so endpoint paths join under it.
pub const API_BASE_URL: &str = "https://api.notion.com/v1/";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100; larger requested sizes are clamped.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

// ---------------------------------------------------------------------------
// Client defaults
// ---------------------------------------------------------------------------

/// How long a single call may take, transport included, before it fails with a timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect timeout handed to the HTTP transport.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent when the caller does not configure one.
pub const DEFAULT_USER_AGENT: &str = concat!("notion-typed/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
