// src/api/responses.rs
//! Wire-shaped payloads exactly as the Notion API sends and accepts them.
//!
//! These structs only describe JSON shape. Discriminators are kept as plain
//! strings and interpreted by the converters in [`crate::convert`], which is
//! where unknown literals are rejected. Unknown *fields* are dropped here by
//! serde, so the service can add fields without breaking decoding.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<ApiPerson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot: Option<ApiBot>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiPerson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiBot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<ApiBotOwner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiBotOwner {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub owner_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ApiObjectRef>,
}

/// A bare `{"object": "...", "id": "..."}` pointer to another object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiObjectRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    pub id: String,
}

// ---------------------------------------------------------------------------
// Parents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParent {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<bool>,
}

// ---------------------------------------------------------------------------
// Rich text
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRichText {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub text_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<ApiText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention: Option<ApiMention>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equation: Option<ApiEquation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<ApiAnnotations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiText {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<ApiLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiLink {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEquation {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiAnnotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMention {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mention_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ApiUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<ApiObjectRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<ApiObjectRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<ApiDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_preview: Option<ApiLinkPreview>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiLinkPreview {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Property values
// ---------------------------------------------------------------------------

/// `{"id": "...", "type": "<tag>", "<tag>": <payload>}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPropertyValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// A `type`-tagged union without an id (formula results).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTagged {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRollup {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rollup_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDate {
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSelectOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFile {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<ApiExternalFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<ApiHostedFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiExternalFile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiHostedFile {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiUniqueId {
    pub number: Option<i64>,
    pub prefix: Option<String>,
}

// ---------------------------------------------------------------------------
// Pages and databases
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<String>,
    pub parent: ApiParent,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub properties: IndexMap<String, ApiPropertyValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDatabase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<String>,
    #[serde(default)]
    pub title: Vec<ApiRichText>,
    pub parent: ApiParent,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub properties: IndexMap<String, ApiPropertySpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A database schema column; its type-specific configuration is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPropertySpec {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(flatten)]
    pub configuration: Map<String, Value>,
}

/// Body of `POST /pages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiNewPage {
    pub parent: ApiParent,
    #[serde(default)]
    pub properties: IndexMap<String, ApiPropertyValue>,
}

/// Body of `PATCH /pages/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiPageUpdate {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, ApiPropertyValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// Generic paginated response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiList<T> {
    #[serde(default = "list_object")]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

fn list_object() -> String {
    "list".to_string()
}

/// `{"object": "error", "status": 404, "code": "object_not_found", ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorEnvelope {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub request_id: Option<String>,
}
