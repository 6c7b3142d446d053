use super::{plain_text, PropertyType, Reference, RichText};
use crate::types::DatabaseId;
use chrono::{DateTime, Utc};

/// A Notion database and its property schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    id: DatabaseId,
    title: Vec<RichText>,
    parent: Reference,
    property_specs: Vec<PropertySpec>,
    archived: bool,
    url: Option<String>,
    created_time: Option<DateTime<Utc>>,
    last_edited_time: Option<DateTime<Utc>>,
}

impl Database {
    pub fn new(
        id: DatabaseId,
        title: Vec<RichText>,
        parent: Reference,
        property_specs: Vec<PropertySpec>,
        archived: bool,
    ) -> Self {
        Self {
            id,
            title,
            parent,
            property_specs,
            archived,
            url: None,
            created_time: None,
            last_edited_time: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_timestamps(
        mut self,
        created_time: Option<DateTime<Utc>>,
        last_edited_time: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_time = created_time;
        self.last_edited_time = last_edited_time;
        self
    }

    pub fn id(&self) -> &DatabaseId {
        &self.id
    }

    pub fn title(&self) -> &[RichText] {
        &self.title
    }

    pub fn title_text(&self) -> String {
        plain_text(&self.title)
    }

    pub fn parent(&self) -> &Reference {
        &self.parent
    }

    pub fn property_specs(&self) -> &[PropertySpec] {
        &self.property_specs
    }

    pub fn property_spec(&self, name: &str) -> Option<&PropertySpec> {
        self.property_specs.iter().find(|spec| spec.name == name)
    }

    pub fn archived(&self) -> bool {
        self.archived
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn created_time(&self) -> Option<&DateTime<Utc>> {
        self.created_time.as_ref()
    }

    pub fn last_edited_time(&self) -> Option<&DateTime<Utc>> {
        self.last_edited_time.as_ref()
    }
}

/// One column of a database schema. Type-specific configuration (select
/// options, number formats, ...) is not modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    pub id: String,
    pub name: String,
    pub property_type: PropertyType,
}

/// Body of a database query. `filter` and `sorts` are forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorts: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}
