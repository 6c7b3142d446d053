use super::{plain_text, PropertyTypeValue, PropertyValue, Reference};
use crate::types::PageId;
use chrono::{DateTime, Utc};

/// A Notion page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    id: PageId,
    parent: Reference,
    property_values: Vec<PropertyValue>,
    archived: bool,
    url: Option<String>,
    created_time: Option<DateTime<Utc>>,
    last_edited_time: Option<DateTime<Utc>>,
}

impl Page {
    pub fn new(
        id: PageId,
        parent: Reference,
        property_values: Vec<PropertyValue>,
        archived: bool,
    ) -> Self {
        Self {
            id,
            parent,
            property_values,
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

    pub fn id(&self) -> &PageId {
        &self.id
    }

    pub fn parent(&self) -> &Reference {
        &self.parent
    }

    /// Property values in the order the service sent them.
    pub fn property_values(&self) -> &[PropertyValue] {
        &self.property_values
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

    /// Looks a property up by its name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.property_values.iter().find(|value| value.name() == name)
    }

    /// Plain text of the page's title property, if it has one.
    pub fn title(&self) -> Option<String> {
        self.property_values
            .iter()
            .find_map(|value| match value.value() {
                PropertyTypeValue::Title(items) => Some(plain_text(items)),
                _ => None,
            })
    }
}

/// Input for creating a page.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPage {
    pub parent: Reference,
    pub property_values: Vec<PropertyValue>,
}

impl NewPage {
    pub fn new(parent: impl Into<Reference>) -> Self {
        Self {
            parent: parent.into(),
            property_values: Vec::new(),
        }
    }

    pub fn with_property(mut self, value: PropertyValue) -> Self {
        self.property_values.push(value);
        self
    }
}

/// Input for updating a page. Only the listed properties are touched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageUpdate {
    pub property_values: Vec<PropertyValue>,
    pub archived: Option<bool>,
}

impl PageUpdate {
    pub fn with_property(mut self, value: PropertyValue) -> Self {
        self.property_values.push(value);
        self
    }

    pub fn archive(mut self) -> Self {
        self.archived = Some(true);
        self
    }

    pub fn restore(mut self) -> Self {
        self.archived = Some(false);
        self
    }
}
