use super::{DateValue, UserReference};
use crate::types::{Color, DatabaseId, PageId};

/// A run of rich text with its formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    pub content: RichTextContent,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichText {
    /// Create an unformatted text run.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            content: RichTextContent::Text {
                content: text.clone(),
                link: None,
            },
            annotations: Annotations::default(),
            plain_text: text,
            href: None,
        }
    }
}

/// The kind of rich text content, each carrying its own data.
#[derive(Debug, Clone, PartialEq)]
pub enum RichTextContent {
    Text { content: String, link: Option<Link> },
    Mention(Mention),
    Equation { expression: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

/// Inline references to other objects.
#[derive(Debug, Clone, PartialEq)]
pub enum Mention {
    User(UserReference),
    Page(PageId),
    Database(DatabaseId),
    Date(DateValue),
    LinkPreview { url: String },
}

/// Concatenates the plain text of a rich text list.
pub fn plain_text(items: &[RichText]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}
