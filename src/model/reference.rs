use crate::types::{BlockId, DatabaseId, PageId};

/// Pointer to the parent of a page or database.
///
/// A reference only carries the id and kind of its target; it never owns or
/// resolves the object it points to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    Database(DatabaseId),
    Page(PageId),
    Block(BlockId),
    Workspace,
}

impl Reference {
    /// The wire discriminator of this reference.
    pub fn type_name(&self) -> &'static str {
        match self {
            Reference::Database(_) => "database_id",
            Reference::Page(_) => "page_id",
            Reference::Block(_) => "block_id",
            Reference::Workspace => "workspace",
        }
    }

    /// The dashed id of the target, if the target has one.
    pub fn target_id(&self) -> Option<String> {
        match self {
            Reference::Database(id) => Some(id.to_dashed()),
            Reference::Page(id) => Some(id.to_dashed()),
            Reference::Block(id) => Some(id.to_dashed()),
            Reference::Workspace => None,
        }
    }
}

impl From<DatabaseId> for Reference {
    fn from(id: DatabaseId) -> Self {
        Reference::Database(id)
    }
}

impl From<PageId> for Reference {
    fn from(id: PageId) -> Self {
        Reference::Page(id)
    }
}
