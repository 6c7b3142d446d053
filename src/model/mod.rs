//! Immutable domain objects produced by the converters.
//!
//! Entities carry no reference to the client that produced them and are
//! built fresh for every response.

mod database;
mod list;
mod page;
mod property_value;
mod reference;
mod rich_text;
mod user;

pub use database::{Database, DatabaseQuery, PropertySpec};
pub use list::{Pagination, ResultPage};
pub use page::{NewPage, Page, PageUpdate};
pub use property_value::{
    DateOrDateTime, DateValue, FileReference, FileSource, FormulaResult, PropertyType,
    PropertyTypeValue, PropertyValue, RollupResult, RollupValue, SelectOption, UniqueId,
};
pub use reference::Reference;
pub use rich_text::{plain_text, Annotations, Link, Mention, RichText, RichTextContent};
pub use user::{Bot, BotOwner, Person, User, UserReference, UserType};
