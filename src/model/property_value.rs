use super::{RichText, UserReference};
use crate::error::ConversionError;
use crate::types::{Color, PageId};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// The closed set of property types this client understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Title,
    RichText,
    Number,
    Select,
    MultiSelect,
    Status,
    Date,
    People,
    Files,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Formula,
    Relation,
    Rollup,
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
    UniqueId,
}

/// A named property value of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    id: Option<String>,
    name: String,
    type_specific_value: PropertyTypeValue,
}

impl PropertyValue {
    pub fn new(
        id: Option<String>,
        name: impl Into<String>,
        type_specific_value: PropertyTypeValue,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            type_specific_value,
        }
    }

    /// A value without a property id, as used in write payloads.
    pub fn named(name: impl Into<String>, type_specific_value: PropertyTypeValue) -> Self {
        Self::new(None, name, type_specific_value)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &PropertyTypeValue {
        &self.type_specific_value
    }

    pub fn property_type(&self) -> PropertyType {
        self.type_specific_value.property_type()
    }
}

/// The payload of a property value. The variant *is* the type tag, so a
/// value tagged "number" can only ever carry a number payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyTypeValue {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Number(Option<f64>),
    Select(Option<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Status(Option<SelectOption>),
    Date(Option<DateValue>),
    People(Vec<UserReference>),
    Files(Vec<FileReference>),
    Checkbox(bool),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    Formula(FormulaResult),
    Relation(Vec<PageId>),
    Rollup(RollupValue),
    CreatedTime(DateTime<Utc>),
    CreatedBy(UserReference),
    LastEditedTime(DateTime<Utc>),
    LastEditedBy(UserReference),
    UniqueId(UniqueId),
}

impl PropertyTypeValue {
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Title(_) => PropertyType::Title,
            Self::RichText(_) => PropertyType::RichText,
            Self::Number(_) => PropertyType::Number,
            Self::Select(_) => PropertyType::Select,
            Self::MultiSelect(_) => PropertyType::MultiSelect,
            Self::Status(_) => PropertyType::Status,
            Self::Date(_) => PropertyType::Date,
            Self::People(_) => PropertyType::People,
            Self::Files(_) => PropertyType::Files,
            Self::Checkbox(_) => PropertyType::Checkbox,
            Self::Url(_) => PropertyType::Url,
            Self::Email(_) => PropertyType::Email,
            Self::PhoneNumber(_) => PropertyType::PhoneNumber,
            Self::Formula(_) => PropertyType::Formula,
            Self::Relation(_) => PropertyType::Relation,
            Self::Rollup(_) => PropertyType::Rollup,
            Self::CreatedTime(_) => PropertyType::CreatedTime,
            Self::CreatedBy(_) => PropertyType::CreatedBy,
            Self::LastEditedTime(_) => PropertyType::LastEditedTime,
            Self::LastEditedBy(_) => PropertyType::LastEditedBy,
            Self::UniqueId(_) => PropertyType::UniqueId,
        }
    }

    /// The wire name of this value's type, for error messages.
    fn type_name(&self) -> &'static str {
        crate::convert::PropertyTypeConverter::literal(&self.property_type())
    }
}

// Typed accessors: each succeeds only on its own variant and reports the
// actual variant otherwise.
macro_rules! typed_accessors {
    ($( $(#[$meta:meta])* $fn_name:ident => $variant:ident : $ret:ty, $literal:literal );+ $(;)?) => {
        impl PropertyTypeValue {
            $(
                $(#[$meta])*
                pub fn $fn_name(&self) -> Result<$ret, ConversionError> {
                    match self {
                        Self::$variant(value) => Ok(value),
                        other => Err(ConversionError::WrongVariant {
                            expected: $literal,
                            actual: other.type_name(),
                        }),
                    }
                }
            )+
        }

        impl PropertyValue {
            $(
                $(#[$meta])*
                pub fn $fn_name(&self) -> Result<$ret, ConversionError> {
                    self.type_specific_value.$fn_name()
                }
            )+
        }
    };
}

typed_accessors! {
    as_title => Title: &Vec<RichText>, "title";
    /// Rich text content; fails on every other variant, titles included.
    as_text => RichText: &Vec<RichText>, "rich_text";
    as_number => Number: &Option<f64>, "number";
    as_select => Select: &Option<SelectOption>, "select";
    as_multi_select => MultiSelect: &Vec<SelectOption>, "multi_select";
    as_status => Status: &Option<SelectOption>, "status";
    as_date => Date: &Option<DateValue>, "date";
    as_people => People: &Vec<UserReference>, "people";
    as_files => Files: &Vec<FileReference>, "files";
    as_checkbox => Checkbox: &bool, "checkbox";
    as_url => Url: &Option<String>, "url";
    as_email => Email: &Option<String>, "email";
    as_phone_number => PhoneNumber: &Option<String>, "phone_number";
    as_formula => Formula: &FormulaResult, "formula";
    as_relation => Relation: &Vec<PageId>, "relation";
    as_rollup => Rollup: &RollupValue, "rollup";
    as_unique_id => UniqueId: &UniqueId, "unique_id";
}

/// Select / status option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: Option<String>,
    pub name: String,
    pub color: Option<Color>,
}

impl SelectOption {
    /// An option referenced by name only, as written in update payloads.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: None,
        }
    }
}

/// A date or a date-time, exactly as precise as the service sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrDateTime {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl DateOrDateTime {
    pub fn date_naive(&self) -> NaiveDate {
        match self {
            DateOrDateTime::Date(date) => *date,
            DateOrDateTime::DateTime(date_time) => date_time.date_naive(),
        }
    }
}

/// Date value with optional end and time zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateValue {
    pub start: DateOrDateTime,
    pub end: Option<DateOrDateTime>,
    pub time_zone: Option<String>,
}

impl DateValue {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            start: DateOrDateTime::Date(date),
            end: None,
            time_zone: None,
        }
    }
}

/// Formula result, tagged by the formula's output type.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaResult {
    String(Option<String>),
    Number(Option<f64>),
    Boolean(Option<bool>),
    Date(Option<DateValue>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RollupValue {
    pub function: Option<String>,
    pub result: RollupResult,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RollupResult {
    Number(Option<f64>),
    Date(Option<DateValue>),
    /// Each item is itself a tagged property payload.
    Array(Vec<PropertyTypeValue>),
    Incomplete,
    Unsupported,
}

/// File attached to a files property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub name: String,
    pub source: FileSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    External {
        url: String,
    },
    /// Hosted by Notion; the URL expires.
    Hosted {
        url: String,
        expiry_time: Option<DateTime<Utc>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueId {
    pub number: Option<i64>,
    pub prefix: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_value_refuses_text_accessor() {
        let value = PropertyValue::named("Priority", PropertyTypeValue::Number(Some(5.0)));
        assert_eq!(value.as_number(), Ok(&Some(5.0)));
        assert_eq!(
            value.as_text(),
            Err(ConversionError::WrongVariant {
                expected: "rich_text",
                actual: "number",
            })
        );
        assert!(value.as_title().is_err());
    }

    #[test]
    fn property_type_follows_variant() {
        let value = PropertyTypeValue::Checkbox(true);
        assert_eq!(value.property_type(), PropertyType::Checkbox);
        assert_eq!(value.as_checkbox(), Ok(&true));
    }
}
