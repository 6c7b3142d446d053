//! Bidirectional converters between wire payloads and the domain model.
//!
//! Every converter is a zero-sized type implementing [`ApiConverter`]; none
//! of them hold state, so they can be used from any number of tasks at once.
//!
//! Two policies apply throughout:
//! - unknown *fields* are ignored (the wire structs simply do not declare them);
//! - unknown *enumerated values* (user types, property types, colors, tags of
//!   any tagged union) fail with [`ConversionError::UnknownVariant`].

mod database;
mod enums;
mod list;
mod page;
mod property_value;
mod reference;
mod rich_text;
mod user;

pub use database::{DatabaseConverter, PropertySpecsConverter};
pub use enums::{ColorConverter, PropertyTypeConverter, UserTypeConverter};
pub use list::ResultPageConverter;
pub use page::{NewPageConverter, PageConverter, PageUpdateConverter};
pub use property_value::{
    DateValueConverter, FileReferenceConverter, FormulaResultConverter, PropertyTypeValueConverter,
    PropertyValuesConverter, RollupValueConverter, SelectOptionConverter,
};
pub use reference::ReferenceConverter;
pub use rich_text::{MentionConverter, RichTextConverter};
pub use user::{UserConverter, UserReferenceConverter};

use crate::error::ConversionError;
use crate::types::Id;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A pure mapping between an API-shaped value and a domain value.
///
/// `api_to_model(model_to_api(v)) == v` holds for every value a converter can
/// encode.
pub trait ApiConverter {
    type Api;
    type Model;

    /// Name of the domain type, used in error messages.
    const TARGET: &'static str;

    fn api_to_model(api: &Self::Api) -> Result<Self::Model, ConversionError>;

    fn model_to_api(model: &Self::Model) -> Result<Self::Api, ConversionError>;

    /// Parses a response body and converts it.
    fn decode_json(body: &str) -> Result<Self::Model, ConversionError>
    where
        Self::Api: DeserializeOwned,
    {
        let api: Self::Api =
            serde_json::from_str(body).map_err(|e| ConversionError::InvalidJson {
                target: Self::TARGET,
                reason: e.to_string(),
            })?;
        Self::api_to_model(&api)
    }

    fn decode_value(value: &Value) -> Result<Self::Model, ConversionError>
    where
        Self::Api: DeserializeOwned,
    {
        let api: Self::Api = from_payload(Self::TARGET, value)?;
        Self::api_to_model(&api)
    }

    fn encode_value(model: &Self::Model) -> Result<Value, ConversionError>
    where
        Self::Api: Serialize,
    {
        to_payload(Self::TARGET, &Self::model_to_api(model)?)
    }

    fn decode_all(apis: &[Self::Api]) -> Result<Vec<Self::Model>, ConversionError> {
        apis.iter().map(Self::api_to_model).collect()
    }

    fn encode_all(models: &[Self::Model]) -> Result<Vec<Self::Api>, ConversionError> {
        models.iter().map(Self::model_to_api).collect()
    }
}

/// Deserializes a nested JSON value into a wire struct.
pub(crate) fn from_payload<T: DeserializeOwned>(
    target: &'static str,
    value: &Value,
) -> Result<T, ConversionError> {
    T::deserialize(value).map_err(|e| ConversionError::malformed(target, value, e.to_string()))
}

pub(crate) fn to_payload<T: Serialize>(
    target: &'static str,
    value: &T,
) -> Result<Value, ConversionError> {
    serde_json::to_value(value).map_err(|e| ConversionError::Encoding {
        target,
        reason: e.to_string(),
    })
}

pub(crate) fn required<'a, T>(
    target: &'static str,
    field: &'static str,
    value: &'a Option<T>,
) -> Result<&'a T, ConversionError> {
    value
        .as_ref()
        .ok_or(ConversionError::MissingField { target, field })
}

pub(crate) fn parse_id<T>(target: &'static str, raw: &str) -> Result<Id<T>, ConversionError> {
    Id::parse(raw).map_err(|e| ConversionError::Malformed {
        target,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn parse_timestamp(
    target: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, ConversionError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| ConversionError::Malformed {
            target,
            value: raw.to_string(),
            reason: format!("invalid timestamp: {}", e),
        })
}

pub(crate) fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) fn parse_optional_timestamp(
    target: &'static str,
    raw: &Option<String>,
) -> Result<Option<DateTime<Utc>>, ConversionError> {
    raw.as_deref()
        .map(|raw| parse_timestamp(target, raw))
        .transpose()
}
