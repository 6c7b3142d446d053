//! Property values: the largest tagged union on the wire.
//!
//! `{"id": "a%3Cb", "type": "number", "number": 5}` is decoded by reading the
//! `type` literal into a [`PropertyType`], then matching exhaustively on it to
//! pick the payload shape under the key of the same name.

use super::{
    format_timestamp, from_payload, parse_id, parse_optional_timestamp, parse_timestamp, required,
    to_payload, ApiConverter, ColorConverter, PropertyTypeConverter, RichTextConverter,
    UserReferenceConverter,
};
use crate::api::responses::{
    ApiDate, ApiExternalFile, ApiFile, ApiHostedFile, ApiObjectRef, ApiPropertyValue, ApiRichText,
    ApiRollup, ApiSelectOption, ApiTagged, ApiUniqueId, ApiUser,
};
use crate::error::ConversionError;
use crate::model::{
    DateOrDateTime, DateValue, FileReference, FileSource, FormulaResult, PropertyType,
    PropertyTypeValue, PropertyValue, RollupResult, RollupValue, SelectOption, UniqueId,
};
use chrono::{DateTime, NaiveDate, SecondsFormat};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// A single property payload, without its name.
pub struct PropertyTypeValueConverter;

impl ApiConverter for PropertyTypeValueConverter {
    type Api = ApiPropertyValue;
    type Model = PropertyTypeValue;

    const TARGET: &'static str = "PropertyValue";

    fn api_to_model(api: &ApiPropertyValue) -> Result<PropertyTypeValue, ConversionError> {
        let tag = required(Self::TARGET, "type", &api.property_type)?;
        let property_type = PropertyTypeConverter::from_literal(tag)?;
        let payload = tagged_payload(&api.payload, property_type)?;
        const T: &str = PropertyTypeValueConverter::TARGET;

        let value = match property_type {
            PropertyType::Title => PropertyTypeValue::Title(rich_text(payload)?),
            PropertyType::RichText => PropertyTypeValue::RichText(rich_text(payload)?),
            PropertyType::Number => PropertyTypeValue::Number(from_payload(T, payload)?),
            PropertyType::Select => PropertyTypeValue::Select(option(payload)?),
            PropertyType::Status => PropertyTypeValue::Status(option(payload)?),
            PropertyType::MultiSelect => {
                let options: Vec<ApiSelectOption> = from_payload(T, payload)?;
                PropertyTypeValue::MultiSelect(SelectOptionConverter::decode_all(&options)?)
            }
            PropertyType::Date => {
                let date: Option<ApiDate> = from_payload(T, payload)?;
                PropertyTypeValue::Date(
                    date.as_ref()
                        .map(DateValueConverter::api_to_model)
                        .transpose()?,
                )
            }
            PropertyType::People => {
                let people: Vec<ApiUser> = from_payload(T, payload)?;
                PropertyTypeValue::People(UserReferenceConverter::decode_all(&people)?)
            }
            PropertyType::Files => {
                let files: Vec<ApiFile> = from_payload(T, payload)?;
                PropertyTypeValue::Files(FileReferenceConverter::decode_all(&files)?)
            }
            PropertyType::Checkbox => PropertyTypeValue::Checkbox(from_payload(T, payload)?),
            PropertyType::Url => PropertyTypeValue::Url(from_payload(T, payload)?),
            PropertyType::Email => PropertyTypeValue::Email(from_payload(T, payload)?),
            PropertyType::PhoneNumber => PropertyTypeValue::PhoneNumber(from_payload(T, payload)?),
            PropertyType::Formula => {
                let formula: ApiTagged = from_payload(T, payload)?;
                PropertyTypeValue::Formula(FormulaResultConverter::api_to_model(&formula)?)
            }
            PropertyType::Relation => {
                let relations: Vec<ApiObjectRef> = from_payload(T, payload)?;
                PropertyTypeValue::Relation(
                    relations
                        .iter()
                        .map(|relation| parse_id(T, &relation.id))
                        .collect::<Result<_, _>>()?,
                )
            }
            PropertyType::Rollup => {
                let rollup: ApiRollup = from_payload(T, payload)?;
                PropertyTypeValue::Rollup(RollupValueConverter::api_to_model(&rollup)?)
            }
            PropertyType::CreatedTime => PropertyTypeValue::CreatedTime(timestamp(payload)?),
            PropertyType::LastEditedTime => PropertyTypeValue::LastEditedTime(timestamp(payload)?),
            PropertyType::CreatedBy => PropertyTypeValue::CreatedBy(user(payload)?),
            PropertyType::LastEditedBy => PropertyTypeValue::LastEditedBy(user(payload)?),
            PropertyType::UniqueId => {
                let unique_id: ApiUniqueId = from_payload(T, payload)?;
                PropertyTypeValue::UniqueId(UniqueId {
                    number: unique_id.number,
                    prefix: unique_id.prefix,
                })
            }
        };
        Ok(value)
    }

    fn model_to_api(model: &PropertyTypeValue) -> Result<ApiPropertyValue, ConversionError> {
        const T: &str = PropertyTypeValueConverter::TARGET;
        let tag = PropertyTypeConverter::literal(&model.property_type());

        let payload = match model {
            PropertyTypeValue::Title(items) | PropertyTypeValue::RichText(items) => {
                to_payload(T, &RichTextConverter::encode_all(items)?)?
            }
            PropertyTypeValue::Number(number) => number_payload(T, number)?,
            PropertyTypeValue::Select(option) | PropertyTypeValue::Status(option) => {
                let api = option
                    .as_ref()
                    .map(SelectOptionConverter::model_to_api)
                    .transpose()?;
                to_payload(T, &api)?
            }
            PropertyTypeValue::MultiSelect(options) => {
                to_payload(T, &SelectOptionConverter::encode_all(options)?)?
            }
            PropertyTypeValue::Date(date) => {
                let api = date
                    .as_ref()
                    .map(DateValueConverter::model_to_api)
                    .transpose()?;
                to_payload(T, &api)?
            }
            PropertyTypeValue::People(people) => {
                to_payload(T, &UserReferenceConverter::encode_all(people)?)?
            }
            PropertyTypeValue::Files(files) => {
                to_payload(T, &FileReferenceConverter::encode_all(files)?)?
            }
            PropertyTypeValue::Checkbox(checked) => Value::Bool(*checked),
            PropertyTypeValue::Url(text)
            | PropertyTypeValue::Email(text)
            | PropertyTypeValue::PhoneNumber(text) => to_payload(T, text)?,
            PropertyTypeValue::Formula(result) => {
                to_payload(T, &FormulaResultConverter::model_to_api(result)?)?
            }
            PropertyTypeValue::Relation(ids) => {
                let relations: Vec<ApiObjectRef> = ids
                    .iter()
                    .map(|id| ApiObjectRef {
                        object: None,
                        id: id.to_dashed(),
                    })
                    .collect();
                to_payload(T, &relations)?
            }
            PropertyTypeValue::Rollup(rollup) => {
                to_payload(T, &RollupValueConverter::model_to_api(rollup)?)?
            }
            PropertyTypeValue::CreatedTime(time) | PropertyTypeValue::LastEditedTime(time) => {
                Value::String(format_timestamp(time))
            }
            PropertyTypeValue::CreatedBy(user) | PropertyTypeValue::LastEditedBy(user) => {
                to_payload(T, &UserReferenceConverter::model_to_api(user)?)?
            }
            PropertyTypeValue::UniqueId(unique_id) => to_payload(
                T,
                &ApiUniqueId {
                    number: unique_id.number,
                    prefix: unique_id.prefix.clone(),
                },
            )?,
        };

        let mut map = Map::new();
        map.insert(tag.to_string(), payload);
        Ok(ApiPropertyValue {
            id: None,
            property_type: Some(tag.to_string()),
            payload: map,
        })
    }
}

/// The `properties` object of a page: property name to value, in wire order.
pub struct PropertyValuesConverter;

impl ApiConverter for PropertyValuesConverter {
    type Api = IndexMap<String, ApiPropertyValue>;
    type Model = Vec<PropertyValue>;

    const TARGET: &'static str = "PropertyValues";

    fn api_to_model(
        api: &IndexMap<String, ApiPropertyValue>,
    ) -> Result<Vec<PropertyValue>, ConversionError> {
        api.iter()
            .map(|(name, value)| {
                Ok(PropertyValue::new(
                    value.id.clone(),
                    name.clone(),
                    PropertyTypeValueConverter::api_to_model(value)?,
                ))
            })
            .collect()
    }

    fn model_to_api(
        model: &Vec<PropertyValue>,
    ) -> Result<IndexMap<String, ApiPropertyValue>, ConversionError> {
        encode_properties(model)
    }
}

/// Property names key the wire object, so each name may appear only once.
pub(super) fn encode_properties(
    values: &[PropertyValue],
) -> Result<IndexMap<String, ApiPropertyValue>, ConversionError> {
    let mut properties = IndexMap::with_capacity(values.len());
    for value in values {
        let mut api = PropertyTypeValueConverter::model_to_api(value.value())?;
        api.id = value.id().map(str::to_string);
        if properties.insert(value.name().to_string(), api).is_some() {
            return Err(ConversionError::Encoding {
                target: PropertyValuesConverter::TARGET,
                reason: format!("duplicate property name '{}'", value.name()),
            });
        }
    }
    Ok(properties)
}

pub struct SelectOptionConverter;

impl ApiConverter for SelectOptionConverter {
    type Api = ApiSelectOption;
    type Model = SelectOption;

    const TARGET: &'static str = "SelectOption";

    fn api_to_model(api: &ApiSelectOption) -> Result<SelectOption, ConversionError> {
        Ok(SelectOption {
            id: api.id.clone(),
            name: api.name.clone(),
            color: api
                .color
                .as_deref()
                .map(ColorConverter::from_literal)
                .transpose()?,
        })
    }

    fn model_to_api(model: &SelectOption) -> Result<ApiSelectOption, ConversionError> {
        Ok(ApiSelectOption {
            id: model.id.clone(),
            name: model.name.clone(),
            color: model
                .color
                .as_ref()
                .map(|color| ColorConverter::literal(color).to_string()),
        })
    }
}

/// `{"start": "2024-03-01", "end": null, "time_zone": null}`
///
/// A ten-character value is a calendar date; anything longer must be RFC 3339.
pub struct DateValueConverter;

impl DateValueConverter {
    fn parse(raw: &str) -> Result<DateOrDateTime, ConversionError> {
        let parsed = if raw.len() == 10 {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(DateOrDateTime::Date)
                .map_err(|e| e.to_string())
        } else {
            DateTime::parse_from_rfc3339(raw)
                .map(DateOrDateTime::DateTime)
                .map_err(|e| e.to_string())
        };
        parsed.map_err(|reason| ConversionError::Malformed {
            target: Self::TARGET,
            value: raw.to_string(),
            reason,
        })
    }

    fn format(value: &DateOrDateTime) -> String {
        match value {
            DateOrDateTime::Date(date) => date.format("%Y-%m-%d").to_string(),
            DateOrDateTime::DateTime(date_time) => {
                date_time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
            }
        }
    }
}

impl ApiConverter for DateValueConverter {
    type Api = ApiDate;
    type Model = DateValue;

    const TARGET: &'static str = "DateValue";

    fn api_to_model(api: &ApiDate) -> Result<DateValue, ConversionError> {
        Ok(DateValue {
            start: Self::parse(&api.start)?,
            end: api.end.as_deref().map(Self::parse).transpose()?,
            time_zone: api.time_zone.clone(),
        })
    }

    fn model_to_api(model: &DateValue) -> Result<ApiDate, ConversionError> {
        Ok(ApiDate {
            start: Self::format(&model.start),
            end: model.end.as_ref().map(Self::format),
            time_zone: model.time_zone.clone(),
        })
    }
}

pub struct FileReferenceConverter;

impl ApiConverter for FileReferenceConverter {
    type Api = ApiFile;
    type Model = FileReference;

    const TARGET: &'static str = "FileReference";

    fn api_to_model(api: &ApiFile) -> Result<FileReference, ConversionError> {
        let tag = required(Self::TARGET, "type", &api.file_type)?;
        let source = match tag.as_str() {
            "external" => {
                let external = required(Self::TARGET, "external", &api.external)?;
                FileSource::External {
                    url: external.url.clone(),
                }
            }
            "file" => {
                let hosted = required(Self::TARGET, "file", &api.file)?;
                FileSource::Hosted {
                    url: hosted.url.clone(),
                    expiry_time: parse_optional_timestamp(Self::TARGET, &hosted.expiry_time)?,
                }
            }
            other => return Err(ConversionError::unknown_variant("file type", other)),
        };
        Ok(FileReference {
            name: api.name.clone(),
            source,
        })
    }

    fn model_to_api(model: &FileReference) -> Result<ApiFile, ConversionError> {
        let (file_type, external, file) = match &model.source {
            FileSource::External { url } => (
                "external",
                Some(ApiExternalFile { url: url.clone() }),
                None,
            ),
            FileSource::Hosted { url, expiry_time } => (
                "file",
                None,
                Some(ApiHostedFile {
                    url: url.clone(),
                    expiry_time: expiry_time.as_ref().map(format_timestamp),
                }),
            ),
        };
        Ok(ApiFile {
            name: model.name.clone(),
            file_type: Some(file_type.to_string()),
            external,
            file,
        })
    }
}

/// `{"type": "number", "number": 42}`
pub struct FormulaResultConverter;

impl ApiConverter for FormulaResultConverter {
    type Api = ApiTagged;
    type Model = FormulaResult;

    const TARGET: &'static str = "FormulaResult";

    fn api_to_model(api: &ApiTagged) -> Result<FormulaResult, ConversionError> {
        const T: &str = FormulaResultConverter::TARGET;
        let tag = required(T, "type", &api.tag)?;
        match tag.as_str() {
            "string" => Ok(FormulaResult::String(from_payload(
                T,
                field(T, &api.payload, "string")?,
            )?)),
            "number" => Ok(FormulaResult::Number(from_payload(
                T,
                field(T, &api.payload, "number")?,
            )?)),
            "boolean" => Ok(FormulaResult::Boolean(from_payload(
                T,
                field(T, &api.payload, "boolean")?,
            )?)),
            "date" => {
                let date: Option<ApiDate> = from_payload(T, field(T, &api.payload, "date")?)?;
                Ok(FormulaResult::Date(
                    date.as_ref()
                        .map(DateValueConverter::api_to_model)
                        .transpose()?,
                ))
            }
            other => Err(ConversionError::unknown_variant("formula type", other)),
        }
    }

    fn model_to_api(model: &FormulaResult) -> Result<ApiTagged, ConversionError> {
        const T: &str = FormulaResultConverter::TARGET;
        let (tag, payload) = match model {
            FormulaResult::String(text) => ("string", to_payload(T, text)?),
            FormulaResult::Number(number) => ("number", number_payload(T, number)?),
            FormulaResult::Boolean(flag) => ("boolean", to_payload(T, flag)?),
            FormulaResult::Date(date) => {
                let api = date
                    .as_ref()
                    .map(DateValueConverter::model_to_api)
                    .transpose()?;
                ("date", to_payload(T, &api)?)
            }
        };
        let mut map = Map::new();
        map.insert(tag.to_string(), payload);
        Ok(ApiTagged {
            tag: Some(tag.to_string()),
            payload: map,
        })
    }
}

/// Rollups aggregate related pages; `array` results hold ordinary property
/// payloads and are decoded with [`PropertyTypeValueConverter`].
pub struct RollupValueConverter;

impl ApiConverter for RollupValueConverter {
    type Api = ApiRollup;
    type Model = RollupValue;

    const TARGET: &'static str = "RollupValue";

    fn api_to_model(api: &ApiRollup) -> Result<RollupValue, ConversionError> {
        const T: &str = RollupValueConverter::TARGET;
        let tag = required(T, "type", &api.rollup_type)?;
        let result = match tag.as_str() {
            "number" => RollupResult::Number(from_payload(T, field(T, &api.payload, "number")?)?),
            "date" => {
                let date: Option<ApiDate> = from_payload(T, field(T, &api.payload, "date")?)?;
                RollupResult::Date(
                    date.as_ref()
                        .map(DateValueConverter::api_to_model)
                        .transpose()?,
                )
            }
            "array" => {
                let items: Vec<ApiPropertyValue> =
                    from_payload(T, field(T, &api.payload, "array")?)?;
                RollupResult::Array(PropertyTypeValueConverter::decode_all(&items)?)
            }
            "incomplete" => RollupResult::Incomplete,
            "unsupported" => RollupResult::Unsupported,
            other => return Err(ConversionError::unknown_variant("rollup type", other)),
        };
        Ok(RollupValue {
            function: api.function.clone(),
            result,
        })
    }

    fn model_to_api(model: &RollupValue) -> Result<ApiRollup, ConversionError> {
        const T: &str = RollupValueConverter::TARGET;
        let mut payload = Map::new();
        let tag = match &model.result {
            RollupResult::Number(number) => {
                payload.insert("number".to_string(), number_payload(T, number)?);
                "number"
            }
            RollupResult::Date(date) => {
                let api = date
                    .as_ref()
                    .map(DateValueConverter::model_to_api)
                    .transpose()?;
                payload.insert("date".to_string(), to_payload(T, &api)?);
                "date"
            }
            RollupResult::Array(items) => {
                let items = PropertyTypeValueConverter::encode_all(items)?;
                payload.insert("array".to_string(), to_payload(T, &items)?);
                "array"
            }
            RollupResult::Incomplete => "incomplete",
            RollupResult::Unsupported => "unsupported",
        };
        Ok(ApiRollup {
            rollup_type: Some(tag.to_string()),
            function: model.function.clone(),
            payload,
        })
    }
}

/// JSON cannot carry NaN or infinities.
fn number_payload(target: &'static str, number: &Option<f64>) -> Result<Value, ConversionError> {
    match number {
        Some(n) if !n.is_finite() => Err(ConversionError::Encoding {
            target,
            reason: format!("number {} cannot be represented in JSON", n),
        }),
        _ => to_payload(target, number),
    }
}

fn field<'a>(
    target: &'static str,
    payload: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a Value, ConversionError> {
    payload.get(key).ok_or(ConversionError::MissingField {
        target,
        field: key,
    })
}

/// Finds the payload stored under the tag's own key. When it is absent but the
/// key of another property type is present, the tag and payload disagree.
fn tagged_payload(
    payload: &Map<String, Value>,
    property_type: PropertyType,
) -> Result<&Value, ConversionError> {
    let tag = PropertyTypeConverter::literal(&property_type);
    if let Some(value) = payload.get(tag) {
        return Ok(value);
    }
    match payload
        .keys()
        .find(|key| PropertyTypeConverter::from_literal(key).is_ok())
    {
        Some(found) => Err(ConversionError::TagMismatch {
            target: PropertyTypeValueConverter::TARGET,
            tag: tag.to_string(),
            found: found.clone(),
        }),
        None => Err(ConversionError::MissingField {
            target: PropertyTypeValueConverter::TARGET,
            field: tag,
        }),
    }
}

fn rich_text(payload: &Value) -> Result<Vec<crate::model::RichText>, ConversionError> {
    let items: Vec<ApiRichText> = from_payload(PropertyTypeValueConverter::TARGET, payload)?;
    RichTextConverter::decode_all(&items)
}

fn option(payload: &Value) -> Result<Option<SelectOption>, ConversionError> {
    let option: Option<ApiSelectOption> =
        from_payload(PropertyTypeValueConverter::TARGET, payload)?;
    option
        .as_ref()
        .map(SelectOptionConverter::api_to_model)
        .transpose()
}

fn timestamp(payload: &Value) -> Result<chrono::DateTime<chrono::Utc>, ConversionError> {
    let target = PropertyTypeValueConverter::TARGET;
    let raw: String = from_payload(target, payload)?;
    parse_timestamp(target, &raw)
}

fn user(payload: &Value) -> Result<crate::model::UserReference, ConversionError> {
    let user: ApiUser = from_payload(PropertyTypeValueConverter::TARGET, payload)?;
    UserReferenceConverter::api_to_model(&user)
}
