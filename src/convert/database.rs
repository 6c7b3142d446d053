use super::{
    format_timestamp, parse_id, parse_optional_timestamp, required, ApiConverter,
    PropertyTypeConverter, ReferenceConverter, RichTextConverter,
};
use crate::api::responses::{ApiDatabase, ApiPropertySpec};
use crate::error::ConversionError;
use crate::model::{Database, PropertySpec};
use indexmap::IndexMap;
use serde_json::{Map, Value};

pub struct DatabaseConverter;

impl ApiConverter for DatabaseConverter {
    type Api = ApiDatabase;
    type Model = Database;

    const TARGET: &'static str = "Database";

    fn api_to_model(api: &ApiDatabase) -> Result<Database, ConversionError> {
        let database = Database::new(
            parse_id(Self::TARGET, &api.id)?,
            RichTextConverter::decode_all(&api.title)?,
            ReferenceConverter::api_to_model(&api.parent)?,
            PropertySpecsConverter::api_to_model(&api.properties)?,
            api.archived,
        )
        .with_timestamps(
            parse_optional_timestamp(Self::TARGET, &api.created_time)?,
            parse_optional_timestamp(Self::TARGET, &api.last_edited_time)?,
        );

        Ok(match &api.url {
            Some(url) => database.with_url(url.clone()),
            None => database,
        })
    }

    fn model_to_api(model: &Database) -> Result<ApiDatabase, ConversionError> {
        Ok(ApiDatabase {
            object: Some("database".to_string()),
            id: model.id().to_dashed(),
            created_time: model.created_time().map(format_timestamp),
            last_edited_time: model.last_edited_time().map(format_timestamp),
            title: RichTextConverter::encode_all(model.title())?,
            parent: ReferenceConverter::model_to_api(model.parent())?,
            archived: model.archived(),
            properties: encode_specs(model.property_specs()),
            url: model.url().map(str::to_string),
        })
    }
}

/// The schema of a database, keyed by property name.
pub struct PropertySpecsConverter;

impl ApiConverter for PropertySpecsConverter {
    type Api = IndexMap<String, ApiPropertySpec>;
    type Model = Vec<PropertySpec>;

    const TARGET: &'static str = "PropertySpec";

    fn api_to_model(
        api: &IndexMap<String, ApiPropertySpec>,
    ) -> Result<Vec<PropertySpec>, ConversionError> {
        api.values()
            .map(|spec| {
                let tag = required(Self::TARGET, "type", &spec.property_type)?;
                Ok(PropertySpec {
                    id: spec.id.clone(),
                    name: spec.name.clone(),
                    property_type: PropertyTypeConverter::from_literal(tag)?,
                })
            })
            .collect()
    }

    fn model_to_api(
        model: &Vec<PropertySpec>,
    ) -> Result<IndexMap<String, ApiPropertySpec>, ConversionError> {
        Ok(encode_specs(model))
    }
}

// Configuration is not modelled, so every column is written back as `{"<type>": {}}`.
fn encode_specs(specs: &[PropertySpec]) -> IndexMap<String, ApiPropertySpec> {
    specs
        .iter()
        .map(|spec| {
            let tag = PropertyTypeConverter::literal(&spec.property_type);
            let mut configuration = Map::new();
            configuration.insert(tag.to_string(), Value::Object(Map::new()));
            (
                spec.name.clone(),
                ApiPropertySpec {
                    id: spec.id.clone(),
                    name: spec.name.clone(),
                    property_type: Some(tag.to_string()),
                    configuration,
                },
            )
        })
        .collect()
}
