use super::property_value::encode_properties;
use super::{
    format_timestamp, parse_id, parse_optional_timestamp, ApiConverter, PropertyValuesConverter,
    ReferenceConverter,
};
use crate::api::responses::{ApiNewPage, ApiPage, ApiPageUpdate};
use crate::error::ConversionError;
use crate::model::{NewPage, Page, PageUpdate};

pub struct PageConverter;

impl ApiConverter for PageConverter {
    type Api = ApiPage;
    type Model = Page;

    const TARGET: &'static str = "Page";

    fn api_to_model(api: &ApiPage) -> Result<Page, ConversionError> {
        let page = Page::new(
            parse_id(Self::TARGET, &api.id)?,
            ReferenceConverter::api_to_model(&api.parent)?,
            PropertyValuesConverter::api_to_model(&api.properties)?,
            api.archived,
        )
        .with_timestamps(
            parse_optional_timestamp(Self::TARGET, &api.created_time)?,
            parse_optional_timestamp(Self::TARGET, &api.last_edited_time)?,
        );

        Ok(match &api.url {
            Some(url) => page.with_url(url.clone()),
            None => page,
        })
    }

    fn model_to_api(model: &Page) -> Result<ApiPage, ConversionError> {
        Ok(ApiPage {
            object: Some("page".to_string()),
            id: model.id().to_dashed(),
            created_time: model.created_time().map(format_timestamp),
            last_edited_time: model.last_edited_time().map(format_timestamp),
            parent: ReferenceConverter::model_to_api(model.parent())?,
            archived: model.archived(),
            properties: encode_properties(model.property_values())?,
            url: model.url().map(str::to_string),
        })
    }
}

/// Body of a page creation request.
pub struct NewPageConverter;

impl ApiConverter for NewPageConverter {
    type Api = ApiNewPage;
    type Model = NewPage;

    const TARGET: &'static str = "NewPage";

    fn api_to_model(api: &ApiNewPage) -> Result<NewPage, ConversionError> {
        Ok(NewPage {
            parent: ReferenceConverter::api_to_model(&api.parent)?,
            property_values: PropertyValuesConverter::api_to_model(&api.properties)?,
        })
    }

    fn model_to_api(model: &NewPage) -> Result<ApiNewPage, ConversionError> {
        Ok(ApiNewPage {
            parent: ReferenceConverter::model_to_api(&model.parent)?,
            properties: PropertyValuesConverter::model_to_api(&model.property_values)?,
        })
    }
}

/// Body of a page update request.
pub struct PageUpdateConverter;

impl ApiConverter for PageUpdateConverter {
    type Api = ApiPageUpdate;
    type Model = PageUpdate;

    const TARGET: &'static str = "PageUpdate";

    fn api_to_model(api: &ApiPageUpdate) -> Result<PageUpdate, ConversionError> {
        Ok(PageUpdate {
            property_values: PropertyValuesConverter::api_to_model(&api.properties)?,
            archived: api.archived,
        })
    }

    fn model_to_api(model: &PageUpdate) -> Result<ApiPageUpdate, ConversionError> {
        Ok(ApiPageUpdate {
            properties: PropertyValuesConverter::model_to_api(&model.property_values)?,
            archived: model.archived,
        })
    }
}
