use super::{parse_id, required, ApiConverter};
use crate::api::responses::ApiParent;
use crate::error::ConversionError;
use crate::model::Reference;

/// Parent pointers: `{"type": "database_id", "database_id": "..."}` and friends.
pub struct ReferenceConverter;

impl ApiConverter for ReferenceConverter {
    type Api = ApiParent;
    type Model = Reference;

    const TARGET: &'static str = "Reference";

    fn api_to_model(api: &ApiParent) -> Result<Reference, ConversionError> {
        let tag = required(Self::TARGET, "type", &api.parent_type)?;
        match tag.as_str() {
            "database_id" => {
                let raw = required(Self::TARGET, "database_id", &api.database_id)?;
                Ok(Reference::Database(parse_id(Self::TARGET, raw)?))
            }
            "page_id" => {
                let raw = required(Self::TARGET, "page_id", &api.page_id)?;
                Ok(Reference::Page(parse_id(Self::TARGET, raw)?))
            }
            "block_id" => {
                let raw = required(Self::TARGET, "block_id", &api.block_id)?;
                Ok(Reference::Block(parse_id(Self::TARGET, raw)?))
            }
            "workspace" => Ok(Reference::Workspace),
            other => Err(ConversionError::unknown_variant("parent type", other)),
        }
    }

    fn model_to_api(model: &Reference) -> Result<ApiParent, ConversionError> {
        let mut api = ApiParent {
            parent_type: Some(model.type_name().to_string()),
            database_id: None,
            page_id: None,
            block_id: None,
            workspace: None,
        };
        match model {
            Reference::Database(id) => api.database_id = Some(id.to_dashed()),
            Reference::Page(id) => api.page_id = Some(id.to_dashed()),
            Reference::Block(id) => api.block_id = Some(id.to_dashed()),
            Reference::Workspace => api.workspace = Some(true),
        }
        Ok(api)
    }
}
