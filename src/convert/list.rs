use super::ApiConverter;
use crate::api::responses::ApiList;
use crate::error::ConversionError;
use crate::model::ResultPage;
use std::marker::PhantomData;

/// Paginated list envelopes, converting each result with `C`.
pub struct ResultPageConverter<C>(PhantomData<C>);

impl<C: ApiConverter> ApiConverter for ResultPageConverter<C> {
    type Api = ApiList<C::Api>;
    type Model = ResultPage<C::Model>;

    const TARGET: &'static str = "ResultPage";

    fn api_to_model(api: &ApiList<C::Api>) -> Result<ResultPage<C::Model>, ConversionError> {
        Ok(ResultPage {
            results: C::decode_all(&api.results)?,
            next_cursor: api.next_cursor.clone(),
            has_more: api.has_more,
        })
    }

    fn model_to_api(model: &ResultPage<C::Model>) -> Result<ApiList<C::Api>, ConversionError> {
        Ok(ApiList {
            object: "list".to_string(),
            results: C::encode_all(&model.results)?,
            next_cursor: model.next_cursor.clone(),
            has_more: model.has_more,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::UserConverter;
    use serde_json::json;

    #[test]
    fn user_list_with_cursor() {
        let body = json!({
            "object": "list",
            "results": [
                {"object": "user", "id": "d40e767c-d7af-4b18-a86d-55c61f1e39a4", "type": "person", "person": {}},
                {"object": "user", "id": "9a3b5ae0-c6e6-482d-b0e1-ed315ee6dc57", "type": "bot", "bot": {}}
            ],
            "next_cursor": "fe2cc560-036c-44cd-90e8-294d5a74cebc",
            "has_more": true,
            "type": "user",
            "user": {}
        })
        .to_string();

        let page = ResultPageConverter::<UserConverter>::decode_json(&body).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(
            page.continuation(),
            Some("fe2cc560-036c-44cd-90e8-294d5a74cebc")
        );
    }

    #[test]
    fn one_bad_result_fails_the_page() {
        let body = json!({
            "results": [{"id": "d40e767c-d7af-4b18-a86d-55c61f1e39a4", "type": "robot"}],
            "has_more": false
        })
        .to_string();
        let err = ResultPageConverter::<UserConverter>::decode_json(&body).unwrap_err();
        assert!(err.to_string().contains("robot"));
    }
}
