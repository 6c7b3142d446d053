// src/api/service.rs
//! One method per remote operation.
//!
//! The service only describes calls: each method returns an [`Operation`]
//! holding the request to send and the converter-backed decoder for its
//! response. Sending, authentication and lifecycle belong to the client.

use super::parser::Decoder;
use super::transport::{HttpMethod, HttpRequest};
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::convert::{
    ApiConverter, DatabaseConverter, NewPageConverter, PageConverter, PageUpdateConverter,
    ResultPageConverter, UserConverter,
};
use crate::error::{ConversionError, NotionError};
use crate::model::{
    Database, DatabaseQuery, NewPage, Page, PageUpdate, Pagination, ResultPage, User,
};
use crate::types::{DatabaseId, PageId, UserId, ValidationError};
use serde::Serialize;
use url::Url;

/// A request together with the decoder for its successful response.
pub struct Operation<T> {
    pub request: HttpRequest,
    pub decode: Decoder<T>,
}

impl<T> std::fmt::Debug for Operation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct NotionService {
    base_url: Url,
}

impl NotionService {
    /// `base_url` must end with a slash; endpoint paths are joined under it.
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // --- users -----------------------------------------------------------

    pub fn get_user(&self, id: &UserId) -> Result<Operation<User>, NotionError> {
        let url = self.endpoint(&format!("users/{}", id.to_dashed()))?;
        Ok(Operation {
            request: HttpRequest::new(HttpMethod::Get, url),
            decode: UserConverter::decode_json,
        })
    }

    /// The bot user the token belongs to.
    pub fn me(&self) -> Result<Operation<User>, NotionError> {
        Ok(Operation {
            request: HttpRequest::new(HttpMethod::Get, self.endpoint("users/me")?),
            decode: UserConverter::decode_json,
        })
    }

    pub fn list_users(
        &self,
        pagination: &Pagination,
    ) -> Result<Operation<ResultPage<User>>, NotionError> {
        let mut url = self.endpoint("users")?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(cursor) = &pagination.start_cursor {
                query.append_pair("start_cursor", cursor);
            }
            if let Some(size) = pagination.page_size {
                query.append_pair("page_size", &clamp_page_size(size).to_string());
            }
        }
        // An empty query string would still leave a trailing '?'.
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(Operation {
            request: HttpRequest::new(HttpMethod::Get, url),
            decode: ResultPageConverter::<UserConverter>::decode_json,
        })
    }

    // --- pages -----------------------------------------------------------

    pub fn get_page(&self, id: &PageId) -> Result<Operation<Page>, NotionError> {
        let url = self.endpoint(&format!("pages/{}", id.to_dashed()))?;
        Ok(Operation {
            request: HttpRequest::new(HttpMethod::Get, url),
            decode: PageConverter::decode_json,
        })
    }

    pub fn create_page(&self, page: &NewPage) -> Result<Operation<Page>, NotionError> {
        let body = json_body(NewPageConverter::TARGET, &NewPageConverter::model_to_api(page)?)?;
        Ok(Operation {
            request: HttpRequest::new(HttpMethod::Post, self.endpoint("pages")?).with_body(body),
            decode: PageConverter::decode_json,
        })
    }

    pub fn update_page(
        &self,
        id: &PageId,
        update: &PageUpdate,
    ) -> Result<Operation<Page>, NotionError> {
        let body = json_body(
            PageUpdateConverter::TARGET,
            &PageUpdateConverter::model_to_api(update)?,
        )?;
        let url = self.endpoint(&format!("pages/{}", id.to_dashed()))?;
        Ok(Operation {
            request: HttpRequest::new(HttpMethod::Patch, url).with_body(body),
            decode: PageConverter::decode_json,
        })
    }

    // --- databases -------------------------------------------------------

    pub fn get_database(&self, id: &DatabaseId) -> Result<Operation<Database>, NotionError> {
        let url = self.endpoint(&format!("databases/{}", id.to_dashed()))?;
        Ok(Operation {
            request: HttpRequest::new(HttpMethod::Get, url),
            decode: DatabaseConverter::decode_json,
        })
    }

    pub fn query_database(
        &self,
        id: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<Operation<ResultPage<Page>>, NotionError> {
        let query = DatabaseQuery {
            page_size: query.page_size.map(clamp_page_size),
            ..query.clone()
        };
        let url = self.endpoint(&format!("databases/{}/query", id.to_dashed()))?;
        Ok(Operation {
            request: HttpRequest::new(HttpMethod::Post, url)
                .with_body(json_body("DatabaseQuery", &query)?),
            decode: ResultPageConverter::<PageConverter>::decode_json,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ValidationError> {
        self.base_url
            .join(path)
            .map_err(|e| ValidationError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }
}

fn clamp_page_size(size: u32) -> u32 {
    size.clamp(1, NOTION_API_PAGE_SIZE)
}

fn json_body<T: Serialize>(target: &'static str, body: &T) -> Result<String, ConversionError> {
    serde_json::to_string(body).map_err(|e| ConversionError::Encoding {
        target,
        reason: e.to_string(),
    })
}
