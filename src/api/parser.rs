// src/api/parser.rs
//! Turns raw responses into domain values or typed service errors.

use super::responses::ApiErrorEnvelope;
use super::transport::HttpResponse;
use crate::error::{preview, ConversionError, NotionError, NotionErrorCode};

/// Decoder for a successful response body.
pub type Decoder<T> = fn(&str) -> Result<T, ConversionError>;

/// Routes a response: 2xx bodies go through `decode`, anything else is read
/// as an error envelope.
pub fn decode_response<T>(response: &HttpResponse, decode: Decoder<T>) -> Result<T, NotionError> {
    if response.is_success() {
        decode(&response.body).map_err(|e| {
            log::error!("Failed to decode response: {}", e);
            NotionError::from(e)
        })
    } else {
        Err(parse_error(response))
    }
}

/// Reads an error envelope, falling back to the HTTP status when the body is
/// not one.
pub fn parse_error(response: &HttpResponse) -> NotionError {
    match serde_json::from_str::<ApiErrorEnvelope>(&response.body) {
        Ok(envelope) => {
            log::warn!(
                "Notion API error {} ({}): {}",
                response.status,
                envelope.code,
                envelope.message
            );
            NotionError::Api {
                status: envelope.status.unwrap_or(response.status),
                code: NotionErrorCode::from_api_response(&envelope.code),
                message: envelope.message,
                request_id: envelope.request_id,
            }
        }
        Err(_) => {
            log::warn!("HTTP {} without an error envelope", response.status);
            NotionError::Api {
                status: response.status,
                code: NotionErrorCode::from_http_status(response.status),
                message: if response.body.trim().is_empty() {
                    format!("HTTP {}", response.status)
                } else {
                    preview(&response.body)
                },
                request_id: None,
            }
        }
    }
}
