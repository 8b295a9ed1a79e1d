// src/api/parser.rs
//! Aggregate decoders: turn raw API JSON into pages, blocks and paginated lists.

use super::responses::{PaginatedResponse, RawPage, ToDomain};
use super::types::NotionApiErrorResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode, TransportError};
use crate::model::{decode_block, Block, DatabaseQueryResult, Page, PaginatedList};
use serde::Deserialize;
use serde_json::Value;

/// Decodes a page object. Any failing property aborts the whole page.
pub fn decode_page(raw: &Value) -> Result<Page, AppError> {
    let page = RawPage::deserialize(raw)
        .map_err(|e| AppError::MalformedResponse(format!("page: {}", e)))?;
    log::debug!(
        "Decoding page {} with {} properties",
        page.id,
        page.properties.len()
    );
    page.to_domain()
}

/// Decodes the response of a database query.
pub fn decode_database_query_result(raw: &Value) -> Result<DatabaseQueryResult, AppError> {
    decode_paginated(raw, decode_page)
}

/// Decodes the response of a block children listing or append.
pub fn decode_block_children(raw: &Value) -> Result<PaginatedList<Block>, AppError> {
    decode_paginated(raw, decode_block)
}

fn decode_paginated<T>(
    raw: &Value,
    decode: impl Fn(&Value) -> Result<T, AppError>,
) -> Result<PaginatedList<T>, AppError> {
    let response = PaginatedResponse::deserialize(raw)
        .map_err(|e| AppError::MalformedResponse(format!("paginated list: {}", e)))?;

    if !response.has_more && response.next_cursor.is_some() {
        log::warn!("Server sent a next_cursor with has_more=false; ignoring the cursor");
    }

    let results = response
        .results
        .iter()
        .map(decode)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaginatedList::new(
        results,
        response.next_cursor,
        response.has_more,
    ))
}

/// Maps a non-2xx response onto a `TransportError`, keeping the raw body.
pub fn parse_error_body(status: u16, body: &str) -> TransportError {
    match serde_json::from_str::<NotionApiErrorResponse>(body) {
        Ok(error) => TransportError {
            status,
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
            body: body.to_string(),
        },
        Err(_) => TransportError {
            status,
            code: NotionErrorCode::from_http_status(status),
            message: preview(body),
            body: body.to_string(),
        },
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}
