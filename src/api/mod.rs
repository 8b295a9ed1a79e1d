// src/api/mod.rs
//! Notion API interaction: the transport seam and the operations built on it.

pub mod client;
pub mod parser;
mod responses;
mod simple_pagination;
pub mod types;

use crate::config::ClientConfig;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use crate::model::{
    encode_block, resolve_property_updates, Block, DatabaseQueryResult, NewBlock, Page,
    PaginatedList, PropertyUpdate,
};
use crate::types::{BlockId, DatabaseId, PageId, PropertyName};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;

pub use client::NotionHttpClient;
pub use parser::{decode_block_children, decode_database_query_result, decode_page};
pub use responses::ToDomain;
pub use simple_pagination::fetch_all_pages;
pub use types::{AppendBlockChildren, DatabaseQuery, PaginationResult};

/// The ability to exchange JSON with the Notion API.
///
/// `path` is relative to the API base URL. A non-2xx answer must come back as
/// `AppError::Transport` carrying the status and raw body.
#[async_trait::async_trait]
pub trait NotionTransport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, AppError>;
}

/// Database, page and block operations over a transport.
#[derive(Clone)]
pub struct NotionApi {
    transport: Arc<dyn NotionTransport>,
}

impl NotionApi {
    pub fn new(transport: Arc<dyn NotionTransport>) -> Self {
        Self { transport }
    }

    /// Builds the API over a reqwest transport.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AppError> {
        Ok(Self::new(Arc::new(NotionHttpClient::new(config)?)))
    }

    /// Runs one page of a database query.
    pub async fn query_database(
        &self,
        database: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<DatabaseQueryResult, AppError> {
        let path = format!("databases/{}/query", database.to_dashed());
        let body = serde_json::to_value(query)?;
        let response = self.transport.send(Method::POST, &path, Some(&body)).await?;
        decode_database_query_result(&response)
    }

    /// Runs a database query and follows the cursor to the end.
    pub async fn query_database_all(
        &self,
        database: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<Vec<Page>, AppError> {
        let result = fetch_all_pages(move |cursor| {
            let query = query
                .clone()
                .with_page_size(NOTION_API_PAGE_SIZE as u32)
                .with_cursor(cursor);
            async move { self.query_database(database, &query).await }
        })
        .await?;
        Ok(result.items)
    }

    pub async fn retrieve_page(&self, page: &PageId) -> Result<Page, AppError> {
        let path = format!("pages/{}", page.to_dashed());
        let response = self.transport.send(Method::GET, &path, None).await?;
        decode_page(&response)
    }

    /// Re-fetches the page, resolves the updates against it and sends one PATCH.
    ///
    /// Nothing is sent when any update fails to resolve, or when every update
    /// turns out to be a no-op; in the latter case the fetched page is returned.
    pub async fn update_page_properties<I, N>(
        &self,
        page: &PageId,
        updates: I,
    ) -> Result<Page, AppError>
    where
        I: IntoIterator<Item = (N, PropertyUpdate)>,
        N: Into<PropertyName>,
    {
        let current = self.retrieve_page(page).await?;
        let properties = resolve_property_updates(&current, updates)?;

        if properties.is_empty() {
            log::info!("No property changes for page {}; skipping PATCH", page);
            return Ok(current);
        }

        log::debug!(
            "Updating {} properties on page {}",
            properties.len(),
            page
        );
        let path = format!("pages/{}", page.to_dashed());
        let body = json!({ "properties": properties });
        let response = self
            .transport
            .send(Method::PATCH, &path, Some(&body))
            .await
            .map_err(|err| match err {
                AppError::Transport(source) => AppError::UpdateFailed {
                    page_id: page.to_string(),
                    source,
                },
                other => other,
            })?;
        decode_page(&response)
    }

    /// Lists one page of a block's children, resuming from `cursor`.
    pub async fn retrieve_block_children(
        &self,
        block: &BlockId,
        cursor: Option<&str>,
    ) -> Result<PaginatedList<Block>, AppError> {
        let mut path = format!(
            "blocks/{}/children?page_size={}",
            block.to_dashed(),
            NOTION_API_PAGE_SIZE
        );
        if let Some(cursor) = cursor {
            path.push_str("&start_cursor=");
            path.extend(url::form_urlencoded::byte_serialize(cursor.as_bytes()));
        }
        let response = self.transport.send(Method::GET, &path, None).await?;
        decode_block_children(&response)
    }

    /// Lists every child of a block, following the cursor.
    pub async fn retrieve_all_block_children(
        &self,
        block: &BlockId,
    ) -> Result<Vec<Block>, AppError> {
        let result = fetch_all_pages(move |cursor| async move {
            self.retrieve_block_children(block, cursor.as_deref()).await
        })
        .await?;
        Ok(result.items)
    }

    /// Appends blocks under `block`, after the child `after` when given.
    pub async fn append_block_children(
        &self,
        block: &BlockId,
        children: &[NewBlock],
        after: Option<&BlockId>,
    ) -> Result<PaginatedList<Block>, AppError> {
        let request = AppendBlockChildren {
            children: children
                .iter()
                .map(encode_block)
                .collect::<Result<Vec<_>, _>>()?,
            after: after.map(BlockId::to_dashed),
        };
        let path = format!("blocks/{}/children", block.to_dashed());
        let body = serde_json::to_value(&request)?;
        let response = self.transport.send(Method::PATCH, &path, Some(&body)).await?;
        decode_block_children(&response)
    }
}
