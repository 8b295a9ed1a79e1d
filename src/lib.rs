// src/lib.rs
//! notionapi library: a typed client for the Notion REST API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `TransportError`, `ValidationError`
//! - **Configuration**: `ClientConfig`
//! - **Domain model**: `Page`, `PropertyValue`, `Block`, `BlockValue`, etc.
//! - **Domain types**: `PageId`, `DatabaseId`, `BlockId`, `ApiKey`, `Scalar`, etc.
//! - **API client**: `NotionApi`, `NotionTransport`, `NotionHttpClient`, decoders
//! - **Updates**: `PropertyUpdate`, `resolve_property_updates`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, ObjectKind, TransportError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::ClientConfig;

// --- Domain Model ---
pub use crate::model::{
    decode_block, decode_property, encode_block, encode_property, Block, BlockCommon,
    BlockValue, DatabaseQueryResult, NewBlock, Page, PageTitle, PaginatedList, Parent,
    PropertyTypeValue, PropertyValue, BLOCK_TYPES, PROPERTY_TYPES,
};

// --- Domain Types ---
pub use crate::types::{
    ApiKey, BlockId, DatabaseId, DateValue, FormulaResult, PageId, PropertyName, RichTextItem,
    RollupResult, Scalar, SelectOption, User, ValidatedUrl,
};

// --- API Client ---
pub use crate::api::{
    decode_block_children, decode_database_query_result, decode_page, fetch_all_pages,
    DatabaseQuery, NotionApi, NotionHttpClient, NotionTransport, PaginationResult,
};

// --- Updates ---
pub use crate::model::{resolve_property_updates, PropertyUpdate};
