// src/constants.rs
//! Constants that define how the client talks to the Notion API.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// API version sent in the `Notion-Version` header.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Base URL every endpoint path is resolved against.
pub const API_BASE_URL: &str = "https://api.notion.com/v1";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Upper bound on pages followed by a single pagination loop.
pub const MAX_PAGINATION_REQUESTS: usize = 10_000;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

pub const ENV_API_KEY: &str = "NOTION_API_KEY";
pub const ENV_API_BASE_URL: &str = "NOTION_API_BASE_URL";
pub const ENV_NOTION_VERSION: &str = "NOTION_VERSION";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
