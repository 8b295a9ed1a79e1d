// src/api/responses.rs
//! Raw response shapes, decoded with serde and then converted into domain types.

use crate::error::AppError;
use crate::model::{decode_property, Page, Parent};
use crate::types::{FileReference, Icon, PageId, PropertyName, User};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Generic paginated response wrapper. Results stay raw until each one is decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// A page object before its parent and properties are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    pub id: PageId,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
    #[serde(default)]
    pub created_by: User,
    #[serde(default)]
    pub last_edited_by: User,
    #[serde(default)]
    pub cover: Option<FileReference>,
    #[serde(default)]
    pub icon: Option<Icon>,
    pub parent: Value,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Trait for converting raw response types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, AppError>;
}

impl ToDomain<Page> for RawPage {
    fn to_domain(self) -> Result<Page, AppError> {
        let parent = Parent::decode(&self.parent)?;

        let mut properties = IndexMap::with_capacity(self.properties.len());
        for (name, wire) in &self.properties {
            let discriminator = wire.get("type").and_then(Value::as_str).ok_or_else(|| {
                AppError::malformed(
                    "<missing>",
                    format!("property '{}' has no 'type' field", name),
                )
            })?;
            let value = decode_property(discriminator, wire)?;
            properties.insert(PropertyName::new(name.as_str()), value);
        }

        Ok(Page {
            id: self.id,
            created_time: self.created_time,
            last_edited_time: self.last_edited_time,
            created_by: self.created_by,
            last_edited_by: self.last_edited_by,
            cover: self.cover,
            icon: self.icon,
            parent,
            archived: self.archived,
            url: self.url,
            public_url: self.public_url,
            properties,
        })
    }
}
