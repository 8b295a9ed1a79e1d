mod block;
pub mod blocks;
pub mod common;
pub mod properties;
mod property_value;
pub mod update;

pub use block::{decode_block, encode_block, Block, BlockValue, NewBlock, BLOCK_TYPES};
pub use blocks::*;
pub use common::*;
pub use properties::{decode_property, encode_property, PROPERTY_TYPES};
pub use property_value::{PropertyTypeValue, PropertyValue};
pub use update::{resolve_property_updates, PropertyUpdate};

use crate::error::AppError;
use crate::types::{
    plain_text_of, BlockId, DatabaseId, FileReference, Icon, PageId, PropertyName, User,
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// A Notion page, built only by decoding a server response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub id: PageId,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
    pub created_by: User,
    pub last_edited_by: User,
    pub cover: Option<FileReference>,
    pub icon: Option<Icon>,
    pub parent: Parent,
    pub archived: bool,
    pub url: String,
    pub public_url: Option<String>,
    /// In the order the server sent them.
    pub properties: IndexMap<PropertyName, PropertyValue>,
}

impl Page {
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Plain text of the page's title property, empty when it has none.
    pub fn title(&self) -> PageTitle {
        let text = self
            .properties
            .values()
            .find_map(|property| match &property.value {
                PropertyTypeValue::Title { title } => Some(plain_text_of(title)),
                _ => None,
            })
            .unwrap_or_default();
        PageTitle::new(text)
    }
}

/// Parent reference with typed IDs. Only the ID matching the parent kind is kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Parent {
    #[serde(rename = "page_id")]
    Page { page_id: PageId },
    #[serde(rename = "database_id")]
    Database { database_id: DatabaseId },
    #[serde(rename = "block_id")]
    Block { block_id: BlockId },
    #[serde(rename = "workspace")]
    Workspace,
}

impl Parent {
    /// Decodes a `{"type": ..., "<type>": id}` parent object.
    pub fn decode(raw: &Value) -> Result<Self, AppError> {
        let kind = raw
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::MalformedResponse("parent has no 'type' field".to_string()))?;
        let id = |key: &str| {
            raw.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    AppError::MalformedResponse(format!("'{}' parent has no '{}'", kind, key))
                })
        };

        match kind {
            "page_id" => Ok(Parent::Page {
                page_id: PageId::from_normalized(id("page_id")?),
            }),
            "database_id" => Ok(Parent::Database {
                database_id: DatabaseId::from_normalized(id("database_id")?),
            }),
            "block_id" => Ok(Parent::Block {
                block_id: BlockId::from_normalized(id("block_id")?),
            }),
            "workspace" => Ok(Parent::Workspace),
            other => Err(AppError::UnsupportedParentType(other.to_string())),
        }
    }
}

/// Page title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageTitle(String);

impl PageTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of a cursor-paginated listing.
///
/// `next_cursor` is always `None` once `has_more` is false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedList<T> {
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> PaginatedList<T> {
    pub fn new(results: Vec<T>, next_cursor: Option<String>, has_more: bool) -> Self {
        Self {
            results,
            next_cursor: if has_more { next_cursor } else { None },
            has_more,
        }
    }
}

/// Result of a database query.
pub type DatabaseQueryResult = PaginatedList<Page>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parent_keeps_only_matching_id() {
        let parent = Parent::decode(&json!({
            "type": "database_id",
            "database_id": "d9824bdc-8445-4327-be8b-5b47500af6ce"
        }))
        .unwrap();
        assert_eq!(
            parent,
            Parent::Database {
                database_id: DatabaseId::from_normalized(
                    "d9824bdc-8445-4327-be8b-5b47500af6ce".to_string()
                )
            }
        );
        assert_eq!(
            Parent::decode(&json!({"type": "workspace", "workspace": true})).unwrap(),
            Parent::Workspace
        );
    }

    #[test]
    fn unknown_parent_is_unsupported() {
        let err = Parent::decode(&json!({"type": "data_source_id", "data_source_id": "x"}))
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedParentType(kind) if kind == "data_source_id"));
    }

    #[test]
    fn exhausted_list_drops_cursor() {
        let list: PaginatedList<u8> = PaginatedList::new(vec![1], Some("stale".to_string()), false);
        assert_eq!(list.next_cursor, None);
    }
}
