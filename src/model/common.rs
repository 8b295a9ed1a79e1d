use super::Parent;
use crate::error::AppError;
use crate::types::BlockId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockCommon {
    pub id: BlockId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<DateTime<Utc>>,
    pub has_children: bool,
    pub archived: bool,
}

#[derive(Deserialize)]
struct RawBlockCommon {
    id: BlockId,
    #[serde(default)]
    parent: Option<Value>,
    #[serde(default)]
    created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    last_edited_time: Option<DateTime<Utc>>,
    #[serde(default)]
    has_children: bool,
    #[serde(default)]
    archived: bool,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            parent: None,
            created_time: None,
            last_edited_time: None,
            has_children: false,
            archived: false,
        }
    }

    /// Reads the metadata that sits next to a block's typed content.
    pub(crate) fn decode(raw: &Value) -> Result<Self, AppError> {
        let raw = RawBlockCommon::deserialize(raw)
            .map_err(|e| AppError::MalformedResponse(format!("block metadata: {}", e)))?;
        let parent = match raw.parent {
            Some(parent) if !parent.is_null() => Some(Parent::decode(&parent)?),
            _ => None,
        };
        Ok(Self {
            id: raw.id,
            parent,
            created_time: raw.created_time,
            last_edited_time: raw.last_edited_time,
            has_children: raw.has_children,
            archived: raw.archived,
        })
    }
}
