//! Content structs, one per block kind: the object stored under the block's `type` key.
//!
//! Every field defaults, so a block whose nested object is missing still decodes.

use super::block::BlockValue;
use crate::types::{Color, ExternalFile, HostedFile, Icon, RichTextItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shared by paragraphs, list items, toggles and quotes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
    pub color: Color,
    /// Nested blocks, only sent when appending.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockValue>,
}

impl TextBlockContent {
    pub fn plain(text: &str) -> Self {
        Self {
            rich_text: vec![RichTextItem::plain_text(text)],
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingContent {
    pub rich_text: Vec<RichTextItem>,
    pub color: Color,
    pub is_toggleable: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockValue>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToDoContent {
    pub rich_text: Vec<RichTextItem>,
    pub checked: bool,
    pub color: Color,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockValue>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalloutContent {
    pub rich_text: Vec<RichTextItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub color: Color,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeContent {
    pub caption: Vec<RichTextItem>,
    pub rich_text: Vec<RichTextItem>,
    pub language: String,
}

impl Default for CodeContent {
    fn default() -> Self {
        Self {
            caption: Vec::new(),
            rich_text: Vec::new(),
            language: "plain text".to_string(),
        }
    }
}

/// Image, file, PDF and video content.
///
/// The server tags these with an inner `type` of `external` or `file`; it is
/// implied by which of the two fields is set, so it is neither kept nor sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileContent {
    pub caption: Vec<RichTextItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<HostedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FileContent {
    pub fn url(&self) -> Option<&str> {
        self.external
            .as_ref()
            .map(|e| e.url.as_str())
            .or_else(|| self.file.as_ref().map(|f| f.url.as_str()))
    }
}

/// Bookmark and embed content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkContent {
    pub url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPreviewContent {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EquationContent {
    pub expression: String,
}

/// Divider and breadcrumb carry no fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmptyContent {}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOfContentsContent {
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableContent {
    pub table_width: u32,
    pub has_column_header: bool,
    pub has_row_header: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockValue>,
}

impl Default for TableContent {
    fn default() -> Self {
        Self {
            table_width: 1,
            has_column_header: false,
            has_row_header: false,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRowContent {
    pub cells: Vec<Vec<RichTextItem>>,
}

/// Column list and column content: only nested blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerContent {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockValue>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncedBlockContent {
    /// `None` on the original block, the source block on a copy.
    pub synced_from: Option<SyncedFrom>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncedFrom {
    pub block_id: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateContent {
    pub rich_text: Vec<RichTextItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockValue>,
}

/// Child page and child database content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChildTitleContent {
    pub title: String,
}

/// A block-level mention; the mention object is passed through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MentionContent {
    pub mention: Value,
}
