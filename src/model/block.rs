use super::blocks::*;
use super::common::BlockCommon;
use crate::error::{AppError, ObjectKind};
use crate::types::RichTextItem;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generates `BlockValue` and its registry from one table of `Variant(Content) => "type"`.
macro_rules! block_registry {
    ($( $variant:ident($content:ty) => $name:literal ),+ $(,)?) => {
        /// The typed content of a block, one case per block type.
        #[derive(Debug, Clone, PartialEq)]
        pub enum BlockValue {
            $( $variant($content), )+
        }

        /// Every block type with a dedicated variant.
        pub const BLOCK_TYPES: &[&str] = &[$( $name ),+];

        impl BlockValue {
            /// Get block type name
            pub fn type_name(&self) -> &'static str {
                match self {
                    $( BlockValue::$variant(_) => $name, )+
                }
            }

            /// Builds the variant for `block_type` from the object nested under that key.
            /// A missing object yields the variant's defaults.
            pub fn decode(block_type: &str, content: Option<&Value>) -> Result<Self, AppError> {
                match block_type {
                    $( $name => Ok(BlockValue::$variant(decode_content(block_type, content)?)), )+
                    other => Err(AppError::UnsupportedType {
                        kind: ObjectKind::Block,
                        discriminator: other.to_string(),
                    }),
                }
            }

            fn serialize_entry<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
                match self {
                    $( BlockValue::$variant(content) => map.serialize_entry($name, content), )+
                }
            }
        }
    };
}

block_registry! {
    Paragraph(TextBlockContent) => "paragraph",
    Heading1(HeadingContent) => "heading_1",
    Heading2(HeadingContent) => "heading_2",
    Heading3(HeadingContent) => "heading_3",
    BulletedListItem(TextBlockContent) => "bulleted_list_item",
    NumberedListItem(TextBlockContent) => "numbered_list_item",
    ToDo(ToDoContent) => "to_do",
    Toggle(TextBlockContent) => "toggle",
    Quote(TextBlockContent) => "quote",
    Callout(CalloutContent) => "callout",
    Code(CodeContent) => "code",
    Image(FileContent) => "image",
    File(FileContent) => "file",
    Pdf(FileContent) => "pdf",
    Video(FileContent) => "video",
    Embed(LinkContent) => "embed",
    Bookmark(LinkContent) => "bookmark",
    Equation(EquationContent) => "equation",
    Divider(EmptyContent) => "divider",
    Table(TableContent) => "table",
    TableRow(TableRowContent) => "table_row",
    TableOfContents(TableOfContentsContent) => "table_of_contents",
    ColumnList(ContainerContent) => "column_list",
    Column(ContainerContent) => "column",
    SyncedBlock(SyncedBlockContent) => "synced_block",
    Template(TemplateContent) => "template",
    ChildPage(ChildTitleContent) => "child_page",
    ChildDatabase(ChildTitleContent) => "child_database",
    LinkPreview(LinkPreviewContent) => "link_preview",
    Breadcrumb(EmptyContent) => "breadcrumb",
    Mention(MentionContent) => "mention",
}

fn decode_content<T>(block_type: &str, content: Option<&Value>) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    match content {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => T::deserialize(value).map_err(|e| {
            AppError::MalformedResponse(format!("malformed '{}' block: {}", block_type, e))
        }),
    }
}

impl BlockValue {
    pub fn paragraph(text: &str) -> Self {
        BlockValue::Paragraph(TextBlockContent::plain(text))
    }

    pub fn to_do(text: &str, checked: bool) -> Self {
        BlockValue::ToDo(ToDoContent {
            rich_text: vec![RichTextItem::plain_text(text)],
            checked,
            ..ToDoContent::default()
        })
    }

    pub fn divider() -> Self {
        BlockValue::Divider(EmptyContent {})
    }
}

// Write shape: `{"<type>": {...}}`.
impl Serialize for BlockValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        self.serialize_entry(&mut map)?;
        map.end()
    }
}

// Accepts the read shape (tagged by `type`) as well as the write shape.
impl<'de> Deserialize<'de> for BlockValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let block_type = match raw.get("type").and_then(Value::as_str) {
            Some(block_type) => block_type.to_string(),
            None => raw
                .keys()
                .find(|key| BLOCK_TYPES.contains(&key.as_str()))
                .cloned()
                .ok_or_else(|| {
                    <D::Error as serde::de::Error>::custom("block object names no known block type")
                })?,
        };
        BlockValue::decode(&block_type, raw.get(&block_type)).map_err(serde::de::Error::custom)
    }
}

/// A block as returned by the API: metadata plus typed content.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub common: BlockCommon,
    pub value: BlockValue,
}

impl Block {
    pub fn block_type(&self) -> &'static str {
        self.value.type_name()
    }

    /// Check if block has children
    pub fn has_children(&self) -> bool {
        self.common.has_children
    }
}

#[derive(Serialize)]
struct BlockReadShape<'a> {
    object: &'static str,
    #[serde(flatten)]
    common: &'a BlockCommon,
    #[serde(rename = "type")]
    block_type: &'static str,
    #[serde(flatten)]
    value: &'a BlockValue,
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        BlockReadShape {
            object: "block",
            common: &self.common,
            block_type: self.block_type(),
            value: &self.value,
        }
        .serialize(serializer)
    }
}

/// Decodes a block object: reads `type`, then the content nested under that key.
pub fn decode_block(raw: &Value) -> Result<Block, AppError> {
    let block_type = raw
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::MalformedResponse("block has no 'type' field".to_string()))?;
    log::trace!("Decoding '{}' block", block_type);

    let value = BlockValue::decode(block_type, raw.get(block_type))?;
    let common = BlockCommon::decode(raw)?;
    Ok(Block { common, value })
}

/// A block to append: either a typed value or a raw object for block kinds
/// without a dedicated variant.
#[derive(Debug, Clone, PartialEq)]
pub enum NewBlock {
    Typed(BlockValue),
    Raw(Map<String, Value>),
}

impl From<BlockValue> for NewBlock {
    fn from(value: BlockValue) -> Self {
        NewBlock::Typed(value)
    }
}

impl From<Map<String, Value>> for NewBlock {
    fn from(raw: Map<String, Value>) -> Self {
        NewBlock::Raw(raw)
    }
}

/// Encodes a block for an append request. Typed blocks become exactly
/// `{"<type>": {...}}`; raw objects pass through unchanged.
pub fn encode_block(block: &NewBlock) -> Result<Value, AppError> {
    match block {
        NewBlock::Typed(value) => Ok(serde_json::to_value(value)?),
        NewBlock::Raw(raw) => Ok(Value::Object(raw.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn every_block_type_decodes_without_content() {
        for block_type in BLOCK_TYPES {
            let value = BlockValue::decode(block_type, None).unwrap();
            assert_eq!(value.type_name(), *block_type);
        }
    }

    #[test]
    fn image_drops_inner_type_on_encode() {
        let raw = json!({
            "object": "block",
            "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
            "type": "image",
            "has_children": false,
            "archived": false,
            "image": {
                "caption": [],
                "type": "external",
                "external": {"url": "https://example.com/cat.png"}
            }
        });
        let block = decode_block(&raw).unwrap();
        let encoded = encode_block(&NewBlock::Typed(block.value)).unwrap();
        assert_eq!(
            encoded,
            json!({"image": {"caption": [], "external": {"url": "https://example.com/cat.png"}}})
        );
    }

    #[test]
    fn write_shape_deserializes_back() {
        let value = BlockValue::to_do("ship it", true);
        let wire = serde_json::to_value(&value).unwrap();
        let back: BlockValue = serde_json::from_value(wire).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn unknown_block_type_is_unsupported() {
        let err = decode_block(&json!({"id": "x", "type": "ai_block", "ai_block": {}})).unwrap_err();
        assert!(matches!(
            err,
            AppError::UnsupportedType {
                kind: ObjectKind::Block,
                ..
            }
        ));
    }
}
