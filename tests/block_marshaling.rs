// tests/block_marshaling.rs
//! Block decoding from listing responses and encoding for append requests.

mod common;

use common::fixture;
use notionapi::model::CodeContent;
use notionapi::{
    decode_block, decode_block_children, encode_block, AppError, BlockValue, NewBlock,
    BLOCK_TYPES,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

#[test]
fn listing_decodes_typed_blocks() {
    let list = decode_block_children(&fixture("block_children.json")).unwrap();

    let types: Vec<&str> = list.results.iter().map(|b| b.block_type()).collect();
    assert_eq!(types, vec!["heading_2", "to_do", "divider", "image"]);
    assert!(!list.has_more);
    assert_eq!(list.next_cursor, None);

    let todo = &list.results[1];
    assert!(todo.has_children());
    match &todo.value {
        BlockValue::ToDo(content) => {
            assert!(content.checked);
            assert_eq!(content.rich_text[0].plain_text, "Freeze the API");
        }
        other => panic!("unexpected block: {:?}", other),
    }
}

#[test]
fn missing_nested_object_yields_defaults() {
    let list = decode_block_children(&fixture("block_children.json")).unwrap();
    let divider = &list.results[2];

    assert_eq!(divider.value, BlockValue::divider());
    assert_eq!(encode_block(&divider.value.clone().into()).unwrap(), json!({"divider": {}}));
}

#[test]
fn every_registered_type_encodes_under_its_own_key() {
    for block_type in BLOCK_TYPES {
        let value = BlockValue::decode(block_type, None).unwrap();
        let encoded = encode_block(&NewBlock::Typed(value)).unwrap();
        let keys: Vec<&String> = encoded.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec![*block_type]);
    }
}

#[test]
fn encoded_block_has_no_read_only_metadata() {
    let list = decode_block_children(&fixture("block_children.json")).unwrap();
    let heading = list.results[0].clone();

    let encoded = encode_block(&NewBlock::Typed(heading.value)).unwrap();
    let object = encoded.as_object().unwrap();
    for key in ["id", "object", "type", "parent", "created_time", "has_children", "archived"] {
        assert!(!object.contains_key(key), "{} leaked into write shape", key);
    }
    assert_eq!(encoded["heading_2"]["rich_text"][0]["text"]["content"], "Before launch");
}

#[test]
fn hosted_image_keeps_its_file_payload() {
    let list = decode_block_children(&fixture("block_children.json")).unwrap();
    match &list.results[3].value {
        BlockValue::Image(content) => {
            assert_eq!(content.url(), Some("https://prod-files.example.com/diagram.png"))
        }
        other => panic!("unexpected block: {:?}", other),
    }
}

#[test]
fn raw_blocks_pass_through_unchanged() {
    let mut raw = Map::new();
    raw.insert(
        "ai_block".to_string(),
        json!({"prompt": "summarize", "color": "default"}),
    );

    let encoded = encode_block(&NewBlock::from(raw.clone())).unwrap();
    assert_eq!(encoded, Value::Object(raw));
}

#[test]
fn unknown_block_type_fails_the_listing() {
    let mut raw = fixture("block_children.json");
    raw["results"][2] = json!({
        "object": "block",
        "id": "5d4ca33c-d6b7-4675-93d9-84b70af45d1c",
        "type": "transcription",
        "transcription": {}
    });

    let err = decode_block_children(&raw).unwrap_err();
    assert!(matches!(
        err,
        AppError::UnsupportedType { discriminator, .. } if discriminator == "transcription"
    ));
}

#[test]
fn block_without_type_is_malformed() {
    let err = decode_block(&json!({"object": "block", "id": "x", "paragraph": {}})).unwrap_err();
    assert!(matches!(err, AppError::MalformedResponse(_)));
}

#[test]
fn block_serializes_to_read_shape() {
    let list = decode_block_children(&fixture("block_children.json")).unwrap();
    let read = serde_json::to_value(&list.results[2]).unwrap();

    assert_eq!(read["object"], "block");
    assert_eq!(read["type"], "divider");
    assert_eq!(read["id"], "5d4ca33c-d6b7-4675-93d9-84b70af45d1c");
    assert_eq!(read["divider"], json!({}));
}

#[test]
fn block_value_reads_either_shape() {
    let from_read: BlockValue = serde_json::from_value(json!({
        "type": "code",
        "code": {"caption": [], "rich_text": [], "language": "rust"}
    }))
    .unwrap();
    let from_write: BlockValue =
        serde_json::from_value(json!({"code": {"language": "rust"}})).unwrap();

    assert_eq!(from_read, from_write);
    assert_eq!(
        from_read,
        BlockValue::Code(CodeContent {
            language: "rust".to_string(),
            ..CodeContent::default()
        })
    );
}
