//! Property registry: maps a discriminator to the variant that decodes and encodes it.

use super::property_value::{PropertyTypeValue, PropertyValue};
use crate::error::{AppError, ObjectKind};
use crate::types::SelectOption;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Every property discriminator the API defines.
pub const PROPERTY_TYPES: &[&str] = &[
    "title",
    "rich_text",
    "number",
    "select",
    "multi_select",
    "status",
    "date",
    "checkbox",
    "url",
    "email",
    "phone_number",
    "relation",
    "people",
    "files",
    "rollup",
    "formula",
    "unique_id",
    "verification",
    "created_time",
    "last_edited_time",
    "created_by",
    "last_edited_by",
];

pub fn is_known_property_type(discriminator: &str) -> bool {
    PROPERTY_TYPES.contains(&discriminator)
}

/// Decodes one property object, `{"id", "type", "<discriminator>": payload}`.
///
/// A missing or `null` payload yields the variant's defaults; unknown sibling fields
/// are ignored. `title`, `rich_text` and `multi_select` always decode with at least
/// one element: an empty, `null` or missing payload gets a single default element so
/// the simplified update path has a slot to write into.
pub fn decode_property(discriminator: &str, wire: &Value) -> Result<PropertyValue, AppError> {
    if !is_known_property_type(discriminator) {
        return Err(AppError::UnsupportedType {
            kind: ObjectKind::Property,
            discriminator: discriminator.to_string(),
        });
    }

    let empty = Map::new();
    let object = match wire {
        Value::Object(object) => object,
        Value::Null => &empty,
        other => {
            return Err(AppError::malformed(
                discriminator,
                format!("expected a property object, got {}", json_kind(other)),
            ))
        }
    };

    if let Some(tag) = object.get("type").and_then(Value::as_str) {
        if tag != discriminator {
            return Err(AppError::malformed(
                discriminator,
                format!("property object is tagged '{}'", tag),
            ));
        }
    }

    log::trace!("Decoding '{}' property", discriminator);

    let value = match discriminator {
        "title" => PropertyTypeValue::Title {
            title: at_least_one(payload(discriminator, object)?),
        },
        "rich_text" => PropertyTypeValue::RichText {
            rich_text: at_least_one(payload(discriminator, object)?),
        },
        "number" => PropertyTypeValue::Number {
            number: payload(discriminator, object)?,
        },
        "select" => PropertyTypeValue::Select {
            select: payload(discriminator, object)?,
        },
        "multi_select" => PropertyTypeValue::MultiSelect {
            multi_select: at_least_one::<SelectOption>(payload(discriminator, object)?),
        },
        "status" => PropertyTypeValue::Status {
            status: payload(discriminator, object)?,
        },
        "date" => PropertyTypeValue::Date {
            date: payload(discriminator, object)?,
        },
        "checkbox" => PropertyTypeValue::Checkbox {
            checkbox: payload(discriminator, object)?,
        },
        "url" => PropertyTypeValue::Url {
            url: payload(discriminator, object)?,
        },
        "email" => PropertyTypeValue::Email {
            email: payload(discriminator, object)?,
        },
        "phone_number" => PropertyTypeValue::PhoneNumber {
            phone_number: payload(discriminator, object)?,
        },
        "relation" => PropertyTypeValue::Relation {
            relation: payload(discriminator, object)?,
            has_more: payload("has_more", object)
                .map_err(|_| AppError::malformed(discriminator, "'has_more' is not a boolean"))?,
        },
        "people" => PropertyTypeValue::People {
            people: payload(discriminator, object)?,
        },
        "files" => PropertyTypeValue::Files {
            files: payload(discriminator, object)?,
        },
        "rollup" => PropertyTypeValue::Rollup {
            rollup: payload(discriminator, object)?,
        },
        "formula" => PropertyTypeValue::Formula {
            formula: payload(discriminator, object)?,
        },
        "unique_id" => PropertyTypeValue::UniqueId {
            unique_id: payload(discriminator, object)?,
        },
        "verification" => PropertyTypeValue::Verification {
            verification: payload(discriminator, object)?,
        },
        "created_time" => PropertyTypeValue::CreatedTime {
            created_time: payload(discriminator, object)?,
        },
        "last_edited_time" => PropertyTypeValue::LastEditedTime {
            last_edited_time: payload(discriminator, object)?,
        },
        "created_by" => PropertyTypeValue::CreatedBy {
            created_by: payload(discriminator, object)?,
        },
        "last_edited_by" => PropertyTypeValue::LastEditedBy {
            last_edited_by: payload(discriminator, object)?,
        },
        other => {
            return Err(AppError::UnsupportedType {
                kind: ObjectKind::Property,
                discriminator: other.to_string(),
            })
        }
    };

    debug_assert_eq!(value.type_name(), discriminator);

    Ok(PropertyValue {
        id: object.get("id").and_then(Value::as_str).map(str::to_string),
        value,
    })
}

/// Encodes a property into its write shape, `{"<discriminator>": payload}`.
///
/// The property ID, the outer `type` and anything computed are left out.
pub fn encode_property(property: &PropertyValue) -> Result<Value, AppError> {
    let mut object = Map::new();
    object.insert(
        property.type_name().to_string(),
        property.value.to_wire_payload()?,
    );
    Ok(Value::Object(object))
}

/// Reads the value under `key`, falling back to the type's default when absent or null.
fn payload<T>(key: &str, object: &Map<String, Value>) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    match object.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => T::deserialize(value).map_err(|e| AppError::malformed(key, e)),
    }
}

fn at_least_one<T: Default>(mut items: Vec<T>) -> Vec<T> {
    if items.is_empty() {
        items.push(T::default());
    }
    items
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scalar;
    use serde_json::json;

    #[test]
    fn every_catalog_entry_decodes_from_defaults() {
        for discriminator in PROPERTY_TYPES {
            let property = decode_property(discriminator, &json!({ "type": discriminator }))
                .unwrap_or_else(|e| panic!("{}: {}", discriminator, e));
            assert_eq!(property.type_name(), *discriminator);
        }
    }

    #[test]
    fn unknown_discriminator_is_unsupported() {
        let err = decode_property("button", &json!({"type": "button", "button": {}})).unwrap_err();
        assert!(matches!(
            err,
            AppError::UnsupportedType {
                kind: ObjectKind::Property,
                ..
            }
        ));
    }

    #[test]
    fn wrong_shape_names_discriminator() {
        let err = decode_property("number", &json!({"type": "number", "number": "ten"})).unwrap_err();
        match err {
            AppError::MalformedProperty { discriminator, .. } => assert_eq!(discriminator, "number"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn missing_payload_gets_one_default_element() {
        for wire in [json!({"type": "title"}), json!({"type": "title", "title": null})] {
            let property = decode_property("title", &wire).unwrap();
            assert_eq!(property.value.collection_len(), Some(1));
            assert_eq!(property.default_value(), Scalar::Text(String::new()));
        }

        let tags = decode_property("multi_select", &json!({"type": "multi_select"})).unwrap();
        assert_eq!(
            tags.value,
            PropertyTypeValue::MultiSelect {
                multi_select: vec![SelectOption::default()]
            }
        );
        assert_eq!(tags.encode().unwrap(), json!({"multi_select": [{}]}));
    }

    #[test]
    fn empty_people_stays_empty() {
        let property = decode_property("people", &json!({"type": "people", "people": []})).unwrap();
        assert_eq!(property.value.collection_len(), Some(0));
    }

    #[test]
    fn mismatched_tag_is_malformed() {
        let err = decode_property("url", &json!({"type": "email", "email": "a@b.c"})).unwrap_err();
        assert!(matches!(err, AppError::MalformedProperty { .. }));
    }
}
