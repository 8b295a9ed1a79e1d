use crate::error::AppError;
use crate::types::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Property value: a typed value plus the property ID the server assigned.
///
/// The ID is kept for display only and is never written back.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    pub id: Option<String>,
    pub value: PropertyTypeValue,
}

/// One case per property discriminator.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyTypeValue {
    Title {
        title: Vec<RichTextItem>,
    },
    RichText {
        rich_text: Vec<RichTextItem>,
    },
    Number {
        number: Option<f64>,
    },
    Select {
        select: Option<SelectOption>,
    },
    MultiSelect {
        multi_select: Vec<SelectOption>,
    },
    Status {
        status: Option<SelectOption>,
    },
    Date {
        date: Option<DateValue>,
    },
    Checkbox {
        checkbox: bool,
    },
    Url {
        url: Option<String>,
    },
    Email {
        email: Option<String>,
    },
    PhoneNumber {
        phone_number: Option<String>,
    },
    Relation {
        relation: Vec<RelationRef>,
        /// Set when the server truncated the relation list.
        has_more: bool,
    },
    People {
        people: Vec<User>,
    },
    Files {
        files: Vec<FileReference>,
    },
    Rollup {
        rollup: Option<RollupValue>,
    },
    Formula {
        formula: Option<FormulaResult>,
    },
    UniqueId {
        unique_id: UniqueIdData,
    },
    Verification {
        verification: VerificationData,
    },
    CreatedTime {
        created_time: Option<String>,
    },
    LastEditedTime {
        last_edited_time: Option<String>,
    },
    CreatedBy {
        created_by: User,
    },
    LastEditedBy {
        last_edited_by: User,
    },
}

impl PropertyTypeValue {
    /// Returns the Notion API type name for this property value.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyTypeValue::Title { .. } => "title",
            PropertyTypeValue::RichText { .. } => "rich_text",
            PropertyTypeValue::Number { .. } => "number",
            PropertyTypeValue::Select { .. } => "select",
            PropertyTypeValue::MultiSelect { .. } => "multi_select",
            PropertyTypeValue::Status { .. } => "status",
            PropertyTypeValue::Date { .. } => "date",
            PropertyTypeValue::Checkbox { .. } => "checkbox",
            PropertyTypeValue::Url { .. } => "url",
            PropertyTypeValue::Email { .. } => "email",
            PropertyTypeValue::PhoneNumber { .. } => "phone_number",
            PropertyTypeValue::Relation { .. } => "relation",
            PropertyTypeValue::People { .. } => "people",
            PropertyTypeValue::Files { .. } => "files",
            PropertyTypeValue::Rollup { .. } => "rollup",
            PropertyTypeValue::Formula { .. } => "formula",
            PropertyTypeValue::UniqueId { .. } => "unique_id",
            PropertyTypeValue::Verification { .. } => "verification",
            PropertyTypeValue::CreatedTime { .. } => "created_time",
            PropertyTypeValue::LastEditedTime { .. } => "last_edited_time",
            PropertyTypeValue::CreatedBy { .. } => "created_by",
            PropertyTypeValue::LastEditedBy { .. } => "last_edited_by",
        }
    }

    /// Computed and audit properties are maintained by the server and refuse writes.
    pub fn is_updatable(&self) -> bool {
        !matches!(
            self,
            PropertyTypeValue::Rollup { .. }
                | PropertyTypeValue::Formula { .. }
                | PropertyTypeValue::UniqueId { .. }
                | PropertyTypeValue::Verification { .. }
                | PropertyTypeValue::CreatedTime { .. }
                | PropertyTypeValue::LastEditedTime { .. }
                | PropertyTypeValue::CreatedBy { .. }
                | PropertyTypeValue::LastEditedBy { .. }
        )
    }

    /// Number of elements for multi-valued variants, `None` for single-valued ones.
    pub fn collection_len(&self) -> Option<usize> {
        match self {
            PropertyTypeValue::Title { title } => Some(title.len()),
            PropertyTypeValue::RichText { rich_text } => Some(rich_text.len()),
            PropertyTypeValue::MultiSelect { multi_select } => Some(multi_select.len()),
            PropertyTypeValue::Relation { relation, .. } => Some(relation.len()),
            PropertyTypeValue::People { people } => Some(people.len()),
            PropertyTypeValue::Files { files } => Some(files.len()),
            _ => None,
        }
    }

    /// The variant's main value, `Scalar::Null` when empty or absent.
    pub fn default_value(&self) -> Scalar {
        match self {
            PropertyTypeValue::Title { title: runs }
            | PropertyTypeValue::RichText { rich_text: runs } => runs
                .first()
                .and_then(RichTextItem::content)
                .map(str::to_string)
                .into(),
            PropertyTypeValue::Number { number } => (*number).into(),
            PropertyTypeValue::Select { select: option }
            | PropertyTypeValue::Status { status: option } => {
                option.as_ref().and_then(|o| o.name.clone()).into()
            }
            PropertyTypeValue::MultiSelect { multi_select } => {
                multi_select.first().and_then(|o| o.name.clone()).into()
            }
            PropertyTypeValue::Date { date } => date.as_ref().and_then(|d| d.start.clone()).into(),
            PropertyTypeValue::Checkbox { checkbox } => Scalar::Bool(*checkbox),
            PropertyTypeValue::Url { url: text }
            | PropertyTypeValue::Email { email: text }
            | PropertyTypeValue::PhoneNumber { phone_number: text }
            | PropertyTypeValue::CreatedTime { created_time: text }
            | PropertyTypeValue::LastEditedTime {
                last_edited_time: text,
            } => text.clone().into(),
            PropertyTypeValue::Relation { relation, .. } => {
                relation.first().map(|r| r.id.clone()).into()
            }
            PropertyTypeValue::People { people } => people.first().map(|u| u.id.clone()).into(),
            PropertyTypeValue::Files { files } => files
                .first()
                .and_then(FileReference::url)
                .map(str::to_string)
                .into(),
            PropertyTypeValue::Rollup { rollup } => rollup
                .as_ref()
                .map(RollupValue::as_scalar)
                .unwrap_or_default(),
            PropertyTypeValue::Formula { formula } => formula
                .as_ref()
                .map(FormulaResult::as_scalar)
                .unwrap_or_default(),
            PropertyTypeValue::UniqueId { unique_id } => unique_id.number.into(),
            PropertyTypeValue::Verification { verification } => verification.state.clone().into(),
            PropertyTypeValue::CreatedBy { created_by: user }
            | PropertyTypeValue::LastEditedBy {
                last_edited_by: user,
            } => {
                if user.id.is_empty() {
                    Scalar::Null
                } else {
                    Scalar::Text(user.id.clone())
                }
            }
        }
    }

    /// Writes the variant's main value, creating any missing nested structure.
    ///
    /// Multi-valued variants receive the value on every element; an empty one gets a
    /// single new element. `Scalar::Null` clears the variant where the API allows it.
    /// Text-like variants and option names take numbers and booleans in their text form.
    pub fn set_default_value(&mut self, value: Scalar) -> Result<(), AppError> {
        let discriminator = self.type_name();
        let mismatch = |expected: &str| {
            AppError::property_update(
                discriminator,
                &value,
                format!(
                    "expected {} for a '{}' property, got {}",
                    expected,
                    discriminator,
                    value.kind()
                ),
            )
        };

        match self {
            PropertyTypeValue::Title { title: runs }
            | PropertyTypeValue::RichText { rich_text: runs } => match value.to_text() {
                Some(text) => broadcast(runs, RichTextItem::default, |run| {
                    run.set_content(&text)
                }),
                None => runs.clear(),
            },
            PropertyTypeValue::Number { number } => {
                *number = match &value {
                    Scalar::Number(n) => Some(*n),
                    Scalar::Text(text) => Some(
                        text.trim()
                            .parse::<f64>()
                            .map_err(|_| mismatch("a number"))?,
                    ),
                    Scalar::Null => None,
                    Scalar::Bool(_) => return Err(mismatch("a number")),
                };
            }
            PropertyTypeValue::Select { select: option }
            | PropertyTypeValue::Status { status: option } => match value.to_text() {
                Some(name) => option
                    .get_or_insert_with(SelectOption::default)
                    .rename(&name),
                None => *option = None,
            },
            PropertyTypeValue::MultiSelect { multi_select } => match value.to_text() {
                Some(name) => {
                    broadcast(multi_select, SelectOption::default, |o| o.rename(&name))
                }
                None => multi_select.clear(),
            },
            PropertyTypeValue::Date { date } => match &value {
                Scalar::Text(start) => {
                    date.get_or_insert_with(DateValue::default).start = Some(start.clone())
                }
                Scalar::Null => *date = None,
                _ => return Err(mismatch("a date string")),
            },
            PropertyTypeValue::Checkbox { checkbox } => match &value {
                Scalar::Bool(b) => *checkbox = *b,
                _ => return Err(mismatch("a boolean")),
            },
            PropertyTypeValue::Url { url: text }
            | PropertyTypeValue::Email { email: text }
            | PropertyTypeValue::PhoneNumber { phone_number: text } => *text = value.to_text(),
            PropertyTypeValue::Relation { relation, has_more } => match &value {
                Scalar::Text(id) => {
                    broadcast(relation, RelationRef::default, |r| r.id = id.clone());
                    *has_more = false;
                }
                Scalar::Null => {
                    relation.clear();
                    *has_more = false;
                }
                _ => return Err(mismatch("a page id")),
            },
            PropertyTypeValue::People { people } => match &value {
                Scalar::Text(id) => broadcast(people, User::default, |u| *u = User::reference(id)),
                Scalar::Null => people.clear(),
                _ => return Err(mismatch("a user id")),
            },
            PropertyTypeValue::Files { files } => match &value {
                Scalar::Text(url) => broadcast(files, FileReference::default, |f| {
                    if f.name.is_none() {
                        f.name = Some(url.clone());
                    }
                    f.set_external_url(url.as_str())
                }),
                Scalar::Null => files.clear(),
                _ => return Err(mismatch("a file url")),
            },
            PropertyTypeValue::Rollup { .. }
            | PropertyTypeValue::Formula { .. }
            | PropertyTypeValue::UniqueId { .. }
            | PropertyTypeValue::Verification { .. }
            | PropertyTypeValue::CreatedTime { .. }
            | PropertyTypeValue::LastEditedTime { .. }
            | PropertyTypeValue::CreatedBy { .. }
            | PropertyTypeValue::LastEditedBy { .. } => {
                return Err(AppError::property_update(
                    discriminator,
                    &value,
                    format!("'{}' properties are read-only", discriminator),
                ))
            }
        }
        Ok(())
    }

    /// The value stored under the discriminator key, exactly as the API accepts it on write.
    pub fn to_wire_payload(&self) -> Result<Value, AppError> {
        let payload = match self {
            PropertyTypeValue::Title { title } => serde_json::to_value(title),
            PropertyTypeValue::RichText { rich_text } => serde_json::to_value(rich_text),
            PropertyTypeValue::Number { number } => serde_json::to_value(number),
            PropertyTypeValue::Select { select } => serde_json::to_value(select),
            PropertyTypeValue::MultiSelect { multi_select } => serde_json::to_value(multi_select),
            PropertyTypeValue::Status { status } => serde_json::to_value(status),
            PropertyTypeValue::Date { date } => serde_json::to_value(date),
            PropertyTypeValue::Checkbox { checkbox } => serde_json::to_value(checkbox),
            PropertyTypeValue::Url { url } => serde_json::to_value(url),
            PropertyTypeValue::Email { email } => serde_json::to_value(email),
            PropertyTypeValue::PhoneNumber { phone_number } => serde_json::to_value(phone_number),
            PropertyTypeValue::Relation { relation, .. } => serde_json::to_value(relation),
            PropertyTypeValue::People { people } => serde_json::to_value(people),
            PropertyTypeValue::Files { files } => serde_json::to_value(files),
            PropertyTypeValue::Rollup { rollup } => serde_json::to_value(rollup),
            PropertyTypeValue::Formula { formula } => serde_json::to_value(formula),
            PropertyTypeValue::UniqueId { unique_id } => serde_json::to_value(unique_id),
            PropertyTypeValue::Verification { verification } => serde_json::to_value(verification),
            PropertyTypeValue::CreatedTime { created_time } => serde_json::to_value(created_time),
            PropertyTypeValue::LastEditedTime { last_edited_time } => {
                serde_json::to_value(last_edited_time)
            }
            PropertyTypeValue::CreatedBy { created_by } => serde_json::to_value(created_by),
            PropertyTypeValue::LastEditedBy { last_edited_by } => {
                serde_json::to_value(last_edited_by)
            }
        };
        payload.map_err(|e| AppError::malformed(self.type_name(), e))
    }
}

/// Applies `update` to every element, or to one fresh element when there are none.
fn broadcast<T>(items: &mut Vec<T>, fresh: impl FnOnce() -> T, mut update: impl FnMut(&mut T)) {
    if items.is_empty() {
        items.push(fresh());
    }
    items.iter_mut().for_each(&mut update);
}

impl PropertyValue {
    pub fn new(value: PropertyTypeValue) -> Self {
        Self { id: None, value }
    }

    pub fn type_name(&self) -> &'static str {
        self.value.type_name()
    }

    pub fn is_updatable(&self) -> bool {
        self.value.is_updatable()
    }

    pub fn default_value(&self) -> Scalar {
        self.value.default_value()
    }

    pub fn set_default_value(&mut self, value: Scalar) -> Result<(), AppError> {
        self.value.set_default_value(value)
    }

    /// Decodes a property object as found under a page's `properties`, keyed by its own `type`.
    pub fn decode(wire: &Value) -> Result<Self, AppError> {
        let discriminator = wire.get("type").and_then(Value::as_str).ok_or_else(|| {
            AppError::malformed("<missing>", "property object has no 'type' field")
        })?;
        super::properties::decode_property(discriminator, wire)
    }

    /// Write shape: `{"<discriminator>": payload}`.
    pub fn encode(&self) -> Result<Value, AppError> {
        super::properties::encode_property(self)
    }

    /// Read shape, `{"id", "type", "<discriminator>"}`, for display and JSON output.
    pub fn to_read_shape(&self) -> Result<Value, AppError> {
        let mut object = Map::new();
        if let Some(id) = &self.id {
            object.insert("id".to_string(), json!(id));
        }
        object.insert("type".to_string(), json!(self.type_name()));
        object.insert(self.type_name().to_string(), self.value.to_wire_payload()?);
        if let PropertyTypeValue::Relation { has_more, .. } = &self.value {
            object.insert("has_more".to_string(), json!(has_more));
        }
        Ok(Value::Object(object))
    }
}

impl Serialize for PropertyValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_read_shape()
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = Value::deserialize(deserializer)?;
        PropertyValue::decode(&wire).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_value_of_empty_variants_is_null() {
        let empties = [
            PropertyTypeValue::Title { title: vec![] },
            PropertyTypeValue::Number { number: None },
            PropertyTypeValue::Select { select: None },
            PropertyTypeValue::Date { date: None },
            PropertyTypeValue::People { people: vec![] },
            PropertyTypeValue::Formula { formula: None },
            PropertyTypeValue::CreatedBy {
                created_by: User::default(),
            },
        ];
        for value in empties {
            assert_eq!(value.default_value(), Scalar::Null, "{}", value.type_name());
        }
    }

    #[test]
    fn setting_text_on_empty_rich_text_creates_first_run() {
        let mut value = PropertyTypeValue::RichText { rich_text: vec![] };
        value.set_default_value("hello".into()).unwrap();
        assert_eq!(value.default_value(), Scalar::Text("hello".into()));
        assert_eq!(value.collection_len(), Some(1));
    }

    #[test]
    fn setting_date_on_absent_date_creates_range() {
        let mut value = PropertyTypeValue::Date { date: None };
        value.set_default_value("2024-06-18".into()).unwrap();
        assert_eq!(
            value.to_wire_payload().unwrap(),
            json!({"start": "2024-06-18", "end": null, "time_zone": null})
        );
    }

    #[test]
    fn number_accepts_numeric_text() {
        let mut value = PropertyTypeValue::Number { number: None };
        value.set_default_value(" 12.5 ".into()).unwrap();
        assert_eq!(value.default_value(), Scalar::Number(12.5));
        assert!(value.set_default_value("twelve".into()).is_err());
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let mut value = PropertyTypeValue::Checkbox { checkbox: false };
        let err = value.set_default_value("yes".into()).unwrap_err();
        assert!(matches!(err, AppError::PropertyUpdate { .. }));
        value.set_default_value(true.into()).unwrap();
        assert_eq!(value.default_value(), Scalar::Bool(true));
    }

    #[test]
    fn text_like_variants_take_numbers_and_booleans_as_text() {
        let mut notes = PropertyTypeValue::RichText { rich_text: vec![] };
        notes.set_default_value(42.0.into()).unwrap();
        assert_eq!(notes.default_value(), Scalar::Text("42".into()));

        let mut phone = PropertyTypeValue::PhoneNumber { phone_number: None };
        phone.set_default_value(5551234.0.into()).unwrap();
        assert_eq!(phone.to_wire_payload().unwrap(), json!("5551234"));

        let mut title = PropertyTypeValue::Title { title: vec![] };
        title.set_default_value(true.into()).unwrap();
        assert_eq!(title.default_value(), Scalar::Text("true".into()));

        let mut stage = PropertyTypeValue::Select { select: None };
        stage.set_default_value(2.5.into()).unwrap();
        assert_eq!(stage.to_wire_payload().unwrap(), json!({"name": "2.5"}));
    }

    #[test]
    fn null_clears_nullable_variants() {
        let mut value = PropertyTypeValue::Select {
            select: Some(SelectOption::named("Todo")),
        };
        value.set_default_value(Scalar::Null).unwrap();
        assert_eq!(value, PropertyTypeValue::Select { select: None });
    }

    #[test]
    fn read_only_variants_refuse_writes() {
        let mut value = PropertyTypeValue::CreatedTime {
            created_time: Some("2024-01-01T00:00:00.000Z".to_string()),
        };
        assert!(!value.is_updatable());
        let err = value.set_default_value("2025-01-01".into()).unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn broadcast_renames_every_option() {
        let mut value = PropertyTypeValue::MultiSelect {
            multi_select: vec![SelectOption::named("a"), SelectOption::named("b")],
        };
        value.set_default_value("c".into()).unwrap();
        assert_eq!(
            value.to_wire_payload().unwrap(),
            json!([{"name": "c"}, {"name": "c"}])
        );
    }

    #[test]
    fn read_shape_carries_id_type_and_has_more() {
        let property = PropertyValue {
            id: Some("rel1".to_string()),
            value: PropertyTypeValue::Relation {
                relation: vec![RelationRef {
                    id: "p1".to_string(),
                }],
                has_more: true,
            },
        };
        assert_eq!(
            serde_json::to_value(&property).unwrap(),
            json!({"id": "rel1", "type": "relation", "relation": [{"id": "p1"}], "has_more": true})
        );
    }
}
