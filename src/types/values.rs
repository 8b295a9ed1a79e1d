// src/types/values.rs
//! Small wire fragments shared across properties, blocks and pages.

use super::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user reference as it appears in people, created_by and last_edited_by values.
///
/// The server often sends only `{object, id}`; the richer fields are kept when present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<serde_json::Value>,
}

impl User {
    /// A bare `{object: "user", id}` reference, the shape the API accepts on write.
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            object: Some("user".to_string()),
            id: id.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let email = self.person.as_ref().and_then(|p| p.email.as_deref());
        match (&self.name, email) {
            (Some(name), _) => write!(f, "{}", name),
            (None, Some(email)) => write!(f, "{}", email),
            (None, None) => write!(f, "User {}", self.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub email: Option<String>,
}

/// Select, multi-select and status option.
///
/// Absent fields are omitted on write so that `{name}` alone selects an option by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl SelectOption {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Re-points the option at another name. The id and color belong to the old
    /// option, so they are cleared and the server resolves the option by name.
    pub fn rename(&mut self, name: &str) {
        self.id = None;
        self.color = None;
        self.name = Some(name.to_string());
    }
}

/// Date or date range. Start and end are ISO 8601 dates or datetimes kept verbatim.
///
/// Every field is always written, `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    External,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

/// A Notion-hosted file. The signed URL expires at `expiry_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
}

/// File reference used by the files property and page covers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FileKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<HostedFile>,
}

impl FileReference {
    pub fn url(&self) -> Option<&str> {
        match (&self.external, &self.file) {
            (Some(external), _) => Some(external.url.as_str()),
            (None, Some(file)) => Some(file.url.as_str()),
            (None, None) => None,
        }
    }

    /// Points the reference at an external URL. Hosted files cannot be written
    /// back through the API, so any hosted payload is dropped.
    pub fn set_external_url(&mut self, url: impl Into<String>) {
        self.kind = Some(FileKind::External);
        self.external = Some(ExternalFile { url: url.into() });
        self.file = None;
    }
}

/// Page and callout icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { external: ExternalFile },
    File { file: HostedFile },
    CustomEmoji { custom_emoji: serde_json::Value },
}
