use super::Color;
use serde::{Deserialize, Serialize};

/// The kind of a rich text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RichTextType {
    #[default]
    Text,
    Mention,
    Equation,
}

/// One annotated text run, the building block of titles, rich text properties and text blocks.
///
/// Only the payload matching `text_type` is populated by the server; mention payloads are kept
/// as raw JSON since this client never interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    #[serde(rename = "type", default)]
    pub text_type: RichTextType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equation: Option<EquationData>,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl Default for RichTextItem {
    fn default() -> Self {
        Self {
            text_type: RichTextType::Text,
            text: Some(TextContent::default()),
            mention: None,
            equation: None,
            annotations: Annotations::default(),
            plain_text: String::new(),
            href: None,
        }
    }
}

impl RichTextItem {
    /// Create a plain, unannotated text run.
    pub fn plain_text(text: &str) -> Self {
        let mut item = Self::default();
        item.set_content(text);
        item
    }

    /// The run's `text.content`, if this is a text run.
    pub fn content(&self) -> Option<&str> {
        self.text.as_ref().map(|t| t.content.as_str())
    }

    /// Overwrites the run's text, turning mention/equation runs into text runs.
    /// An existing link is kept.
    pub fn set_content(&mut self, value: &str) {
        let link = self.text.take().and_then(|t| t.link);
        self.text_type = RichTextType::Text;
        self.text = Some(TextContent {
            content: value.to_string(),
            link,
        });
        self.mention = None;
        self.equation = None;
        self.plain_text = value.to_string();
    }
}

/// Concatenates the plain text of a run sequence.
pub fn plain_text_of(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquationData {
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default)]
    pub color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_content_converts_mentions_into_text() {
        let mut item: RichTextItem = serde_json::from_value(json!({
            "type": "mention",
            "mention": {"type": "user", "user": {"object": "user", "id": "u1"}},
            "plain_text": "@Ada",
            "href": null
        }))
        .unwrap();
        assert_eq!(item.content(), None);

        item.set_content("hello");
        assert_eq!(item.text_type, RichTextType::Text);
        assert_eq!(item.content(), Some("hello"));
        assert_eq!(item.plain_text, "hello");
        assert!(item.mention.is_none());
    }

    #[test]
    fn set_content_keeps_link() {
        let mut item: RichTextItem = serde_json::from_value(json!({
            "type": "text",
            "text": {"content": "docs", "link": {"url": "https://example.com"}},
            "plain_text": "docs"
        }))
        .unwrap();
        item.set_content("manual");
        assert_eq!(
            item.text.unwrap().link,
            Some(Link {
                url: "https://example.com".to_string()
            })
        );
    }

    #[test]
    fn plain_text_concatenates_runs() {
        let items = vec![RichTextItem::plain_text("a"), RichTextItem::plain_text("b")];
        assert_eq!(plain_text_of(&items), "ab");
    }
}
