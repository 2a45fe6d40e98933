use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tagged entity segment in a message body carried no `text` field.
///
/// Flattening stops on the first such segment; there is no partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tagged entity segment is missing its text field")]
pub struct MalformedMessage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatLog {
    pub messages: Vec<Message>, // export order = chronological order
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub from: String,    // display name
    pub from_id: String, // stable author identifier, e.g. "user12345678"
    #[serde(default)]
    pub reply_to_message_id: Option<i64>,
    pub text: Text,
}

/// Message body as exported: one plain string, or an ordered run of segments
/// mixing plain strings with tagged entities (links, mentions, code, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Text {
    Plain(String),
    Segments(Vec<TextSegment>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextSegment {
    Plain(String),
    Entity(TextEntity),
}

/// Tagged entity record; everything but `text` is ignored on input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextEntity {
    #[serde(default)]
    pub text: Option<String>,
}

impl Text {
    /// Flattens the body into one plain string.
    ///
    /// A plain body passes through unchanged; segments contribute their text
    /// in encounter order, joined by single separating spaces. No segment is
    /// ever dropped.
    pub fn flatten(&self) -> Result<String, MalformedMessage> {
        match self {
            Text::Plain(s) => Ok(s.clone()),
            Text::Segments(segments) => {
                let mut pieces = Vec::with_capacity(segments.len());
                for segment in segments {
                    match segment {
                        TextSegment::Plain(s) => pieces.push(s.as_str()),
                        TextSegment::Entity(entity) => {
                            pieces.push(entity.text.as_deref().ok_or(MalformedMessage)?)
                        }
                    }
                }
                Ok(pieces.join(" "))
            }
        }
    }
}
