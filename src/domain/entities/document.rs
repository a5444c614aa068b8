use serde::{Deserialize, Serialize};

/// A document as returned by a read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Final segment of the URI
    pub name: String,

    /// Normalized URI relative to the branch
    pub uri: String,

    /// Content type derived from the URI extension
    pub content_type: String,

    /// Raw bytes
    pub content: Vec<u8>,
}

/// Document body supplied to create and update.
///
/// On update the `uri` is ignored for addressing; the document keeps the
/// identity it was addressed with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentPayload {
    #[serde(default)]
    pub uri: String,

    #[serde(default)]
    pub content: Vec<u8>,
}

impl DocumentPayload {
    pub fn new(uri: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            uri: uri.into(),
            content: content.into(),
        }
    }

    /// Payload carrying only content, used for updates
    pub fn content_only(content: impl Into<Vec<u8>>) -> Self {
        Self {
            uri: String::new(),
            content: content.into(),
        }
    }
}

/// Listing entry for a document, without its content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub name: String,
    pub uri: String,
    pub content_type: String,
}

impl From<&Document> for DocumentSummary {
    fn from(document: &Document) -> Self {
        Self {
            name: document.name.clone(),
            uri: document.uri.clone(),
            content_type: document.content_type.clone(),
        }
    }
}
