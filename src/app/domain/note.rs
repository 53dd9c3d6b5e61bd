use serde::{Deserialize, Serialize};

/// A saved note: the first line of its text plus the serialized rich text.
///
/// `content` is either a valid RTF document or empty, the empty buffer
/// marking a note that has never been edited.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteRecord {
    #[serde(rename = "noteContents", default, with = "base64_bytes")]
    pub content: Vec<u8>,

    #[serde(rename = "titleText", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl NoteRecord {
    /// A note that has not been through the editor yet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(title: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            content,
            title: Some(title.into()),
        }
    }

    /// Title as shown in the list; absent titles read as empty.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn is_unedited(&self) -> bool {
        self.content.is_empty()
    }
}

/// Binary blobs travel through JSON as standard base64 strings.
mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
