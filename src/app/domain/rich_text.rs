use crate::app::infrastructure::error::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const PLAIN: TextStyle = TextStyle {
        bold: false,
        italic: false,
        underline: false,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: TextStyle,
}

/// Text with formatting, as held by the editor while a note is open.
///
/// Stored as a run of styled spans. Adjacent spans never share a style and
/// no span is empty, so two documents that look the same compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditableDocument {
    spans: Vec<Span>,
}

impl EditableDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_plain(text: &str) -> Self {
        let mut doc = Self::new();
        doc.push_str(text, TextStyle::PLAIN);
        doc
    }

    /// Append text in the given style, merging with the last span when possible.
    pub fn push_str(&mut self, text: &str, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(Span {
                text: text.to_string(),
                style,
            }),
        }
    }

    pub fn push_char(&mut self, ch: char, style: TextStyle) {
        let mut buf = [0u8; 4];
        self.push_str(ch.encode_utf8(&mut buf), style);
    }

    /// Replace the whole document with unformatted text.
    pub fn set_plain_text(&mut self, text: &str) {
        self.spans.clear();
        self.push_str(text, TextStyle::PLAIN);
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Title derived from a document: its first non-empty line, or "" when there is none.
pub fn first_line_of(text: &str) -> String {
    text.lines()
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .to_string()
}

/// Converts between the editor's document and the bytes stored in a note.
pub trait RichTextCodec {
    fn decode(&self, bytes: &[u8]) -> Result<EditableDocument, DecodeError>;

    fn encode(&self, doc: &EditableDocument) -> Vec<u8>;

    fn first_line(&self, doc: &EditableDocument) -> String {
        first_line_of(&doc.plain_text())
    }
}

impl<C: RichTextCodec + ?Sized> RichTextCodec for &C {
    fn decode(&self, bytes: &[u8]) -> Result<EditableDocument, DecodeError> {
        (**self).decode(bytes)
    }

    fn encode(&self, doc: &EditableDocument) -> Vec<u8> {
        (**self).encode(doc)
    }

    fn first_line(&self, doc: &EditableDocument) -> String {
        (**self).first_line(doc)
    }
}
