//! RTF reader and writer for note contents.
//!
//! Covers the part of RTF a note needs: text, paragraph breaks, tabs,
//! bold/italic/underline and Unicode escapes. Everything else a word
//! processor may put in the file (font and colour tables, document info,
//! pictures, page setup) is skipped on read.

use std::fmt::Write as _;

use crate::app::domain::rich_text::{EditableDocument, RichTextCodec, TextStyle};
use crate::app::infrastructure::error::DecodeError;

const HEADER: &str = "{\\rtf1\\ansi\\ansicpg1252\\deff0{\\fonttbl{\\f0 Helvetica;}}\\f0\\fs24 ";

const MAX_WORD_LEN: usize = 32;

/// Destinations whose text is not part of the document body.
const SKIPPED_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "header",
    "headerl",
    "headerr",
    "footer",
    "footerl",
    "footerr",
    "footnote",
    "object",
    "listtable",
    "listoverridetable",
    "rsidtbl",
    "generator",
    "filetbl",
    "revtbl",
    "xmlnstbl",
    "themedata",
    "colorschememapping",
    "latentstyles",
    "datastore",
    "expandedcolortbl",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct RtfCodec;

impl RichTextCodec for RtfCodec {
    fn decode(&self, bytes: &[u8]) -> Result<EditableDocument, DecodeError> {
        Parser::new(bytes).parse()
    }

    fn encode(&self, doc: &EditableDocument) -> Vec<u8> {
        let mut out = String::from(HEADER);
        let mut current = TextStyle::PLAIN;

        for span in doc.spans() {
            write_style_change(&mut out, current, span.style);
            current = span.style;
            for ch in span.text.chars() {
                write_escaped(&mut out, ch);
            }
        }

        out.push('}');
        out.into_bytes()
    }
}

fn write_style_change(out: &mut String, from: TextStyle, to: TextStyle) {
    if from == to {
        return;
    }
    if from.bold != to.bold {
        out.push_str(if to.bold { "\\b" } else { "\\b0" });
    }
    if from.italic != to.italic {
        out.push_str(if to.italic { "\\i" } else { "\\i0" });
    }
    if from.underline != to.underline {
        out.push_str(if to.underline { "\\ul" } else { "\\ulnone" });
    }
    out.push(' ');
}

fn write_escaped(out: &mut String, ch: char) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '{' => out.push_str("\\{"),
        '}' => out.push_str("\\}"),
        '\n' => out.push_str("\\par\n"),
        '\r' => {}
        '\t' => out.push_str("\\tab "),
        ' '..='~' => out.push(ch),
        _ => {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                // \u takes a signed 16-bit value, followed by one fallback character
                let _ = write!(out, "\\u{}?", *unit as i16);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct GroupState {
    style: TextStyle,
    skip: bool,
    fallback_len: usize,
}

impl Default for GroupState {
    fn default() -> Self {
        Self {
            style: TextStyle::PLAIN,
            skip: false,
            fallback_len: 1,
        }
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    stack: Vec<GroupState>,
    state: GroupState,
    pending_fallback: usize,
    high_surrogate: Option<u16>,
    doc: EditableDocument,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            stack: Vec::new(),
            state: GroupState::default(),
            pending_fallback: 0,
            high_surrogate: None,
            doc: EditableDocument::new(),
        }
    }

    fn parse(mut self) -> Result<EditableDocument, DecodeError> {
        let start = self
            .input
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .ok_or(DecodeError::Empty)?;
        if !self.input[start..].starts_with(b"{\\rtf") {
            return Err(DecodeError::NotRtf);
        }
        self.pos = start;

        while self.pos < self.input.len() {
            match self.input[self.pos] {
                b'{' => {
                    self.stack.push(self.state);
                    self.pos += 1;
                }
                b'}' => {
                    self.state = self
                        .stack
                        .pop()
                        .ok_or(DecodeError::UnbalancedGroup(self.pos))?;
                    self.pos += 1;
                    if self.stack.is_empty() {
                        self.flush_orphan_surrogate();
                        return Ok(self.doc);
                    }
                }
                b'\\' => self.control()?,
                b'\r' | b'\n' => self.pos += 1,
                b => {
                    self.emit(char::from(b));
                    self.pos += 1;
                }
            }
        }

        Err(DecodeError::UnbalancedGroup(self.input.len()))
    }

    fn control(&mut self) -> Result<(), DecodeError> {
        self.pos += 1;
        let c = *self.input.get(self.pos).ok_or(DecodeError::UnexpectedEof)?;

        match c {
            b'\\' | b'{' | b'}' => {
                self.emit(char::from(c));
                self.pos += 1;
            }
            b'\'' => {
                let hex = self
                    .input
                    .get(self.pos + 1..self.pos + 3)
                    .ok_or(DecodeError::UnexpectedEof)?;
                let byte = std::str::from_utf8(hex)
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or(DecodeError::Malformed(self.pos))?;
                self.emit(char::from(byte));
                self.pos += 3;
            }
            b'*' => {
                self.state.skip = true;
                self.pos += 1;
            }
            b'~' => {
                self.emit('\u{a0}');
                self.pos += 1;
            }
            b'_' => {
                self.emit('-');
                self.pos += 1;
            }
            // Cocoa writes a backslash before a raw newline for a line break
            b'\n' | b'\r' => {
                self.emit('\n');
                self.pos += 1;
            }
            c if c.is_ascii_alphabetic() => self.control_word()?,
            _ => self.pos += 1,
        }
        Ok(())
    }

    fn control_word(&mut self) -> Result<(), DecodeError> {
        let word_start = self.pos;
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
        if self.pos - word_start > MAX_WORD_LEN {
            return Err(DecodeError::Malformed(word_start));
        }
        let word = std::str::from_utf8(&self.input[word_start..self.pos])
            .map_err(|_| DecodeError::Malformed(word_start))?;

        let param_start = self.pos;
        if self.input.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        let param = if self.pos > param_start {
            let text = std::str::from_utf8(&self.input[param_start..self.pos])
                .map_err(|_| DecodeError::Malformed(param_start))?;
            Some(
                text.parse::<i32>()
                    .map_err(|_| DecodeError::Malformed(param_start))?,
            )
        } else {
            None
        };

        if self.input.get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }

        self.apply_word(word, param);
        Ok(())
    }

    fn apply_word(&mut self, word: &str, param: Option<i32>) {
        let on = param != Some(0);
        match word {
            "par" | "line" => self.emit('\n'),
            "tab" => self.emit('\t'),
            "emdash" => self.emit('\u{2014}'),
            "endash" => self.emit('\u{2013}'),
            "bullet" => self.emit('\u{2022}'),
            "lquote" => self.emit('\u{2018}'),
            "rquote" => self.emit('\u{2019}'),
            "ldblquote" => self.emit('\u{201c}'),
            "rdblquote" => self.emit('\u{201d}'),
            "b" => self.state.style.bold = on,
            "i" => self.state.style.italic = on,
            "ul" => self.state.style.underline = on,
            "ulnone" => self.state.style.underline = false,
            "plain" => self.state.style = TextStyle::PLAIN,
            "uc" => self.state.fallback_len = param.unwrap_or(1).max(0) as usize,
            "u" => {
                if let Some(value) = param {
                    self.unicode(value);
                }
            }
            w if SKIPPED_DESTINATIONS.contains(&w) => self.state.skip = true,
            _ => {}
        }
    }

    fn unicode(&mut self, value: i32) {
        let unit = if value < 0 { value + 0x10000 } else { value };
        let unit = u32::try_from(unit).unwrap_or(u32::from(char::REPLACEMENT_CHARACTER));
        match unit {
            0xD800..=0xDBFF => {
                self.flush_orphan_surrogate();
                self.high_surrogate = Some(unit as u16);
            }
            0xDC00..=0xDFFF => {
                let ch = self
                    .high_surrogate
                    .take()
                    .and_then(|high| char::decode_utf16([high, unit as u16]).next()?.ok())
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                self.emit(ch);
            }
            _ => self.emit(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER)),
        }
        self.pending_fallback = self.state.fallback_len;
    }

    /// A high surrogate not followed by its low half becomes U+FFFD.
    fn flush_orphan_surrogate(&mut self) {
        if self.high_surrogate.take().is_some() && !self.state.skip {
            self.doc
                .push_char(char::REPLACEMENT_CHARACTER, self.state.style);
        }
    }

    fn emit(&mut self, ch: char) {
        if self.state.skip {
            return;
        }
        if self.pending_fallback > 0 {
            self.pending_fallback -= 1;
            return;
        }
        self.flush_orphan_surrogate();
        self.doc.push_char(ch, self.state.style);
    }
}
