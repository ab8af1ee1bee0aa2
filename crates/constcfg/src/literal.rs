//! Quoting and unquoting of string literals.
//!
//! Values are written as interpreted strings (`"..."`) unless they span
//! several lines that can all be written verbatim, in which case a raw
//! string (`` `...` ``) keeps multi-line text readable.

use std::fmt::Write as _;

use thiserror::Error;

use crate::value::Value;

/// Why a string literal could not be unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnquoteError {
    #[error("not a string literal")]
    NotQuoted,
    #[error("invalid escape sequence at byte {offset}")]
    InvalidEscape { offset: usize },
    #[error("string literal is not valid UTF-8")]
    InvalidUtf8,
}

/// Render a value as literal text.
pub fn quote(value: &Value) -> String {
    if value.is_bare() {
        return value.to_string();
    }
    let text = value.to_string();
    if use_raw(&text) {
        format!("`{text}`")
    } else {
        quote_interpreted(&text)
    }
}

/// Multi-line text whose every line survives verbatim inside backticks.
fn use_raw(text: &str) -> bool {
    text.contains('\n') && text.split('\n').all(can_backquote)
}

/// Whether `line` can sit inside a raw string without change.
pub fn can_backquote(line: &str) -> bool {
    line.chars().all(|c| {
        c != '`' && c != '\u{feff}' && (c == '\t' || (c >= ' ' && c != '\u{7f}'))
    })
}

/// Write `text` as a double-quoted literal with escapes.
pub fn quote_interpreted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if is_printable(c) => out.push(c),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            c if c < ' ' || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if (c as u32) < 0x10000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
    out.push('"');
    out
}

/// Graphic characters and the ASCII space print as themselves; controls,
/// other spacing, format characters and private-use code points are escaped.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c as u32,
        0xad
            | 0x600..=0x605
            | 0x61c
            | 0x6dd
            | 0x70f
            | 0x180e
            | 0x200b..=0x200f
            | 0x202a..=0x202e
            | 0x2060..=0x206f
            | 0xe000..=0xf8ff
            | 0xfeff
            | 0xfff9..=0xfffb
            | 0xf0000..=0x10ffff
    )
}

/// Strip the quotes from a string literal and resolve its escapes.
///
/// Raw strings are taken verbatim, except that carriage returns are
/// dropped.
pub fn unquote(literal: &str) -> Result<String, UnquoteError> {
    if let Some(inner) = literal
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
    {
        if inner.contains('`') {
            return Err(UnquoteError::NotQuoted);
        }
        return Ok(inner.replace('\r', ""));
    }

    let inner = literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or(UnquoteError::NotQuoted)?;

    // \x and octal escapes produce raw bytes, so build bytes first
    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '\\' => {}
            '"' | '\n' => return Err(UnquoteError::NotQuoted),
            c => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                continue;
            }
        }

        // Offsets are relative to the literal, opening quote included
        let invalid = UnquoteError::InvalidEscape { offset: offset + 1 };
        let Some((_, escape)) = chars.next() else {
            return Err(invalid);
        };
        match escape {
            'a' => bytes.push(0x07),
            'b' => bytes.push(0x08),
            'f' => bytes.push(0x0c),
            'n' => bytes.push(b'\n'),
            'r' => bytes.push(b'\r'),
            't' => bytes.push(b'\t'),
            'v' => bytes.push(0x0b),
            '\\' => bytes.push(b'\\'),
            '"' => bytes.push(b'"'),
            'x' => {
                let value = take_digits(&mut chars, 2, 16).ok_or(invalid)?;
                bytes.push(value as u8);
            }
            '0'..='7' => {
                let rest = take_digits(&mut chars, 2, 8).ok_or(invalid.clone())?;
                let value = (escape as u32 - '0' as u32) * 64 + rest;
                let byte = u8::try_from(value).map_err(|_| invalid)?;
                bytes.push(byte);
            }
            'u' | 'U' => {
                let width = if escape == 'u' { 4 } else { 8 };
                let value = take_digits(&mut chars, width, 16).ok_or(invalid.clone())?;
                let c = char::from_u32(value).ok_or(invalid)?;
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            _ => return Err(invalid),
        }
    }

    String::from_utf8(bytes).map_err(|_| UnquoteError::InvalidUtf8)
}

/// Read exactly `count` digits in `radix`.
fn take_digits(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    count: usize,
    radix: u32,
) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        let (_, c) = chars.next()?;
        value = value * radix + c.to_digit(radix)?;
    }
    Some(value)
}
