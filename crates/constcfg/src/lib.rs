//! # constcfg
//!
//! Persist records as readable, commented Go-style constant blocks and read
//! them back.
//!
//! A record's public fields become one `const` group, each field's doc
//! comment written as `//` lines above its declaration:
//!
//! ```
//! constcfg::record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Config {
//!         /// Greeting shown at startup
//!         pub Hello: String,
//!         pub Retries: u32,
//!     }
//! }
//!
//! let config = Config { Hello: "World".into(), Retries: 3 };
//! let text = constcfg::encode(&config).unwrap();
//! assert_eq!(
//!     text,
//!     "package config\n\nconst (\n\t// Greeting shown at startup\n\tHello = \"World\"\n\n\tRetries = 3\n)\n"
//! );
//!
//! let mut decoded = Config::default();
//! constcfg::decode(&text, &mut decoded).unwrap();
//! assert_eq!(decoded, config);
//! ```
//!
//! Decoding parses the text as a small subset of Go, then assigns each
//! constant to the field of the same name, converting the literal to the
//! field's type.

mod config;
mod decode;
mod encode;
mod error;
mod field;
mod literal;
mod record;
mod value;

pub use config::{EncoderConfig, EncoderConfigBuilder, DEFAULT_PACKAGE};
pub use decode::decode;
pub use encode::Encoder;
pub use error::{BoxError, Error, Result};
pub use field::{Field, SetFloat, SetInt, SetText, SetUint, Slot};
pub use literal::{can_backquote, quote, unquote, UnquoteError};
pub use record::{AsRecord, Record};
pub use value::{FieldDescriptor, Value};

/// Encode `value` with the default configuration.
pub fn encode<T: AsRecord + ?Sized>(value: &T) -> Result<String> {
    Encoder::default().encode(value)
}

/// Encode an already extracted field list with the default configuration.
pub fn encode_fields(fields: &[FieldDescriptor]) -> String {
    Encoder::default().encode_fields(fields)
}

/// The public fields of `value`, with their values and trimmed docs.
///
/// Returns an empty list when `value` does not hold a record.
pub fn extract<T: AsRecord + ?Sized>(value: &T) -> Vec<FieldDescriptor> {
    let Some(record) = value.as_record() else {
        return Vec::new();
    };
    record
        .fields()
        .into_iter()
        .map(|mut field| {
            field.doc = field.doc.trim().to_string();
            field
        })
        .collect()
}

#[doc(hidden)]
pub mod __private {
    /// Join `#[doc]` attribute lines into doc text.
    pub fn doc_text(lines: &[&str]) -> String {
        lines
            .iter()
            .copied()
            .map(|line| line.strip_prefix(' ').unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::doc_text;

        #[test]
        fn test_doc_text() {
            assert_eq!(doc_text(&[]), "");
            assert_eq!(doc_text(&[" one", " two"]), "one\ntwo");
            assert_eq!(doc_text(&["", " a", "", "   b", ""]), "a\n\n  b");
        }
    }
}
