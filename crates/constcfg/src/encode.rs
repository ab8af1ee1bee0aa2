//! Record to constant block.

use std::fmt::Write as _;

use tracing::trace;

use crate::config::EncoderConfig;
use crate::error::{Error, Result};
use crate::literal::quote;
use crate::record::AsRecord;
use crate::value::FieldDescriptor;

/// Writes records as a `package` clause followed by one `const` group.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode the public fields of `value`.
    ///
    /// Fails with [`Error::NotRecordKind`] when `value` does not hold a
    /// record, before anything is written.
    pub fn encode<T: AsRecord + ?Sized>(&self, value: &T) -> Result<String> {
        let record = value.as_record().ok_or(Error::NotRecordKind)?;
        Ok(self.encode_fields(&record.fields()))
    }

    /// Encode an already extracted field list.
    pub fn encode_fields(&self, fields: &[FieldDescriptor]) -> String {
        let mut out = format!("package {}\n\nconst (\n", self.config.package);

        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }

            let doc = field.doc.trim();
            if !doc.is_empty() {
                for line in doc.split('\n') {
                    let _ = writeln!(out, "\t// {line}");
                }
            }

            let literal = quote(&field.value);
            trace!(name = %field.name, %literal, "encode field");
            let _ = writeln!(out, "\t{} = {}", field.name, literal);
        }

        out.push_str(")\n");
        out
    }
}
