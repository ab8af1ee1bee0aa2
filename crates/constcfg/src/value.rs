//! Field values and descriptors.

use std::fmt;

use smol_str::SmolStr;

/// The value of one record field, tagged with how it is written out.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Float32(f32),
    /// A custom type rendered through its `Display` impl
    Text(String),
}

impl Value {
    /// Whether the value is written as a bare, unquoted literal.
    pub fn is_bare(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::Uint(_) | Value::Float(_) | Value::Float32(_)
        )
    }
}

/// Floats use the shortest text that parses back to the same value, and
/// switch to exponent notation for very large or small magnitudes.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) | Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Uint(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Float32(n) => write!(f, "{n:?}"),
        }
    }
}

/// A field's name, value and documentation, in declaration order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDescriptor {
    #[cfg_attr(feature = "serde", serde(rename = "Key"))]
    pub name: SmolStr,
    #[cfg_attr(feature = "serde", serde(rename = "Value"))]
    pub value: Value,
    /// Documentation text, possibly multi-line, possibly empty
    #[cfg_attr(feature = "serde", serde(rename = "Comment"))]
    pub doc: String,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<SmolStr>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            doc: String::new(),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_literal_text() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-42).to_string(), "-42");
        assert_eq!(Value::Uint(22).to_string(), "22");
        assert_eq!(Value::Float(1.23).to_string(), "1.23");
        assert_eq!(Value::Float32(0.1).to_string(), "0.1");
        assert_eq!(Value::Str("a \"b\"".into()).to_string(), "a \"b\"");
    }

    #[test]
    fn test_float_keeps_decimal_point() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(1e300).to_string(), "1e300");
    }

    #[test]
    fn test_bare_kinds() {
        assert!(Value::Uint(1).is_bare());
        assert!(Value::Float32(1.5).is_bare());
        assert!(!Value::Str("1".into()).is_bare());
        assert!(!Value::Text("1".into()).is_bare());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_descriptor_json() {
        let field = FieldDescriptor::new("Number", Value::Int(123)).with_doc("How many");
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, r#"{"Key":"Number","Value":"123","Comment":"How many"}"#);
    }
}
