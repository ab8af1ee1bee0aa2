//! Per-field access used by the encoder and decoder.
//!
//! A record exposes each field through [`Field`]: its current [`Value`] for
//! encoding, and a [`Slot`] the decoder writes a literal into.

use crate::error::BoxError;
use crate::value::Value;

/// A type whose value can be replaced from literal text.
///
/// Types implementing this together with `Display` can be used as record
/// fields through [`text_field!`](crate::text_field).
pub trait SetText {
    fn set_text(&mut self, text: &str) -> Result<(), BoxError>;
}

/// Signed integer storage of any width.
pub trait SetInt {
    /// Store `value`, failing if it does not fit.
    fn set_int(&mut self, value: i64) -> Result<(), BoxError>;
}

/// Unsigned integer storage of any width.
pub trait SetUint {
    /// Store `value`, failing if it does not fit.
    fn set_uint(&mut self, value: u64) -> Result<(), BoxError>;
}

/// Floating-point storage of any width.
pub trait SetFloat {
    fn set_float(&mut self, value: f64);
}

/// Where a decoded literal goes, by the kind of the destination field.
pub enum Slot<'a> {
    Str(&'a mut String),
    Bool(&'a mut bool),
    Int(&'a mut dyn SetInt),
    Uint(&'a mut dyn SetUint),
    Float(&'a mut dyn SetFloat),
    Text(&'a mut dyn SetText),
    /// The field cannot be decoded; literals for it are ignored
    Unsupported,
}

/// A value that can be stored in a record field.
pub trait Field {
    /// Current value, or `None` if there is nothing to write (an empty
    /// `Option`).
    fn value(&self) -> Option<Value>;

    /// Destination for a decoded literal.
    fn slot(&mut self) -> Slot<'_>;
}

impl Field for String {
    fn value(&self) -> Option<Value> {
        Some(Value::Str(self.clone()))
    }

    fn slot(&mut self) -> Slot<'_> {
        Slot::Str(self)
    }
}

impl Field for bool {
    fn value(&self) -> Option<Value> {
        Some(Value::Bool(*self))
    }

    fn slot(&mut self) -> Slot<'_> {
        Slot::Bool(self)
    }
}

macro_rules! int_fields {
    ($($ty:ty),*) => {$(
        impl SetInt for $ty {
            fn set_int(&mut self, value: i64) -> Result<(), BoxError> {
                *self = <$ty>::try_from(value)?;
                Ok(())
            }
        }

        impl Field for $ty {
            fn value(&self) -> Option<Value> {
                Some(Value::Int(*self as i64))
            }

            fn slot(&mut self) -> Slot<'_> {
                Slot::Int(self)
            }
        }
    )*};
}

macro_rules! uint_fields {
    ($($ty:ty),*) => {$(
        impl SetUint for $ty {
            fn set_uint(&mut self, value: u64) -> Result<(), BoxError> {
                *self = <$ty>::try_from(value)?;
                Ok(())
            }
        }

        impl Field for $ty {
            fn value(&self) -> Option<Value> {
                Some(Value::Uint(*self as u64))
            }

            fn slot(&mut self) -> Slot<'_> {
                Slot::Uint(self)
            }
        }
    )*};
}

int_fields!(i8, i16, i32, i64, isize);
uint_fields!(u8, u16, u32, u64, usize);

impl SetFloat for f64 {
    fn set_float(&mut self, value: f64) {
        *self = value;
    }
}

impl SetFloat for f32 {
    fn set_float(&mut self, value: f64) {
        *self = value as f32;
    }
}

impl Field for f64 {
    fn value(&self) -> Option<Value> {
        Some(Value::Float(*self))
    }

    fn slot(&mut self) -> Slot<'_> {
        Slot::Float(self)
    }
}

impl Field for f32 {
    fn value(&self) -> Option<Value> {
        Some(Value::Float32(*self))
    }

    fn slot(&mut self) -> Slot<'_> {
        Slot::Float(self)
    }
}

/// An empty option is left out when encoding, and filled with
/// `T::default()` before the first assignment when decoding.
impl<T: Field + Default> Field for Option<T> {
    fn value(&self) -> Option<Value> {
        self.as_ref().and_then(Field::value)
    }

    fn slot(&mut self) -> Slot<'_> {
        self.get_or_insert_with(T::default).slot()
    }
}

impl<T: Field + ?Sized> Field for Box<T> {
    fn value(&self) -> Option<Value> {
        (**self).value()
    }

    fn slot(&mut self) -> Slot<'_> {
        (**self).slot()
    }
}

/// Implement [`Field`] for types that implement `Display` and [`SetText`].
///
/// ```
/// use constcfg::{BoxError, SetText};
/// use std::fmt;
///
/// #[derive(Default)]
/// struct Level(String);
///
/// impl fmt::Display for Level {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(&self.0)
///     }
/// }
///
/// impl SetText for Level {
///     fn set_text(&mut self, text: &str) -> Result<(), BoxError> {
///         self.0 = text.to_string();
///         Ok(())
///     }
/// }
///
/// constcfg::text_field!(Level);
/// ```
#[macro_export]
macro_rules! text_field {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::Field for $ty {
            fn value(&self) -> ::std::option::Option<$crate::Value> {
                ::std::option::Option::Some($crate::Value::Text(::std::string::ToString::to_string(self)))
            }

            fn slot(&mut self) -> $crate::Slot<'_> {
                $crate::Slot::Text(self)
            }
        }
    )+};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_range_checked() {
        let mut small: i8 = 0;
        assert!(small.set_int(127).is_ok());
        assert_eq!(small, 127);
        assert!(small.set_int(128).is_err());
        assert_eq!(small, 127);
    }

    #[test]
    fn test_uint_range_checked() {
        let mut port: u16 = 0;
        port.set_uint(8080).unwrap();
        assert_eq!(port, 8080);
        assert!(port.set_uint(70_000).is_err());
    }

    #[test]
    fn test_option_allocates_on_slot() {
        let mut field: Option<u32> = None;
        assert_eq!(field.value(), None);
        match field.slot() {
            Slot::Uint(slot) => slot.set_uint(7).unwrap(),
            _ => panic!("expected uint slot"),
        }
        assert_eq!(field, Some(7));
    }

    #[test]
    fn test_values_by_kind() {
        assert_eq!(5u8.value(), Some(Value::Uint(5)));
        assert_eq!((-5i32).value(), Some(Value::Int(-5)));
        assert_eq!(1.5f32.value(), Some(Value::Float32(1.5)));
        assert_eq!(Box::new(true).value(), Some(Value::Bool(true)));
    }
}
