//! The record abstraction: an ordered set of named, documented fields.

use crate::field::Slot;
use crate::value::FieldDescriptor;

/// A value with named fields that can be encoded and decoded.
///
/// Usually generated by [`record!`](crate::record); implement it by hand
/// when a type needs custom names or computed fields. Hand-written records
/// must also implement [`AsRecord`] returning `Some(self)`.
pub trait Record {
    /// Public fields in declaration order. Fields with nothing to write
    /// (an empty `Option`) are left out.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Decode destination for the public field called `name`.
    fn slot(&mut self, name: &str) -> Option<Slot<'_>>;
}

/// Resolve a value to the record it holds, if any.
///
/// References, boxes and `Some` are followed; scalars, strings and `None`
/// are not records.
pub trait AsRecord {
    fn as_record(&self) -> Option<&dyn Record>;
}

impl AsRecord for dyn Record + '_ {
    fn as_record(&self) -> Option<&dyn Record> {
        Some(self)
    }
}

impl<T: AsRecord + ?Sized> AsRecord for &T {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }
}

impl<T: AsRecord + ?Sized> AsRecord for &mut T {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }
}

impl<T: AsRecord + ?Sized> AsRecord for Box<T> {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }
}

impl<T: AsRecord> AsRecord for Option<T> {
    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(AsRecord::as_record)
    }
}

macro_rules! not_records {
    ($($ty:ty),*) => {$(
        impl AsRecord for $ty {
            fn as_record(&self) -> Option<&dyn Record> {
                None
            }
        }
    )*};
}

not_records!(
    bool, char, str, String, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64, ()
);

/// Declare structs that implement [`Record`].
///
/// Field names are used verbatim as constant names, so fields are usually
/// written in `UpperCamelCase`; the generated struct allows that. `///`
/// comments on a field become its doc text; other field attributes are
/// passed through to the struct. Only `pub` fields take part in
/// encoding and decoding; other fields are kept out of both.
///
/// ```
/// constcfg::record! {
///     #[derive(Debug, Default)]
///     pub struct Server {
///         /// Address to listen on
///         pub Host: String,
///         pub Port: u16,
///         cache: Vec<u8>,
///     }
/// }
///
/// let server = Server { Host: "0.0.0.0".into(), Port: 80, cache: Vec::new() };
/// let text = constcfg::encode(&server).unwrap();
/// assert!(text.contains("\t// Address to listen on\n\tHost = \"0.0.0.0\"\n"));
/// ```
#[macro_export]
macro_rules! record {
    () => {};

    // All fields sorted; emit the trait impls for the public ones.
    (
        @impl $name:ident [$( ($field:ident [$($doc:literal),*]) )*]
    ) => {
        impl $crate::Record for $name {
            fn fields(&self) -> ::std::vec::Vec<$crate::FieldDescriptor> {
                #[allow(unused_mut)]
                let mut fields = ::std::vec::Vec::new();
                $(
                    if let ::std::option::Option::Some(value) = $crate::Field::value(&self.$field) {
                        fields.push(
                            $crate::FieldDescriptor::new(::std::stringify!($field), value)
                                .with_doc($crate::__private::doc_text(&[$($doc),*])),
                        );
                    }
                )*
                fields
            }

            fn slot(&mut self, name: &str) -> ::std::option::Option<$crate::Slot<'_>> {
                $(
                    if name == ::std::stringify!($field) {
                        return ::std::option::Option::Some($crate::Field::slot(&mut self.$field));
                    }
                )*
                let _ = name;
                ::std::option::Option::None
            }
        }

        impl $crate::AsRecord for $name {
            fn as_record(&self) -> ::std::option::Option<&dyn $crate::Record> {
                ::std::option::Option::Some(self)
            }
        }
    };

    // Collect the `#[doc]` lines of a public field, dropping other attributes.
    (
        @doc $name:ident [$($acc:tt)*] $field:ident [$($doc:literal),*]
        [#[doc = $next:literal] $($attrs:tt)*]
        $($rest:tt)*
    ) => {
        $crate::record! { @doc $name [$($acc)*] $field [$($doc,)* $next] [$($attrs)*] $($rest)* }
    };

    (
        @doc $name:ident [$($acc:tt)*] $field:ident [$($doc:literal),*]
        [#[$($other:tt)*] $($attrs:tt)*]
        $($rest:tt)*
    ) => {
        $crate::record! { @doc $name [$($acc)*] $field [$($doc),*] [$($attrs)*] $($rest)* }
    };

    (
        @doc $name:ident [$($acc:tt)*] $field:ident [$($doc:literal),*] []
        $($rest:tt)*
    ) => {
        $crate::record! { @impl $name [$($acc)* ($field [$($doc),*])] $($rest)* }
    };

    // Public field: keep it.
    (
        @impl $name:ident [$($acc:tt)*]
        $(#[$($attr:tt)*])*
        pub $field:ident : $ty:ty
        $(, $($rest:tt)*)?
    ) => {
        $crate::record! { @doc $name [$($acc)*] $field [] [$(#[$($attr)*])*] $($($rest)*)? }
    };

    // Anything narrower than `pub`: skip it.
    (
        @impl $name:ident [$($acc:tt)*]
        $(#[$($attr:tt)*])*
        $fvis:vis $field:ident : $ty:ty
        $(, $($rest:tt)*)?
    ) => {
        $crate::record! { @impl $name [$($acc)*] $($($rest)*)? }
    };

    (
        $(#[$outer_meta:meta])*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }

        $($tail:tt)*
    ) => {
        $(#[$outer_meta])*
        #[allow(non_snake_case)]
        $vis struct $name {
            $($body)*
        }

        $crate::record! { @impl $name [] $($body)* }

        $crate::record! { $($tail)* }
    };
}
