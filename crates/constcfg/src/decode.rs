//! Constant declarations back into a record.

use constcfg_ast::{DeclKind, Expr, ExprKind, UnaryOp};
use constcfg_parser::{parse, ParseResult};
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::error::{BoxError, Error, Result};
use crate::field::Slot;
use crate::literal::unquote;
use crate::record::Record;

/// Assign every constant in `text` to the field of the same name.
///
/// Constants are assigned in text order, so a name declared twice ends up
/// with its last value. Constants without a matching field, and fields
/// without a matching constant, are left alone. Values that are not plain
/// literals (`1 + 2`, `f(x)`) are skipped. Assignment stops at the first
/// error; fields assigned before it keep their new values.
pub fn decode<R: Record + ?Sized>(text: &str, record: &mut R) -> Result<()> {
    let ParseResult { ast, errors } = parse(text);
    if let Some(err) = errors.into_iter().next() {
        return Err(err.into());
    }

    for decl in &ast.decls {
        let DeclKind::Const(group) = &decl.node else {
            debug!(keyword = decl.node.keyword(), "skipping declaration");
            continue;
        };

        for spec in &group.specs {
            for (name, expr) in spec.bindings() {
                let Some(literal) = literal_text(expr)? else {
                    debug!(name = %name.node, "skipping non-literal value");
                    continue;
                };
                let Some(slot) = record.slot(&name.node) else {
                    debug!(name = %name.node, "no field for constant");
                    continue;
                };
                assign(&name.node, slot, &literal)?;
            }
        }
    }

    Ok(())
}

/// Text of a literal value, or `None` for expressions that are not one.
fn literal_text(expr: &Expr) -> Result<Option<String>> {
    let text = match &expr.node {
        ExprKind::Literal(lit) if lit.kind.is_quoted_string() => {
            let text = unquote(&lit.raw).map_err(|err| {
                Error::parse(format!("invalid string literal: {err}"), expr.span.range())
            })?;
            Some(text)
        }
        ExprKind::Literal(lit) => Some(lit.raw.to_string()),
        ExprKind::Ident(name) => Some(name.to_string()),
        // `-5`, `-inf`; a leading `+` is not a literal
        ExprKind::Unary {
            op: UnaryOp::Neg,
            operand,
        } => match &operand.node {
            ExprKind::Literal(lit) if lit.kind.is_numeric() => Some(format!("-{}", lit.raw)),
            ExprKind::Ident(name) => Some(format!("-{name}")),
            _ => None,
        },
        _ => None,
    };
    Ok(text)
}

fn assign(name: &SmolStr, slot: Slot<'_>, literal: &str) -> Result<()> {
    trace!(%name, literal, "assign field");

    let outcome: std::result::Result<(), BoxError> = match slot {
        Slot::Str(field) => {
            *field = literal.to_string();
            Ok(())
        }
        Slot::Bool(field) => {
            *field = literal == "true";
            Ok(())
        }
        Slot::Int(field) => literal
            .parse::<i64>()
            .map_err(BoxError::from)
            .and_then(|value| field.set_int(value)),
        Slot::Uint(field) => literal
            .parse::<u64>()
            .map_err(BoxError::from)
            .and_then(|value| field.set_uint(value)),
        Slot::Float(field) => literal
            .parse::<f64>()
            .map(|value| field.set_float(value))
            .map_err(BoxError::from),
        Slot::Text(field) => field.set_text(literal),
        Slot::Unsupported => {
            debug!(%name, "field type cannot be decoded");
            Ok(())
        }
    };

    outcome.map_err(|source| Error::TypeCoercion {
        field: name.clone(),
        literal: literal.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::value::Value;

    crate::record! {
        #[derive(Debug, Default, PartialEq)]
        struct Target {
            pub Name: String,
            pub Enabled: bool,
            pub Level: i8,
            pub Size: u64,
            pub Ratio: f32,
        }
    }

    fn decoded(text: &str) -> Target {
        let mut target = Target::default();
        decode(text, &mut target).unwrap();
        target
    }

    #[test]
    fn test_single_and_grouped_constants() {
        let target = decoded("package config\nconst Name = \"a\"\nconst (\n\tEnabled = true\n\tSize = 9\n)\n");
        assert_eq!(target.Name, "a");
        assert!(target.Enabled);
        assert_eq!(target.Size, 9);
    }

    #[test]
    fn test_bool_is_true_only_for_true() {
        let mut target = Target {
            Enabled: true,
            ..Target::default()
        };
        decode("const Enabled = yes", &mut target).unwrap();
        assert!(!target.Enabled);
    }

    #[test]
    fn test_names_pair_with_values_by_position() {
        let target = decoded("const Name, Level, Size = \"n\", -3");
        assert_eq!(target.Name, "n");
        assert_eq!(target.Level, -3);
        assert_eq!(target.Size, 0);
    }

    #[test]
    fn test_signed_identifier() {
        let target = decoded("const Ratio = -inf");
        assert_eq!(target.Ratio, f32::NEG_INFINITY);
    }

    #[test]
    fn test_non_literals_skipped() {
        let target = decoded("const (\n\tLevel = 1 + 2\n\tSize = uint64(4)\n\tName = (\"x\")\n\tRatio = 0.5\n)");
        assert_eq!(target.Level, 0);
        assert_eq!(target.Size, 0);
        assert_eq!(target.Name, "");
        assert_eq!(target.Ratio, 0.5);
    }

    #[test]
    fn test_var_and_import_ignored() {
        let target = decoded("import \"fmt\"\nvar Name = \"v\"\nconst Level = 2");
        assert_eq!(target.Name, "");
        assert_eq!(target.Level, 2);
    }

    #[test]
    fn test_out_of_range_is_coercion_error() {
        let mut target = Target::default();
        let err = decode("const (\n\tName = \"kept\"\n\tLevel = 300\n)", &mut target).unwrap_err();
        match &err {
            Error::TypeCoercion { field, literal, .. } => {
                assert_eq!(field.as_str(), "Level");
                assert_eq!(literal, "300");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(target.Name, "kept");
        insta::assert_snapshot!(
            err.to_string(),
            @r#"cannot assign "300" to field `Level`: out of range integral type conversion attempted"#
        );
    }

    #[test]
    fn test_non_decimal_integer_rejected() {
        let mut target = Target::default();
        let err = decode("const Size = 0x10", &mut target).unwrap_err();
        assert!(matches!(err, Error::TypeCoercion { .. }));
    }

    #[test]
    fn test_negative_into_unsigned_rejected() {
        let mut target = Target::default();
        let err = decode("const Size = -1", &mut target).unwrap_err();
        assert!(matches!(err, Error::TypeCoercion { .. }));
    }

    #[test]
    fn test_bad_escape_is_parse_error() {
        let mut target = Target::default();
        let text = "const Name = \"a\\qb\"";
        let err = decode(text, &mut target).unwrap_err();
        match &err {
            Error::Parse { span, .. } => {
                assert_eq!(span.offset(), 13);
                assert_eq!(span.len(), 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        insta::assert_snapshot!(
            err.to_string(),
            @"invalid string literal: invalid escape sequence at byte 2"
        );
    }

    #[test]
    fn test_syntax_error_reported() {
        let mut target = Target::default();
        let err = decode("const (\n\tName = \n)", &mut target).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_repeated_constant_last_wins() {
        let target = decoded("package config\nconst Name = \"a\"\nconst Name = \"b\"\n");
        assert_eq!(target.Name, "b");
    }

    #[test]
    fn test_var_does_not_shadow_constant() {
        let target = decoded("var Name = \"a\"\nconst Name = \"b\"");
        assert_eq!(target.Name, "b");
    }

    #[test]
    fn test_type_and_func_declarations_ignored() {
        let target = decoded(
            "package config\n\nconst Name = \"a\"\n\ntype Mode int\n\nfunc f() {\n\treturn\n}\n\nconst Size = 3\n",
        );
        assert_eq!(target.Name, "a");
        assert_eq!(target.Size, 3);
    }

    #[test]
    fn test_constant_without_value_ignored() {
        let mut target = Target {
            Level: 4,
            ..Target::default()
        };
        decode("const (\n\tLevel\n\tSize = 1\n)", &mut target).unwrap();
        assert_eq!(target.Level, 4);
        assert_eq!(target.Size, 1);
    }

    #[test]
    fn test_plus_sign_not_a_literal() {
        let target = decoded("const (\n\tSize = +5\n\tLevel = +2\n)");
        assert_eq!(target.Size, 0);
        assert_eq!(target.Level, 0);
    }

    /// Bytes with no textual form.
    #[derive(Debug, Default, PartialEq)]
    struct Blob(Vec<u8>);

    impl Field for Blob {
        fn value(&self) -> Option<Value> {
            None
        }

        fn slot(&mut self) -> Slot<'_> {
            Slot::Unsupported
        }
    }

    crate::record! {
        #[derive(Debug, Default)]
        struct WithBlob {
            pub Name: String,
            pub Data: Blob,
            pub Size: u64,
        }
    }

    #[test]
    fn test_unsupported_field_left_alone() {
        let mut target = WithBlob {
            Data: Blob(vec![1, 2]),
            ..WithBlob::default()
        };
        let result = decode(
            "const (\n\tName = \"n\"\n\tData = \"ignored\"\n\tSize = 7\n)",
            &mut target,
        );
        assert!(result.is_ok());
        assert_eq!(target.Data, Blob(vec![1, 2]));
        assert_eq!(target.Name, "n");
        assert_eq!(target.Size, 7);
    }
}
