//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use regex::Regex;
use yangir_schema::{Entry, TypeKind, YangType};

use crate::error::Error;
use crate::schematree::SchemaTree;

/// Re-parses a schema default literal against the leaf's resolved type.
///
/// Enumeration and identityref defaults lose their namespace prefix before
/// the membership check; leafref defaults recurse into the target; union
/// defaults take the first matching subtype, enumerated subtypes first.
pub fn validate_default(
    entry: Entry<'_>,
    typ: &YangType,
    value: &str,
    tree: &SchemaTree,
) -> Result<String, Error> {
    let invalid =
        || Error::InvalidDefault(entry.path(), value.to_owned());

    match typ.kind {
        TypeKind::Int8
        | TypeKind::Int16
        | TypeKind::Int32
        | TypeKind::Int64
        | TypeKind::Uint8
        | TypeKind::Uint16
        | TypeKind::Uint32
        | TypeKind::Uint64 => {
            let parsed: i128 = value.parse().map_err(|_| invalid())?;
            let (min, max) = integer_bounds(typ.kind);
            if parsed < min || parsed > max {
                return Err(invalid());
            }
            if !typ.ranges.is_empty()
                && !typ
                    .ranges
                    .iter()
                    .any(|(lo, hi)| parsed >= *lo && parsed <= *hi)
            {
                return Err(invalid());
            }
            Ok(value.to_owned())
        }
        TypeKind::Decimal64 => {
            value.parse::<f64>().map_err(|_| invalid())?;
            Ok(value.to_owned())
        }
        TypeKind::Bool => match value {
            "true" | "false" => Ok(value.to_owned()),
            _ => Err(invalid()),
        },
        TypeKind::String => {
            for pattern in &typ.patterns {
                let anchored = format!("^(?:{pattern})$");
                let regex = Regex::new(&anchored).map_err(|_| invalid())?;
                if !regex.is_match(value) {
                    return Err(invalid());
                }
            }
            Ok(value.to_owned())
        }
        TypeKind::Binary => Ok(value.to_owned()),
        TypeKind::Empty => Err(invalid()),
        TypeKind::Enumeration => {
            let name = strip_value_prefix(value);
            if typ.enum_values.iter().any(|v| v.name == name) {
                Ok(name.to_owned())
            } else {
                Err(invalid())
            }
        }
        TypeKind::Identityref => {
            let identity = typ
                .identity
                .map(|id| entry.schema().identity(id))
                .ok_or_else(|| Error::MissingIdentityBase(entry.path()))?;
            let name = strip_value_prefix(value);
            if identity.values.iter().any(|v| v.name == name) {
                Ok(name.to_owned())
            } else {
                Err(invalid())
            }
        }
        TypeKind::Leafref => {
            let path = typ.path.as_deref().ok_or_else(invalid)?;
            let target = tree.resolve_leafref(path, Some(entry))?;
            let target = entry.schema().entry(target);
            let target_type =
                target.typ().ok_or_else(|| {
                    Error::MissingContextEntry(target.path())
                })?;
            validate_default(target, target_type, value, tree)
        }
        TypeKind::Union => {
            let flattened = typ.flattened_union_types();
            if flattened.is_empty() {
                return Err(Error::EmptyUnion(entry.path()));
            }
            // Enumerated subtypes win over string-like subtypes that would
            // also accept the literal.
            let (enumerated, plain): (Vec<_>, Vec<_>) =
                flattened.into_iter().partition(|t| {
                    matches!(
                        t.kind,
                        TypeKind::Enumeration | TypeKind::Identityref
                    )
                });
            for subtype in enumerated.into_iter().chain(plain) {
                if let Ok(value) =
                    validate_default(entry, subtype, value, tree)
                {
                    return Ok(value);
                }
            }
            Err(invalid())
        }
        TypeKind::Bits => Err(Error::UnsupportedType(
            entry.path(),
            typ.name.clone(),
        )),
    }
}

// ===== helper functions =====

fn integer_bounds(kind: TypeKind) -> (i128, i128) {
    match kind {
        TypeKind::Int8 => (i8::MIN as i128, i8::MAX as i128),
        TypeKind::Int16 => (i16::MIN as i128, i16::MAX as i128),
        TypeKind::Int32 => (i32::MIN as i128, i32::MAX as i128),
        TypeKind::Int64 => (i64::MIN as i128, i64::MAX as i128),
        TypeKind::Uint8 => (0, u8::MAX as i128),
        TypeKind::Uint16 => (0, u16::MAX as i128),
        TypeKind::Uint32 => (0, u32::MAX as i128),
        TypeKind::Uint64 => (0, u64::MAX as i128),
        _ => (i128::MIN, i128::MAX),
    }
}

/// Drops the `prefix:` qualifier of an enum or identity default.
fn strip_value_prefix(value: &str) -> &str {
    match value.rsplit_once(':') {
        Some((_, name)) => name,
        None => value,
    }
}
