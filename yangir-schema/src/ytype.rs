//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::module::IdentityId;

/// YANG base type kinds. `bits` is recognized but not mapped.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum TypeKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    String,
    Bool,
    Decimal64,
    Binary,
    Empty,
    Enumeration,
    Identityref,
    Leafref,
    Union,
    Bits,
}

// ===== impl TypeKind =====

impl TypeKind {
    /// The YANG keyword for this base type.
    pub fn to_yang(&self) -> &'static str {
        match self {
            TypeKind::Int8 => "int8",
            TypeKind::Int16 => "int16",
            TypeKind::Int32 => "int32",
            TypeKind::Int64 => "int64",
            TypeKind::Uint8 => "uint8",
            TypeKind::Uint16 => "uint16",
            TypeKind::Uint32 => "uint32",
            TypeKind::Uint64 => "uint64",
            TypeKind::String => "string",
            TypeKind::Bool => "boolean",
            TypeKind::Decimal64 => "decimal64",
            TypeKind::Binary => "binary",
            TypeKind::Empty => "empty",
            TypeKind::Enumeration => "enumeration",
            TypeKind::Identityref => "identityref",
            TypeKind::Leafref => "leafref",
            TypeKind::Union => "union",
            TypeKind::Bits => "bits",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            TypeKind::Int8
                | TypeKind::Int16
                | TypeKind::Int32
                | TypeKind::Int64
                | TypeKind::Uint8
                | TypeKind::Uint16
                | TypeKind::Uint32
                | TypeKind::Uint64
        )
    }

    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            TypeKind::Uint8
                | TypeKind::Uint16
                | TypeKind::Uint32
                | TypeKind::Uint64
        )
    }
}

/// A named enumeration value with its assigned number.
#[derive(Clone, Debug, Eq, new, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// A resolved YANG type. Typedef chains are unwound by the parser: `name`
/// keeps the outermost typedef name (or the base-type keyword for inline
/// types) and `module` the typedef's defining module.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct YangType {
    pub name: String,
    pub kind: TypeKind,
    pub module: Option<String>,
    // Leafref target path.
    pub path: Option<String>,
    pub identity: Option<IdentityId>,
    pub enum_values: Vec<EnumValue>,
    pub union_types: Vec<YangType>,
    pub ranges: Vec<(i128, i128)>,
    pub patterns: Vec<String>,
    pub fraction_digits: Option<u8>,
}

// ===== impl YangType =====

impl YangType {
    /// An anonymous instance of a base type.
    pub fn base(kind: TypeKind) -> Self {
        YangType {
            name: kind.to_yang().to_owned(),
            kind,
            module: None,
            path: None,
            identity: None,
            enum_values: Vec::new(),
            union_types: Vec::new(),
            ranges: Vec::new(),
            patterns: Vec::new(),
            fraction_digits: None,
        }
    }

    /// An inline `enumeration` with values numbered in definition order.
    pub fn enumeration<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut typ = YangType::base(TypeKind::Enumeration);
        typ.enum_values = names
            .into_iter()
            .enumerate()
            .map(|(value, name)| EnumValue::new(name.to_owned(), value as i64))
            .collect();
        typ
    }

    pub fn identityref(identity: IdentityId) -> Self {
        let mut typ = YangType::base(TypeKind::Identityref);
        typ.identity = Some(identity);
        typ
    }

    pub fn leafref(path: &str) -> Self {
        let mut typ = YangType::base(TypeKind::Leafref);
        typ.path = Some(path.to_owned());
        typ
    }

    pub fn union(types: Vec<YangType>) -> Self {
        let mut typ = YangType::base(TypeKind::Union);
        typ.union_types = types;
        typ
    }

    /// Renames the type after a typedef and records its defining module.
    pub fn typedef(mut self, name: &str, module: &str) -> Self {
        self.name = name.to_owned();
        self.module = Some(module.to_owned());
        self
    }

    pub fn with_ranges(mut self, ranges: Vec<(i128, i128)>) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn with_patterns(
        mut self,
        patterns: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        self.patterns = patterns.into_iter().map(str::to_owned).collect();
        self
    }

    /// Whether the type refers to a typedef rather than an inline type.
    pub fn is_typedef(&self) -> bool {
        self.name != self.kind.to_yang()
    }

    /// Member types of a union with nested unions inlined, in definition
    /// order. Empty for non-union types.
    pub fn flattened_union_types(&self) -> Vec<&YangType> {
        let mut types = Vec::new();
        for typ in &self.union_types {
            if typ.kind == TypeKind::Union {
                types.extend(typ.flattened_union_types());
            } else {
                types.push(typ);
            }
        }
        types
    }
}
