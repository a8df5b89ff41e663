//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;
use std::rc::Rc;

use itertools::Itertools;
use yangir_schema::{Entry, TypeKind, YangType};
use yangir_util::naming::{DefinedNames, camel_case, snake_case};
use yangir_util::yang::{CompressBehaviour, is_oc_compressed_valid_element};

use crate::IrOptions;
use crate::enumset::EnumSet;
use crate::error::Error;
use crate::ir::MappedType;
use crate::langmap::{LangMapper, apply_default, union_type_indices};
use crate::schematree::SchemaTree;

/// Mapper for message-style output: wrapper message types for leaves,
/// scalar variants in key positions, message names unique per package and
/// oneof-style unions with members indexed in sorted order.
#[derive(Debug, Default)]
pub struct ProtoLangMapper {
    defined_globals: DefinedNames,
    package_names: BTreeMap<String, DefinedNames>,
    enum_set: Option<Rc<EnumSet>>,
    schema_tree: Option<Rc<SchemaTree>>,
}

// ===== impl ProtoLangMapper =====

impl ProtoLangMapper {
    pub fn new() -> Self {
        Self::default()
    }

    fn enum_set(&self) -> Result<&EnumSet, Error> {
        self.enum_set
            .as_deref()
            .ok_or_else(|| Error::MissingEnumName("enum set unset".to_owned()))
    }

    fn schema_tree(&self) -> Result<&SchemaTree, Error> {
        self.schema_tree.as_deref().ok_or_else(|| {
            Error::MissingContextEntry("schema tree unset".to_owned())
        })
    }

    fn map_type(
        &self,
        entry: Entry<'_>,
        typ: &YangType,
        opts: &IrOptions,
        key_context: bool,
        named_union: Option<&YangType>,
    ) -> Result<MappedType, Error> {
        let wrapper = |native: &str| MappedType {
            native_type: native.to_owned(),
            ..Default::default()
        };

        match typ.kind {
            TypeKind::Int8
            | TypeKind::Int16
            | TypeKind::Int32
            | TypeKind::Int64 => Ok(if key_context {
                let mut mapped = wrapper("sint64");
                mapped.zero_value = "0".to_owned();
                mapped
            } else {
                wrapper("ywrapper.IntValue")
            }),
            TypeKind::Uint8
            | TypeKind::Uint16
            | TypeKind::Uint32
            | TypeKind::Uint64 => Ok(if key_context {
                let mut mapped = wrapper("uint64");
                mapped.zero_value = "0".to_owned();
                mapped
            } else {
                wrapper("ywrapper.UintValue")
            }),
            TypeKind::Bool => Ok(if key_context {
                let mut mapped = wrapper("bool");
                mapped.zero_value = "false".to_owned();
                mapped
            } else {
                wrapper("ywrapper.BoolValue")
            }),
            // An empty leaf carries only its presence.
            TypeKind::Empty => Ok(wrapper("ywrapper.BoolValue")),
            TypeKind::String => Ok(if key_context {
                wrapper("string")
            } else {
                wrapper("ywrapper.StringValue")
            }),
            TypeKind::Binary => Ok(if key_context {
                wrapper("bytes")
            } else {
                wrapper("ywrapper.BytesValue")
            }),
            TypeKind::Decimal64 => Ok(wrapper("ywrapper.Decimal64Value")),
            TypeKind::Enumeration => {
                let enum_set = self.enum_set()?;
                let name = if typ.is_typedef() {
                    enum_set.typedef_name(entry, typ, false)?
                } else if let Some(union) = named_union {
                    enum_set.typedef_name(entry, union, true)?
                } else {
                    enum_set.leaf_name(entry)?
                };
                Ok(MappedType {
                    native_type: name,
                    is_enumerated_value: true,
                    ..Default::default()
                })
            }
            TypeKind::Identityref => {
                let identity = typ
                    .identity
                    .map(|id| entry.schema().identity(id))
                    .ok_or_else(|| {
                        Error::MissingIdentityBase(entry.path())
                    })?;
                Ok(MappedType {
                    native_type: self.enum_set()?.identity_name(identity)?,
                    is_enumerated_value: true,
                    ..Default::default()
                })
            }
            TypeKind::Leafref => {
                let path = typ.path.as_deref().ok_or_else(|| {
                    Error::UnresolvedLeafref(entry.path(), String::new())
                })?;
                let target =
                    self.schema_tree()?.resolve_leafref(path, Some(entry))?;
                let target = entry.schema().entry(target);
                let target_type = target.typ().ok_or_else(|| {
                    Error::MissingContextEntry(target.path())
                })?;
                self.map_type(target, target_type, opts, key_context, None)
            }
            TypeKind::Union => {
                self.map_union(entry, typ, opts, key_context)
            }
            TypeKind::Bits => {
                Err(Error::UnsupportedType(entry.path(), typ.name.clone()))
            }
        }
    }

    fn map_union(
        &self,
        entry: Entry<'_>,
        typ: &YangType,
        opts: &IrOptions,
        key_context: bool,
    ) -> Result<MappedType, Error> {
        let flattened = typ.flattened_union_types();
        if flattened.is_empty() {
            return Err(Error::EmptyUnion(entry.path()));
        }

        let named_union = typ.is_typedef().then_some(typ);
        let mut members = Vec::new();
        for subtype in flattened {
            let mapped = self.map_type(
                entry,
                subtype,
                opts,
                key_context,
                named_union,
            )?;
            members.push(mapped.native_type);
        }
        let members: Vec<_> = members.into_iter().sorted().dedup().collect();

        if members.len() == 1 {
            return Ok(MappedType {
                native_type: members.into_iter().next().unwrap(),
                ..Default::default()
            });
        }

        Ok(MappedType {
            native_type: format!("{}_Union", camel_case(entry.name())),
            union_types: union_type_indices(members),
            ..Default::default()
        })
    }

    fn package_registry(&mut self, package: &str) -> &mut DefinedNames {
        self.package_names.entry(package.to_owned()).or_default()
    }
}

impl LangMapper for ProtoLangMapper {
    fn field_name(&self, entry: Entry<'_>) -> Result<String, Error> {
        Ok(snake_case(entry.name()))
    }

    fn directory_name(
        &mut self,
        entry: Entry<'_>,
        behaviour: CompressBehaviour,
    ) -> Result<String, Error> {
        if entry.is_fake_root() {
            let proposed = camel_case(entry.name());
            return Ok(self.defined_globals.unique(&proposed, "_"));
        }
        let package = self.package_name(entry, behaviour)?;
        let proposed = camel_case(entry.name());
        Ok(self.package_registry(&package).unique(&proposed, "_"))
    }

    fn leaf_type(
        &mut self,
        entry: Entry<'_>,
        opts: &IrOptions,
    ) -> Result<MappedType, Error> {
        let typ = entry
            .typ()
            .ok_or_else(|| Error::MissingContextEntry(entry.path()))?;
        let mut mapped = self.map_type(entry, typ, opts, false, None)?;
        apply_default(&mut mapped, entry, self.schema_tree()?)?;
        Ok(mapped)
    }

    fn key_leaf_type(
        &mut self,
        entry: Entry<'_>,
        opts: &IrOptions,
    ) -> Result<MappedType, Error> {
        let typ = entry
            .typ()
            .ok_or_else(|| Error::MissingContextEntry(entry.path()))?;
        let mut mapped = self.map_type(entry, typ, opts, true, None)?;
        apply_default(&mut mapped, entry, self.schema_tree()?)?;
        Ok(mapped)
    }

    /// Dot-joined snake-case path of the elements enclosing the entry,
    /// surviving compression. Empty for top-level messages.
    fn package_name(
        &mut self,
        entry: Entry<'_>,
        behaviour: CompressBehaviour,
    ) -> Result<String, Error> {
        let compress = behaviour.compress_enabled();
        let mut segments: Vec<_> = entry
            .ancestors()
            .filter(|e| {
                if compress {
                    is_oc_compressed_valid_element(*e)
                } else {
                    !e.is_choice() && !e.is_case() && !e.is_root()
                }
            })
            .map(|e| snake_case(e.name()))
            .collect();
        segments.reverse();
        Ok(segments.join("."))
    }

    fn set_enum_set(&mut self, enum_set: Rc<EnumSet>) {
        self.enum_set = Some(enum_set);
    }

    fn set_schema_tree(&mut self, tree: Rc<SchemaTree>) {
        self.schema_tree = Some(tree);
    }
}
