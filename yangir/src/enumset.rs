//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet};

use yangir_schema::{
    Entry, EntryId, Identity, ParsedSchema, TypeKind, YangType,
};
use yangir_util::naming::{DefinedNames, camel_case};

use crate::IrOptions;
use crate::entities::VALUE_PREFIX_ANNOTATION;
use crate::error::{Error, Errors};
use crate::ir::{EnumeratedType, EnumeratedValue, EnumeratedValueKind};

/// The resolved mapping from enumeration sources to final code-names.
///
/// Keys are synthetic per-source identifiers: `<module>/<identity>` for
/// identities, `<module>/<typedef>` for typedef enumerations and the
/// node-identity path (or the schema path, with deduplication off) for
/// inline enumeration leaves. Lookups recompute keys with the same options
/// the two-pass resolution ran with; a miss means the resolution never ran
/// over the entry and is an internal error.
#[derive(Clone, Debug, Default)]
pub struct EnumSet {
    opts: IrOptions,
    identities: BTreeMap<String, String>,
    typedefs: BTreeMap<String, String>,
    leaves: BTreeMap<String, String>,
}

// ===== impl EnumSet =====

impl EnumSet {
    fn new(opts: IrOptions) -> Self {
        EnumSet {
            opts,
            ..Default::default()
        }
    }

    /// Final code-name of an identity.
    pub fn identity_name(&self, identity: &Identity) -> Result<String, Error> {
        let key = identity_key(identity);
        self.identities
            .get(&key)
            .cloned()
            .ok_or(Error::MissingEnumName(key))
    }

    /// Final code-name of a typedef enumeration. `simple_union` marks a
    /// typedef union wrapping exactly one enumeration.
    pub fn typedef_name(
        &self,
        entry: Entry<'_>,
        typ: &YangType,
        simple_union: bool,
    ) -> Result<String, Error> {
        let key = self.typedef_key(entry, typ, simple_union);
        self.typedefs
            .get(&key)
            .cloned()
            .ok_or(Error::MissingEnumName(key))
    }

    /// Final code-name of an inline enumeration leaf.
    pub fn leaf_name(&self, entry: Entry<'_>) -> Result<String, Error> {
        let key = self.leaf_key(entry)?;
        self.leaves
            .get(&key)
            .cloned()
            .ok_or(Error::MissingEnumName(key))
    }

    // ===== key computation =====

    fn typedef_module<'a>(
        &self,
        entry: Entry<'a>,
        typ: &'a YangType,
    ) -> &'a str {
        if self.opts.use_defining_module_for_typedef_enum_names {
            typ.module
                .as_deref()
                .unwrap_or_else(|| entry.defining_module())
        } else {
            entry.defining_module()
        }
    }

    fn typedef_key(
        &self,
        entry: Entry<'_>,
        typ: &YangType,
        simple_union: bool,
    ) -> String {
        let module = self.typedef_module(entry, typ);
        let mut key = format!("{}/{}", module, typ.name);
        if simple_union {
            key.push_str("_Enum");
        }
        key
    }

    fn leaf_key(&self, entry: Entry<'_>) -> Result<String, Error> {
        if self.opts.skip_enum_dedup {
            // Every instantiation stays distinct, but name collisions are
            // still resolved through the proposed name.
            return Ok(format!(
                "{}:{}",
                entry.path(),
                self.leaf_proposed_name(entry)
            ));
        }
        let node = entry
            .node()
            .ok_or_else(|| Error::MissingAstNode(entry.path()))?;
        let segments = node.identity_path_segments();
        let compress = self.opts.compress_behaviour.compress_enabled();
        let mut key = String::new();
        for (index, segment) in segments.iter().enumerate() {
            // Under compression the config/state wrappers do not
            // distinguish instantiations of the same enumeration.
            if compress
                && index + 1 != segments.len()
                && matches!(*segment, "config" | "state")
            {
                continue;
            }
            key.push('/');
            key.push_str(segment);
        }
        Ok(key)
    }

    // ===== proposed names =====

    fn separator(&self) -> &'static str {
        if self.opts.enumerations_use_underscores {
            "_"
        } else {
            ""
        }
    }

    fn trim_org_prefix<'a>(&self, module: &'a str) -> &'a str {
        for prefix in &self.opts.enum_org_prefixes_to_trim {
            if let Some(rest) = module.strip_prefix(prefix.as_str())
                && let Some(rest) = rest.strip_prefix('-')
            {
                return rest;
            }
        }
        module
    }

    fn identity_proposed_name(&self, identity: &Identity) -> String {
        format!(
            "{}{}{}",
            camel_case(self.trim_org_prefix(&identity.module)),
            self.separator(),
            camel_case(&identity.name)
        )
    }

    fn typedef_proposed_name(
        &self,
        entry: Entry<'_>,
        typ: &YangType,
        simple_union: bool,
    ) -> String {
        let module = self.typedef_module(entry, typ);
        let mut name = format!(
            "{}{}{}",
            camel_case(self.trim_org_prefix(module)),
            self.separator(),
            camel_case(&typ.name)
        );
        if simple_union && self.opts.append_enum_suffix_for_simple_union_enums
        {
            name.push_str("_Enum");
        }
        name
    }

    fn leaf_proposed_name(&self, entry: Entry<'_>) -> String {
        let separator = self.separator();
        if self.opts.compress_behaviour.compress_enabled() {
            // The direct parent is the config/state wrapper, so the
            // grandparent carries the context name.
            let context =
                entry.parent().and_then(|p| p.parent()).or(entry.parent());
            let mut parts = Vec::new();
            if !self.opts.shorten_enum_leaf_names {
                parts.push(camel_case(
                    self.trim_org_prefix(entry.defining_module()),
                ));
            }
            if let Some(context) = context {
                parts.push(camel_case(context.name()));
            }
            parts.push(camel_case(entry.name()));
            parts.join(separator)
        } else {
            let mut elements: Vec<_> = entry
                .ancestors()
                .filter(|e| !e.is_choice() && !e.is_case())
                .collect();
            elements.reverse();
            let mut parts = Vec::new();
            for (index, element) in elements.iter().enumerate() {
                // The first element is the module-level root.
                if index == 0 {
                    if self.opts.shorten_enum_leaf_names {
                        continue;
                    }
                    parts.push(camel_case(
                        self.trim_org_prefix(element.name()),
                    ));
                } else {
                    parts.push(camel_case(element.name()));
                }
            }
            parts.push(camel_case(entry.name()));
            parts.join(separator)
        }
    }
}

fn identity_key(identity: &Identity) -> String {
    format!("{}/{}", identity.module, identity.name)
}

// Pass-1 context retained per enumeration key, used to materialize the
// enumeration definition once pass 2 fixes its name.
#[derive(Debug)]
struct EnumContext {
    kind: EnumeratedValueKind,
    type_name: String,
    values: Vec<EnumeratedValue>,
    entry: EntryId,
}

#[derive(Debug, Default)]
struct EnumSetBuilder {
    identity_proposals: BTreeMap<String, BTreeSet<String>>,
    typedef_proposals: BTreeMap<String, BTreeSet<String>>,
    leaf_proposals: BTreeMap<String, BTreeSet<String>>,
    contexts: BTreeMap<String, EnumContext>,
}

// ===== impl EnumSetBuilder =====

impl EnumSetBuilder {
    fn propose(
        &mut self,
        set: &EnumSet,
        entry: Entry<'_>,
        typ: &YangType,
        in_union: bool,
    ) -> Result<(), Error> {
        match typ.kind {
            TypeKind::Identityref => self.propose_identity(set, entry, typ),
            TypeKind::Enumeration if typ.is_typedef() => {
                self.propose_typedef(set, entry, typ);
                Ok(())
            }
            TypeKind::Enumeration => {
                self.propose_leaf(set, entry, typ, in_union)
            }
            TypeKind::Union => self.propose_union(set, entry, typ),
            _ => Ok(()),
        }
    }

    fn propose_identity(
        &mut self,
        set: &EnumSet,
        entry: Entry<'_>,
        typ: &YangType,
    ) -> Result<(), Error> {
        let identity = typ
            .identity
            .map(|id| entry.schema().identity(id))
            .ok_or_else(|| Error::MissingIdentityBase(entry.path()))?;
        let key = identity_key(identity);
        let proposed = set.identity_proposed_name(identity);
        let values = identity
            .values
            .iter()
            .enumerate()
            .map(|(index, value)| EnumeratedValue {
                name: value.name.clone(),
                value: index as i64,
                defining_module: Some(value.module.clone()),
            })
            .collect();
        self.record(
            Category::Identity,
            key,
            proposed,
            EnumContext {
                kind: EnumeratedValueKind::Identity,
                type_name: identity.name.clone(),
                values,
                entry: entry.id(),
            },
        );
        Ok(())
    }

    fn propose_typedef(
        &mut self,
        set: &EnumSet,
        entry: Entry<'_>,
        typ: &YangType,
    ) {
        let key = set.typedef_key(entry, typ, false);
        let proposed = set.typedef_proposed_name(entry, typ, false);
        self.record(
            Category::Typedef,
            key,
            proposed,
            EnumContext {
                kind: EnumeratedValueKind::Derived,
                type_name: typ.name.clone(),
                values: enum_values(typ),
                entry: entry.id(),
            },
        );
    }

    fn propose_leaf(
        &mut self,
        set: &EnumSet,
        entry: Entry<'_>,
        typ: &YangType,
        in_union: bool,
    ) -> Result<(), Error> {
        let key = set.leaf_key(entry)?;
        let proposed = set.leaf_proposed_name(entry);
        let kind = if in_union {
            EnumeratedValueKind::Union
        } else {
            EnumeratedValueKind::Simple
        };
        self.record(
            Category::Leaf,
            key,
            proposed,
            EnumContext {
                kind,
                type_name: typ.name.clone(),
                values: enum_values(typ),
                entry: entry.id(),
            },
        );
        Ok(())
    }

    fn propose_union(
        &mut self,
        set: &EnumSet,
        entry: Entry<'_>,
        typ: &YangType,
    ) -> Result<(), Error> {
        let flattened = typ.flattened_union_types();
        if flattened.is_empty() {
            return Err(Error::EmptyUnion(entry.path()));
        }

        let inline_enums: Vec<_> = flattened
            .iter()
            .filter(|t| t.kind == TypeKind::Enumeration && !t.is_typedef())
            .collect();
        if inline_enums.len() > 1 {
            return Err(Error::MultipleEnumsInUnion(entry.path()));
        }

        if typ.is_typedef() {
            // A named union wrapping one inline enumeration generates a
            // derived-union enumeration carrying the typedef's name.
            if let Some(inline) = inline_enums.first() {
                let key = set.typedef_key(entry, typ, true);
                let proposed = set.typedef_proposed_name(entry, typ, true);
                self.record(
                    Category::Typedef,
                    key,
                    proposed,
                    EnumContext {
                        kind: EnumeratedValueKind::DerivedUnion,
                        type_name: typ.name.clone(),
                        values: enum_values(inline),
                        entry: entry.id(),
                    },
                );
            }
            for subtype in &flattened {
                match subtype.kind {
                    TypeKind::Enumeration if subtype.is_typedef() => {
                        self.propose_typedef(set, entry, subtype);
                    }
                    TypeKind::Identityref => {
                        self.propose_identity(set, entry, subtype)?;
                    }
                    _ => (),
                }
            }
        } else {
            for subtype in &flattened {
                match subtype.kind {
                    TypeKind::Enumeration | TypeKind::Identityref => {
                        self.propose(set, entry, subtype, true)?;
                    }
                    _ => (),
                }
            }
        }
        Ok(())
    }

    fn record(
        &mut self,
        category: Category,
        key: String,
        proposed: String,
        context: EnumContext,
    ) {
        let proposals = match category {
            Category::Identity => &mut self.identity_proposals,
            Category::Typedef => &mut self.typedef_proposals,
            Category::Leaf => &mut self.leaf_proposals,
        };
        proposals.entry(proposed).or_default().insert(key.clone());
        self.contexts.entry(key).or_insert(context);
    }
}

#[derive(Clone, Copy, Debug)]
enum Category {
    Identity,
    Typedef,
    Leaf,
}

// ===== global functions =====

/// Builds the enumeration set from the sorted enumeration candidates.
///
/// Pass 1 computes a key and a proposed name for every enumeration source;
/// pass 2 walks proposed names lexicographically and fixes final names
/// against a global registry. Identity and typedef enumeration names are
/// authoritative and collide fatally; inline leaf enumerations are
/// uniquified by suffixing.
pub fn find_enum_set(
    schema: &ParsedSchema,
    entries: &BTreeMap<String, EntryId>,
    opts: &IrOptions,
) -> Result<(EnumSet, BTreeMap<String, EnumeratedType>), Errors> {
    let mut errors = Errors::new();
    let mut set = EnumSet::new(opts.clone());
    let mut builder = EnumSetBuilder::default();

    // Pass 1: propose a name for every enumeration source.
    for id in entries.values() {
        let entry = schema.entry(*id);
        let Some(typ) = entry.typ() else {
            errors.push(Error::MissingContextEntry(entry.path()));
            continue;
        };
        if let Err(error) = builder.propose(&set, entry, typ, false) {
            errors.push(error);
        }
    }

    // Pass 2: resolve collisions deterministically.
    let mut registry = DefinedNames::new();
    let mut definitions = BTreeMap::new();

    for (proposed, keys) in &builder.identity_proposals {
        let Some(key) = keys.first() else { continue };
        if keys.len() > 1 || registry.contains(proposed) {
            errors.push(Error::IdentityNameConflict(proposed.clone()));
            continue;
        }
        registry.insert(proposed);
        set.identities.insert(key.clone(), proposed.clone());
        add_definition(schema, &builder, &mut definitions, key, proposed);
    }

    for (proposed, keys) in &builder.typedef_proposals {
        let Some(key) = keys.first() else { continue };
        if keys.len() > 1 || registry.contains(proposed) {
            errors.push(Error::TypedefNameConflict(
                key.clone(),
                proposed.clone(),
            ));
            continue;
        }
        registry.insert(proposed);
        set.typedefs.insert(key.clone(), proposed.clone());
        add_definition(schema, &builder, &mut definitions, key, proposed);
    }

    for (proposed, keys) in &builder.leaf_proposals {
        for key in keys {
            // The same source reached through a second proposed name keeps
            // the name it was first assigned.
            if set.leaves.contains_key(key) {
                continue;
            }
            let name = registry.unique(proposed, "_");
            set.leaves.insert(key.clone(), name.clone());
            add_definition(schema, &builder, &mut definitions, key, &name);
        }
    }

    errors.into_result((set, definitions))
}

fn add_definition(
    schema: &ParsedSchema,
    builder: &EnumSetBuilder,
    definitions: &mut BTreeMap<String, EnumeratedType>,
    key: &str,
    name: &str,
) {
    let context = &builder.contexts[key];
    let value_prefix = schema
        .entry(context.entry)
        .annotation(VALUE_PREFIX_ANNOTATION)
        .and_then(|value| value.as_array())
        .map(|segments| {
            segments
                .iter()
                .filter_map(|s| s.as_str())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();
    definitions.insert(
        name.to_owned(),
        EnumeratedType {
            name: name.to_owned(),
            kind: context.kind,
            type_name: context.type_name.clone(),
            value_prefix,
            values: context.values.clone(),
        },
    );
}

fn enum_values(typ: &YangType) -> Vec<EnumeratedValue> {
    typ.enum_values
        .iter()
        .map(|value| EnumeratedValue {
            name: value.name.clone(),
            value: value.value,
            defining_module: None,
        })
        .collect()
}
