//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use yangir_schema::{Entry, EntryId, ParsedSchema, TypeKind};
use yangir_util::yang::{is_choice_or_case, is_config_state, only_child};

use crate::IrOptions;
use crate::error::{Error, Errors};
use crate::ir::{
    Directory, DirectoryKind, Field, ListKey, NodeKind, YangDetails,
};
use crate::langmap::LangMapper;
use crate::schematree::SchemaTree;

// Bound on leafref-to-leafref chains while resolving list keys.
const MAX_LEAFREF_DEPTH: usize = 16;

// A direct child surviving compression. `preferred` marks children owned
// by the preferred config/state side; losers of a twin collision move to
// the shadowed set.
#[derive(Clone, Copy, Debug)]
struct CollectedChild<'a> {
    entry: Entry<'a>,
    preferred: bool,
}

#[derive(Debug, Default)]
struct ChildSet<'a> {
    fields: BTreeMap<String, CollectedChild<'a>>,
    shadowed: BTreeMap<String, Entry<'a>>,
}

// ===== impl ChildSet =====

impl<'a> ChildSet<'a> {
    fn insert(
        &mut self,
        child: Entry<'a>,
        preferred: bool,
        errors: &mut Errors,
    ) {
        let name = child.name().to_owned();
        let Some(existing) = self.fields.get(&name).copied() else {
            self.fields.insert(name, CollectedChild {
                entry: child,
                preferred,
            });
            return;
        };

        // A config/state twin pair. Leaf twins must agree on their type
        // for the elided side to remain addressable.
        if existing.entry.is_leaf()
            && child.is_leaf()
            && existing.entry.typ().map(|t| t.kind)
                != child.typ().map(|t| t.kind)
        {
            errors.push(Error::ShadowTypeMismatch(child.path()));
            return;
        }

        match (existing.preferred, preferred) {
            (true, false) => {
                self.shadowed.insert(name, child);
            }
            (false, true) => {
                self.shadowed.insert(name.clone(), existing.entry);
                self.fields.insert(name, CollectedChild {
                    entry: child,
                    preferred,
                });
            }
            _ => errors.push(Error::DuplicateField(child.path())),
        }
    }
}

// ===== global functions =====

/// Builds one directory per sorted candidate. Every failure is collected;
/// the caller receives either the full directory map or every error found.
pub fn build_directories(
    schema: &ParsedSchema,
    candidates: &BTreeMap<String, EntryId>,
    tree: &SchemaTree,
    mapper: &mut dyn LangMapper,
    opts: &IrOptions,
) -> Result<BTreeMap<String, Directory>, Errors> {
    let mut errors = Errors::new();
    let mut directories = BTreeMap::new();

    for (path, id) in candidates {
        let entry = schema.entry(*id);
        match build_directory(entry, tree, mapper, opts, &mut errors) {
            Some(directory) => {
                directories.insert(path.clone(), directory);
            }
            None => continue,
        }
    }

    errors.into_result(directories)
}

fn build_directory(
    entry: Entry<'_>,
    tree: &SchemaTree,
    mapper: &mut dyn LangMapper,
    opts: &IrOptions,
    errors: &mut Errors,
) -> Option<Directory> {
    let behaviour = opts.compress_behaviour;
    let name = match mapper.directory_name(entry, behaviour) {
        Ok(name) => name,
        Err(error) => {
            errors.push(error);
            return None;
        }
    };
    let package = match mapper.package_name(entry, behaviour) {
        Ok(package) => package,
        Err(error) => {
            errors.push(error);
            String::new()
        }
    };

    // Direct children after compression. A list's direct key leaves of
    // leafref type are dropped when compressing: the hoisted config/state
    // targets represent them.
    let key_tokens: Vec<&str> = if behaviour.compress_enabled()
        && entry.is_list()
    {
        entry
            .key()
            .map(|statement| statement.split_whitespace().collect())
            .unwrap_or_default()
    } else {
        Vec::new()
    };
    let mut children = ChildSet::default();
    for child in entry.children() {
        if child.is_leaf()
            && key_tokens.contains(&child.name())
            && child.typ().is_some_and(|t| t.kind == TypeKind::Leafref)
        {
            continue;
        }
        collect_child(child, true, opts, &mut children, errors);
    }

    let mut fields = BTreeMap::new();
    for (child_name, child) in &children.fields {
        let mut field =
            build_field(entry, child.entry, tree, mapper, opts, errors);
        if let Some(shadow) = children.shadowed.get(child_name) {
            let (paths, modules) = relative_paths(entry, *shadow);
            field.shadowed_mapped_paths = paths;
            field.shadowed_mapped_path_modules = modules;
        }
        fields.insert(child_name.clone(), field);
    }
    let mut shadowed_fields = BTreeMap::new();
    for (child_name, shadow) in &children.shadowed {
        let field =
            build_field(entry, *shadow, tree, mapper, opts, errors);
        shadowed_fields.insert(child_name.clone(), field);
    }

    // List key descriptors.
    let mut list_keys = BTreeMap::new();
    let mut list_key_order = Vec::new();
    if entry.is_list() {
        build_list_keys(
            entry,
            &children,
            tree,
            mapper,
            opts,
            &mut list_keys,
            &mut list_key_order,
            errors,
        );
    }

    let kind = if entry.is_fake_root() {
        DirectoryKind::FakeRoot
    } else if entry.is_list() {
        DirectoryKind::List
    } else {
        DirectoryKind::Container
    };

    Some(Directory {
        name,
        kind,
        path: entry
            .path_segments()
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
        fields,
        shadowed_fields,
        list_keys,
        list_key_order,
        is_fake_root: entry.is_fake_root(),
        belonging_module: entry.belonging_module().to_owned(),
        root_element_module: entry.root_module().to_owned(),
        defining_module: entry.defining_module().to_owned(),
        package,
        entry: entry.id(),
    })
}

fn collect_child<'a>(
    child: Entry<'a>,
    preferred: bool,
    opts: &IrOptions,
    out: &mut ChildSet<'a>,
    errors: &mut Errors,
) {
    let behaviour = opts.compress_behaviour;

    // Derived state is dropped before any other rule applies.
    if behaviour.state_excluded() && !child.config() {
        return;
    }

    // Choice and case wrappers are transparent.
    if is_choice_or_case(child) {
        for grandchild in child.children() {
            collect_child(grandchild, preferred, opts, out, errors);
        }
        return;
    }

    if behaviour.compress_enabled() {
        // Hoist the children of config/state wrappers into this directory.
        if is_config_state(child) {
            let side_preferred = (child.name() == "state")
                == behaviour.prefer_operational_state();
            for grandchild in child.children() {
                collect_child(grandchild, side_preferred, opts, out, errors);
            }
            return;
        }
        // Elide the surrounding container of a list.
        if let Some(list) = only_child(child)
            && list.is_list()
        {
            out.insert(list, preferred, errors);
            return;
        }
    }

    out.insert(child, preferred, errors);
}

fn build_field(
    directory: Entry<'_>,
    child: Entry<'_>,
    tree: &SchemaTree,
    mapper: &mut dyn LangMapper,
    opts: &IrOptions,
    errors: &mut Errors,
) -> Field {
    let node_kind = NodeKind::from_entry(child);
    let lang_type = match node_kind {
        NodeKind::Leaf | NodeKind::LeafList => {
            match mapper.leaf_type(child, opts) {
                Ok(mapped) => Some(mapped),
                Err(error) => {
                    errors.push(error);
                    None
                }
            }
        }
        _ => None,
    };

    let leafref_target_path = child
        .typ()
        .filter(|typ| typ.kind == TypeKind::Leafref)
        .and_then(|typ| typ.path.as_deref())
        .and_then(|path| tree.resolve_leafref(path, Some(child)).ok())
        .map(|target| child.schema().entry(target).path());

    let (mapped_paths, mapped_path_modules) =
        relative_paths(directory, child);

    Field {
        name: child.name().to_owned(),
        node_kind,
        lang_type,
        yang_details: YangDetails {
            name: child.name().to_owned(),
            defaults: child.defaults().to_vec(),
            description: child.description().map(str::to_owned),
            typ: child.typ().cloned(),
            belonging_module: child.belonging_module().to_owned(),
            root_element_module: child.root_module().to_owned(),
            defining_module: child.defining_module().to_owned(),
            path: child.path(),
            leafref_target_path,
            presence_statement: child.presence().map(str::to_owned),
        },
        mapped_paths,
        mapped_path_modules,
        shadowed_mapped_paths: Vec::new(),
        shadowed_mapped_path_modules: Vec::new(),
        entry: child.id(),
    }
}

// Relative data path from a directory to one of its fields, including
// elided config/state containers but not choice/case wrappers.
fn relative_paths(
    directory: Entry<'_>,
    child: Entry<'_>,
) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
    let mut segments = vec![child.name().to_owned()];
    let mut modules = vec![child.belonging_module().to_owned()];
    for ancestor in child.ancestors() {
        if ancestor == directory {
            break;
        }
        // Fields of the fake root keep their module-level parent.
        if directory.is_fake_root() && ancestor.is_root() {
            break;
        }
        if is_choice_or_case(ancestor) {
            continue;
        }
        segments.push(ancestor.name().to_owned());
        modules.push(ancestor.belonging_module().to_owned());
    }
    segments.reverse();
    modules.reverse();
    (vec![segments], vec![modules])
}

fn build_list_keys(
    list: Entry<'_>,
    children: &ChildSet<'_>,
    tree: &SchemaTree,
    mapper: &mut dyn LangMapper,
    opts: &IrOptions,
    list_keys: &mut BTreeMap<String, ListKey>,
    list_key_order: &mut Vec<String>,
    errors: &mut Errors,
) {
    // Tokenize on any whitespace run, newlines and carriage returns
    // included.
    let tokens: Vec<&str> = list
        .key()
        .map(|statement| statement.split_whitespace().collect())
        .unwrap_or_default();

    if tokens.is_empty() {
        if list.config() {
            errors.push(Error::MissingListKey(list.path()));
        }
        return;
    }

    for token in tokens {
        let key_leaf = list.child(token).or_else(|| {
            children.fields.get(token).map(|child| child.entry)
        });
        let Some(key_leaf) = key_leaf else {
            errors.push(Error::UnknownListKey(
                list.path(),
                token.to_owned(),
            ));
            continue;
        };

        let resolved = match resolve_key_leaf(key_leaf, tree) {
            Ok(resolved) => resolved,
            Err(error) => {
                errors.push(error);
                continue;
            }
        };

        match mapper.key_leaf_type(resolved, opts) {
            Ok(lang_type) => {
                list_keys.insert(token.to_owned(), ListKey {
                    name: token.to_owned(),
                    lang_type,
                    key_leaf: resolved.id(),
                });
                list_key_order.push(token.to_owned());
            }
            Err(error) => errors.push(error),
        }
    }
}

// Follows a key leaf's leafref chain to the typed target.
fn resolve_key_leaf<'a>(
    key_leaf: Entry<'a>,
    tree: &SchemaTree,
) -> Result<Entry<'a>, Error> {
    let mut entry = key_leaf;
    for _ in 0..MAX_LEAFREF_DEPTH {
        let Some(typ) = entry.typ() else {
            return Err(Error::MissingContextEntry(entry.path()));
        };
        if typ.kind != TypeKind::Leafref {
            return Ok(entry);
        }
        let path = typ.path.as_deref().ok_or_else(|| {
            Error::UnresolvedLeafref(entry.path(), String::new())
        })?;
        let target = tree.resolve_leafref(path, Some(entry))?;
        entry = entry.schema().entry(target);
    }
    Err(Error::UnresolvedLeafref(
        key_leaf.path(),
        key_leaf.path(),
    ))
}
