//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod common;

use yangir::error::Error;
use yangir::schematree::{SchemaTree, fix_path};
use yangir_schema::{ParsedSchema, TypeKind, YangType};

#[test]
fn test_fix_path_absolute_with_predicate() {
    let path =
        "/interfaces/interface[name=current()/../config/name]/config/admin-status";
    assert_eq!(
        fix_path(path, None).unwrap(),
        vec!["interfaces", "interface", "config", "admin-status"]
    );
}

#[test]
fn test_fix_path_strips_namespaces() {
    assert_eq!(
        fix_path("/oc-if:interfaces/oc-if:interface/config/mtu", None)
            .unwrap(),
        vec!["interfaces", "interface", "config", "mtu"]
    );
}

#[test]
fn test_fix_path_invalid_namespace() {
    let error = fix_path("/a:b:c/leaf", None).unwrap_err();
    assert!(error.is_invalid_namespace());
}

#[test]
fn test_fix_path_relative() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "zoo-module");
    let zoo = schema.add_container(module, "zoo");
    let row = schema.add_container(zoo, "row");
    let cage = schema.add_leaf(row, "cage", YangType::base(TypeKind::String));

    let caller = schema.entry(cage);
    assert_eq!(
        fix_path("../../aardvark/anteater", Some(caller)).unwrap(),
        vec!["zoo", "aardvark", "anteater"]
    );
}

#[test]
fn test_fix_path_above_root() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let parent = schema.add_container(module, "parent");
    let son = schema.add_leaf(parent, "son", YangType::base(TypeKind::String));

    let caller = schema.entry(son);
    let error = fix_path("../../../foo", Some(caller)).unwrap_err();
    assert!(error.is_path_above_root());
}

#[test]
fn test_fix_path_relative_without_caller() {
    let error = fix_path("../config/name", None).unwrap_err();
    assert!(error.is_missing_context_entry());
}

#[test]
fn test_build_and_lookup() {
    let schema = common::interface_list_schema("name");
    let tree = SchemaTree::build(&schema).unwrap();

    let id = tree
        .lookup(&["interfaces", "interface", "config", "name"])
        .unwrap();
    assert_eq!(
        schema.entry(id).path(),
        "/base-module/interfaces/interface/config/name"
    );

    // Directories are traversed, not stored.
    assert!(tree.lookup(&["interfaces", "interface", "config"]).is_none());
    assert!(tree.lookup(&["interfaces"]).is_none());
}

#[test]
fn test_duplicate_path_is_fatal() {
    let mut schema = ParsedSchema::new();
    let m1 = common::add_module(&mut schema, "module-one");
    let m2 = common::add_module(&mut schema, "module-two");
    schema.add_leaf(m1, "clash", YangType::base(TypeKind::String));
    schema.add_leaf(m2, "clash", YangType::base(TypeKind::String));

    let error = SchemaTree::build(&schema).unwrap_err();
    assert!(error.is_duplicate_schema_path());
}

#[test]
fn test_resolve_leafref() {
    let schema = common::interface_list_schema("name");
    let tree = SchemaTree::build(&schema).unwrap();

    let list = schema
        .roots()
        .next()
        .unwrap()
        .child("interfaces")
        .unwrap()
        .child("interface")
        .unwrap();
    let name_leaf = list.child("name").unwrap();

    let target = tree.resolve_leafref("../config/name", Some(name_leaf)).unwrap();
    let target = schema.entry(target);
    assert_eq!(target.path(), "/base-module/interfaces/interface/config/name");

    // Idempotence: resolving the target's own after-module path yields the
    // same entry.
    let again = tree
        .resolve_leafref("/interfaces/interface/config/name", Some(target))
        .unwrap();
    assert_eq!(again, target.id());
}

#[test]
fn test_unresolved_leafref() {
    let schema = common::interface_list_schema("name");
    let tree = SchemaTree::build(&schema).unwrap();
    let error = tree.resolve_leafref("/nowhere/to-be/found", None).unwrap_err();
    assert!(error.is_unresolved_leafref());
    let rendered = format!("{error}");
    assert!(rendered.contains("/nowhere/to-be/found"));
}

#[test]
fn test_error_variants_render_path() {
    let error = Error::UnknownListKey(
        "/base-module/interfaces/interface".to_owned(),
        "missing".to_owned(),
    );
    let rendered = format!("{error}");
    assert!(rendered.contains("/base-module/interfaces/interface"));
    assert!(rendered.contains("missing"));
}

#[test]
fn test_error_categories() {
    use yangir::error::ErrorCategory;

    let cases = [
        (
            Error::DuplicateSchemaPath("/a".to_owned()),
            ErrorCategory::SchemaViolation,
        ),
        (
            Error::UnresolvedLeafref("/a".to_owned(), "/b".to_owned()),
            ErrorCategory::ResolutionFailure,
        ),
        (
            Error::UnsupportedType("/a".to_owned(), "bits".to_owned()),
            ErrorCategory::TypeMappingUnsupported,
        ),
        (
            Error::MissingEnumName("key".to_owned()),
            ErrorCategory::InternalInvariant,
        ),
    ];
    for (error, category) in cases {
        assert_eq!(error.category(), category);
    }
}
