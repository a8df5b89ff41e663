//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![allow(dead_code)]

use yangir_schema::{
    ConfigValue, EntryId, ModuleInfo, ParsedSchema, TypeKind, YangType,
};

pub fn add_module(schema: &mut ParsedSchema, name: &str) -> EntryId {
    schema.add_module(ModuleInfo::new(
        name.to_owned(),
        Some("2024-01-15".to_owned()),
        Some("Example Organization".to_owned()),
    ))
}

/// `/base-module/container` holding sibling `config` and `state`
/// containers, each with an inline `enumeration-leaf`.
pub fn config_state_enum_schema() -> ParsedSchema {
    config_state_enum_schema_for_module("base-module")
}

pub fn config_state_enum_schema_for_module(name: &str) -> ParsedSchema {
    let mut schema = ParsedSchema::new();
    let module = add_module(&mut schema, name);
    let container = schema.add_container(module, "container");
    let config = schema.add_container(container, "config");
    let state = schema.add_container(container, "state");
    schema.set_config(state, ConfigValue::False);
    schema.add_leaf(
        config,
        "enumeration-leaf",
        YangType::enumeration(["A", "B"]),
    );
    schema.add_leaf(
        state,
        "enumeration-leaf",
        YangType::enumeration(["A", "B"]),
    );
    schema
}

/// `/base-module/interfaces/interface` list keyed on leafref key leaves,
/// in the OpenConfig surrounding-container style. A direct leafref leaf is
/// created for each key token.
pub fn interface_list_schema(key_statement: &str) -> ParsedSchema {
    let mut schema = ParsedSchema::new();
    let module = add_module(&mut schema, "base-module");
    let interfaces = schema.add_container(module, "interfaces");
    let interface = schema.add_list(interfaces, "interface", key_statement);
    for key in key_statement.split_whitespace() {
        let target = format!("../config/{key}");
        schema.add_leaf(interface, key, YangType::leafref(&target));
    }
    let config = schema.add_container(interface, "config");
    schema.add_leaf(config, "name", YangType::base(TypeKind::String));
    schema.add_leaf(config, "type", YangType::base(TypeKind::String));
    let state = schema.add_container(interface, "state");
    schema.set_config(state, ConfigValue::False);
    schema.add_leaf(state, "name", YangType::base(TypeKind::String));
    schema.add_leaf(state, "type", YangType::base(TypeKind::String));
    schema
}
