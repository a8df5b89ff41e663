//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use derive_new::new;
use serde::{Deserialize, Serialize};

/// Index of an identity within the schema's identity table.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub struct IdentityId(pub(crate) usize);

/// Source module record, extracted into the IR's model data.
#[derive(Clone, Debug, Eq, new, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub struct ModuleInfo {
    pub name: String,
    pub revision: Option<String>,
    pub organization: Option<String>,
}

/// An identity statement together with the transitive set of identities
/// derived from it, in definition order.
#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Identity {
    pub name: String,
    // Module containing the identity definition.
    pub module: String,
    pub values: Vec<IdentityValue>,
}

#[derive(Clone, Debug, Eq, new, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub struct IdentityValue {
    pub name: String,
    pub module: String,
}
