//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod naming;
pub mod path;
pub mod yang;
