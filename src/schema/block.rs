//! Block schema data model.
//!
//! JSON shape:
//! {
//!   "attributes": {
//!     "name": { "type": "string", "required": true },
//!     "id":   { "type": "number", "computed": true }
//!   },
//!   "block_types": {
//!     "rule": {
//!       "nesting_mode": "list",     // single | list | set | map
//!       "min_items": 0,
//!       "max_items": 0,             // 0 = unbounded
//!       "block": { "attributes": { "enabled": { "type": "bool", "optional": true } } }
//!     }
//!   }
//! }
//!
//! Schemas are strictly owned trees: a block owns its nested block schemas.

use crate::types::Type;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One level of configuration nesting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Block {
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,

    #[serde(default)]
    pub block_types: BTreeMap<String, NestedBlock>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub ty: Type,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Must be present in input (unless computed).
    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub optional: bool,

    /// Supplied by the system, never read from input.
    #[serde(default)]
    pub computed: bool,

    #[serde(default)]
    pub sensitive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NestedBlock {
    #[serde(default)]
    pub block: Block,

    #[serde(rename = "nesting_mode", default)]
    pub nesting: NestingMode,

    #[serde(default)]
    pub min_items: u64,

    /// Upper repetition bound; 0 means unbounded.
    #[serde(default)]
    pub max_items: u64,
}

/// Multiplicity of a nested block type.
///
/// `Invalid` stands for any value outside the known set; such block types are
/// skipped when compiling and are expected to be rejected by schema validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NestingMode {
    Single,
    List,
    Set,
    Map,
    #[default]
    #[serde(other)]
    Invalid,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }

    pub fn with_block_type(mut self, name: impl Into<String>, nested: NestedBlock) -> Self {
        self.block_types.insert(name.into(), nested);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.block_types.is_empty()
    }
}

impl Attribute {
    fn with_flags(ty: Type, required: bool, optional: bool, computed: bool) -> Self {
        Self {
            ty,
            description: String::new(),
            required,
            optional,
            computed,
            sensitive: false,
        }
    }

    pub fn required(ty: Type) -> Self {
        Self::with_flags(ty, true, false, false)
    }

    pub fn optional(ty: Type) -> Self {
        Self::with_flags(ty, false, true, false)
    }

    pub fn computed(ty: Type) -> Self {
        Self::with_flags(ty, false, false, true)
    }

    /// Optional in input but filled in by the system when absent.
    pub fn optional_computed(ty: Type) -> Self {
        Self::with_flags(ty, false, true, true)
    }
}

impl NestedBlock {
    pub fn new(nesting: NestingMode, block: Block) -> Self {
        Self {
            block,
            nesting,
            min_items: 0,
            max_items: 0,
        }
    }

    pub fn with_bounds(mut self, min_items: u64, max_items: u64) -> Self {
        self.min_items = min_items;
        self.max_items = max_items;
        self
    }
}
