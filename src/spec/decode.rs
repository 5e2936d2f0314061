//! Decode specification tree.
//!
//! A spec tells a decoding engine how to pull a typed value out of a parsed
//! configuration body. Specs are derived from a schema and never mutated; two
//! compilations of the same schema compare equal.
//!
//! JSON shape (tagged by `kind`):
//! { "kind": "object", "fields": {
//!     "name": { "kind": "attr", "name": "name", "type": "string", "required": true },
//!     "id":   { "kind": "literal", "value": { "unknown": "number" } },
//!     "rule": { "kind": "block_list", "type_name": "rule", "min_items": 0, "max_items": 0,
//!               "nested": { "kind": "object", "fields": { ... } } }
//! } }

use crate::types::Type;
use crate::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeSpec {
    Object(ObjectSpec),
    Attr(AttrSpec),
    Literal(LiteralSpec),
    Block(BlockSpec),
    BlockList(BlockListSpec),
    BlockSet(BlockSetSpec),
    BlockMap(BlockMapSpec),
}

/// Composite spec keyed by field name. Ordered, so output never depends on
/// the order block types were visited in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectSpec {
    pub fields: BTreeMap<String, DecodeSpec>,
}

/// Read attribute `name` from the body as a value of type `ty`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttrSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    pub required: bool,
}

/// A fixed value, independent of the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralSpec {
    pub value: Value,
}

/// At most one block of `type_name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSpec {
    pub type_name: String,
    pub nested: Box<DecodeSpec>,
    pub required: bool,
}

/// Ordered repetition of `type_name` blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockListSpec {
    pub type_name: String,
    pub nested: Box<DecodeSpec>,
    pub min_items: u64,
    pub max_items: u64,
}

/// Unordered repetition of `type_name` blocks; equal blocks collapse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSetSpec {
    pub type_name: String,
    pub nested: Box<DecodeSpec>,
    pub min_items: u64,
    pub max_items: u64,
}

/// `type_name` blocks keyed by their single label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockMapSpec {
    pub type_name: String,
    pub nested: Box<DecodeSpec>,
}

impl DecodeSpec {
    pub fn empty_object() -> Self {
        DecodeSpec::Object(ObjectSpec::default())
    }

    pub fn as_object(&self) -> Option<&ObjectSpec> {
        match self {
            DecodeSpec::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Field of an object spec by name.
    pub fn field(&self, name: &str) -> Option<&DecodeSpec> {
        self.as_object().and_then(|obj| obj.fields.get(name))
    }

    /// Child spec of a block node.
    pub fn nested(&self) -> Option<&DecodeSpec> {
        match self {
            DecodeSpec::Block(s) => Some(s.nested.as_ref()),
            DecodeSpec::BlockList(s) => Some(s.nested.as_ref()),
            DecodeSpec::BlockSet(s) => Some(s.nested.as_ref()),
            DecodeSpec::BlockMap(s) => Some(s.nested.as_ref()),
            DecodeSpec::Object(_) | DecodeSpec::Attr(_) | DecodeSpec::Literal(_) => None,
        }
    }

    /// Type of the value this spec decodes to, whatever the document.
    pub fn implied_type(&self) -> Type {
        match self {
            DecodeSpec::Object(obj) => Type::Object(
                obj.fields
                    .iter()
                    .map(|(name, spec)| (name.clone(), spec.implied_type()))
                    .collect(),
            ),
            DecodeSpec::Attr(s) => s.ty.clone(),
            DecodeSpec::Literal(s) => s.value.ty(),
            DecodeSpec::Block(s) => s.nested.implied_type(),
            DecodeSpec::BlockList(s) => Type::list(s.nested.implied_type()),
            DecodeSpec::BlockSet(s) => Type::set(s.nested.implied_type()),
            DecodeSpec::BlockMap(s) => Type::map(s.nested.implied_type()),
        }
    }
}
