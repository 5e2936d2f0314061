//! Type implied by a block schema, independent of any document.
//!
//! Must stay in lockstep with `spec::compile`: decoding any conformant document
//! with the compiled spec yields a value of exactly this type. Malformed pieces
//! (name collisions, invalid nesting) are skipped the same way the compiler
//! skips them.

use crate::schema::{Block, NestingMode};
use crate::types::Type;
use std::collections::BTreeMap;

/// Implied type of an optional block; an absent block implies an empty object.
pub fn implied_type(block: Option<&Block>) -> Type {
    block.map(Block::implied_type).unwrap_or_else(Type::empty_object)
}

impl Block {
    pub fn implied_type(&self) -> Type {
        let mut attrs: BTreeMap<String, Type> = BTreeMap::new();

        for (name, attr) in &self.attributes {
            attrs.insert(name.clone(), attr.ty.clone());
        }

        for (name, nested) in &self.block_types {
            if attrs.contains_key(name) {
                continue;
            }

            let child = nested.block.implied_type();
            let ty = match nested.nesting {
                NestingMode::Single => child,
                NestingMode::List => Type::list(child),
                NestingMode::Set => Type::set(child),
                NestingMode::Map => Type::map(child),
                NestingMode::Invalid => continue,
            };
            attrs.insert(name.clone(), ty);
        }

        Type::Object(attrs)
    }
}
