//! Block schema -> decode spec compiler.
//!
//! Total: never fails. Schema irregularities (an attribute and a block type
//! sharing a name, an invalid nesting mode) are skipped here and left to
//! schema validation.
//!
//! If the behaviour here changes, `Block::implied_type` must change to match:
//! the compiled spec has to decode into a value of the implied type.

use crate::schema::{Block, NestingMode};
use crate::spec::decode::{
    AttrSpec, BlockListSpec, BlockMapSpec, BlockSetSpec, BlockSpec, DecodeSpec, LiteralSpec,
    ObjectSpec,
};
use crate::value::Value;
use std::collections::BTreeMap;

/// Compile an optional block; an absent block yields an empty object spec.
pub fn compile(block: Option<&Block>) -> DecodeSpec {
    block
        .map(Block::decoder_spec)
        .unwrap_or_else(DecodeSpec::empty_object)
}

impl Block {
    pub fn decoder_spec(&self) -> DecodeSpec {
        let mut fields: BTreeMap<String, DecodeSpec> = BTreeMap::new();

        for (name, attr) in &self.attributes {
            // Computed attributes are engine-supplied: never read from input,
            // so `required` does not apply.
            let spec = if attr.computed {
                DecodeSpec::Literal(LiteralSpec {
                    value: Value::unknown(attr.ty.clone()),
                })
            } else {
                DecodeSpec::Attr(AttrSpec {
                    name: name.clone(),
                    ty: attr.ty.clone(),
                    required: attr.required,
                })
            };
            fields.insert(name.clone(), spec);
        }

        for (name, nested) in &self.block_types {
            if fields.contains_key(name) {
                tracing::debug!(
                    name = %name,
                    "block type collides with an attribute of the same name; skipping"
                );
                continue;
            }

            let child = Box::new(nested.block.decoder_spec());

            let spec = match nested.nesting {
                NestingMode::Single => DecodeSpec::Block(BlockSpec {
                    type_name: name.clone(),
                    nested: child,
                    required: nested.min_items == 1 && nested.max_items >= 1,
                }),
                NestingMode::List => DecodeSpec::BlockList(BlockListSpec {
                    type_name: name.clone(),
                    nested: child,
                    min_items: nested.min_items,
                    max_items: nested.max_items,
                }),
                NestingMode::Set => DecodeSpec::BlockSet(BlockSetSpec {
                    type_name: name.clone(),
                    nested: child,
                    min_items: nested.min_items,
                    max_items: nested.max_items,
                }),
                NestingMode::Map => DecodeSpec::BlockMap(BlockMapSpec {
                    type_name: name.clone(),
                    nested: child,
                }),
                NestingMode::Invalid => {
                    tracing::debug!(name = %name, "block type has invalid nesting mode; skipping");
                    continue;
                }
            };
            fields.insert(name.clone(), spec);
        }

        DecodeSpec::Object(ObjectSpec { fields })
    }
}
