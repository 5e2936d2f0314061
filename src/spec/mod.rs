//! Spec layer: decode specification tree + the compiler that builds it from a
//! block schema.
//!
//! This module is intentionally separate from the schema model. It owns:
//! - DecodeSpec and its node types
//! - compile (Block -> DecodeSpec)

pub mod compile;
pub mod decode;

pub use compile::compile;
pub use decode::{
    AttrSpec, BlockListSpec, BlockMapSpec, BlockSetSpec, BlockSpec, DecodeSpec, LiteralSpec,
    ObjectSpec,
};
