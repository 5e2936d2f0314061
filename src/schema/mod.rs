//! Schema layer: the declarative description of a configuration block.
//!
//! It owns:
//! - Block / Attribute / NestedBlock (JSON schema shape + builders)
//! - the implied-type computation
//! - loading schema files from disk

pub mod block;
pub mod implied_type;
pub mod load;

pub use block::{Attribute, Block, NestedBlock, NestingMode};
pub use implied_type::implied_type;
pub use load::load_schema_file;
