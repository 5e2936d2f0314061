//! Compile block schemas into decode specifications.
//!
//! A [`schema::Block`] describes the attributes and nested block types a
//! configuration block may contain. [`spec::compile`] turns it into a
//! [`spec::DecodeSpec`] that a decoding engine runs against a parsed body.
//! The decoded value always has the type returned by
//! [`schema::Block::implied_type`].

pub mod render;
pub mod schema;
pub mod spec;
pub mod types;
pub mod value;

pub type Result<T> = anyhow::Result<T>;
