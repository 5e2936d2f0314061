//! Loading block schemas from JSON files and strings.

use crate::schema::Block;
use anyhow::Context;
use std::fs;
use std::str::FromStr;

/// Read a JSON schema file into a root block.
pub fn load_schema_file(path: &str) -> anyhow::Result<Block> {
    let text = fs::read_to_string(path).with_context(|| format!("read schema file {}", path))?;
    let block: Block = text
        .parse()
        .with_context(|| format!("parse schema file {}", path))?;

    tracing::debug!(
        path,
        attributes = block.attributes.len(),
        block_types = block.block_types.len(),
        "loaded schema"
    );
    Ok(block)
}

impl FromStr for Block {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
