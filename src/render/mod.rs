//! Human-readable renderings of compiled specs.

pub mod tree;

pub use tree::render_tree;
