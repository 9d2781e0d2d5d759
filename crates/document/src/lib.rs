//! # Cardledger Document
//!
//! A hierarchical, indentation-structured text builder. Documents built in
//! isolation can be spliced into a parent at any depth with
//! [`IndentedDocument::append`], and their relative nesting is preserved.

pub mod error;
pub mod indented;
pub mod section;

pub use error::DocumentError;
pub use indented::{Block, DEFAULT_INDENT_WIDTH, IndentedDocument};
