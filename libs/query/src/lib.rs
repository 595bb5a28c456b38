//! Query AST and search-request compiler for the warden directory.
//!
//! This crate is the pure half of the query core: it knows how to turn
//! a parsed boolean query expression into the JSON fragment grammar of
//! the document index, matching wildcard field patterns against an
//! entity's field-path set and coercing raw literals along the way.
//! Cross-entity subqueries are delegated to a [`SubqueryResolver`]
//! supplied by the embedding service.

pub mod ast;
pub mod coerce;
pub mod compile;
pub mod error;
pub mod fields;

pub use ast::{Literal, Query, RangeOp};
pub use coerce::coerce;
pub use compile::{compile, SubqueryResolver};
pub use error::{Error, Result};
pub use fields::match_fields;
