//! Permission-projecting query execution for the warden directory.
//!
//! Sits on top of `warden-query`: takes a parsed query expression,
//! enforces list/read authorization for the acting principal, compiles
//! it against the target entity's field-path set, resolves cross-entity
//! subqueries through the entity registry, and executes the result
//! against the document index.

pub mod backend;
pub mod config;
pub mod engine;
pub mod params;
pub mod registry;

pub use backend::{BackendError, Principal, RawHit, RawSearchResponse, SearchIndex};
pub use config::SearchConfig;
pub use engine::QueryEngine;
pub use params::{
    ExtraQueryParams, SearchHit, SearchRequest, SearchResult, SortDirection, SortSpec,
    SourceFilter,
};
pub use registry::{EntityHandle, Registry, RegistryBuilder};
pub use warden_query::{Error, Result};
