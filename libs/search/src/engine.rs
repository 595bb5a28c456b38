//! Query engine: permission-projecting execution of compiled queries.
//!
//! The engine is the glue between the compiler and the collaborators:
//! it enforces list/read authorization, computes the allowed source
//! projection, resolves cross-entity subqueries through the registry,
//! and classifies index failures.

use crate::backend::{BackendError, Principal};
use crate::config::SearchConfig;
use crate::params::{ExtraQueryParams, SearchHit, SearchRequest, SearchResult, SourceFilter};
use crate::registry::{EntityHandle, Registry};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use warden_query::{compile, match_fields, Error, Literal, Query, Result, SubqueryResolver};

pub struct QueryEngine {
    registry: Registry,
    config: SearchConfig,
}

impl QueryEngine {
    pub fn new(registry: Registry) -> Self {
        Self::with_config(registry, SearchConfig::default())
    }

    pub fn with_config(registry: Registry, config: SearchConfig) -> Self {
        Self { registry, config }
    }

    /// Execute a query against a registered entity on behalf of a
    /// principal.
    ///
    /// Requires `list` on the entity's subject. An empty `source`
    /// forces identifier-only results and skips the `read` check;
    /// otherwise `read` is required and the projection is the
    /// intersection of the requested patterns with the entity's
    /// field-path set, with `_id` stripped.
    pub async fn execute(
        &self,
        principal: &dyn Principal,
        entity: &str,
        query: &Query,
        params: &ExtraQueryParams,
        cancel: &CancellationToken,
    ) -> Result<SearchResult> {
        let handle = self
            .registry
            .get(entity)
            .ok_or_else(|| Error::UnknownEntity(entity.to_string()))?;
        self.require(principal, &handle.subject, "list").await?;
        self.config.validate_limits(params)?;

        let source = if params.source.is_empty() {
            SourceFilter::None
        } else {
            self.require(principal, &handle.subject, "read").await?;
            SourceFilter::Fields(match_fields(
                handle.index.known_paths(),
                &params.source,
                true,
            ))
        };

        let request = SearchRequest {
            from: params.from,
            size: Some(params.size.unwrap_or(self.config.default_size)),
            sort: params.sort.clone(),
            source,
        };
        self.run(principal, handle, query, request, cancel).await
    }

    /// Query the reference `users` entity.
    pub async fn users(
        &self,
        principal: &dyn Principal,
        query: &Query,
        params: &ExtraQueryParams,
        cancel: &CancellationToken,
    ) -> Result<SearchResult> {
        self.execute(principal, "users", query, params, cancel).await
    }

    /// Query the reference `roles` entity.
    pub async fn roles(
        &self,
        principal: &dyn Principal,
        query: &Query,
        params: &ExtraQueryParams,
        cancel: &CancellationToken,
    ) -> Result<SearchResult> {
        self.execute(principal, "roles", query, params, cancel).await
    }

    /// Query the reference `permissions` entity.
    pub async fn permissions(
        &self,
        principal: &dyn Principal,
        query: &Query,
        params: &ExtraQueryParams,
        cancel: &CancellationToken,
    ) -> Result<SearchResult> {
        self.execute(principal, "permissions", query, params, cancel)
            .await
    }

    async fn require(
        &self,
        principal: &dyn Principal,
        subject: &str,
        action: &str,
    ) -> Result<()> {
        if principal.has_permission(subject, action).await {
            Ok(())
        } else {
            Err(Error::permission_denied(subject, action))
        }
    }

    /// Compile against the entity's path set, execute, time and shape.
    async fn run(
        &self,
        principal: &dyn Principal,
        handle: &EntityHandle,
        query: &Query,
        request: SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<SearchResult> {
        let resolver = RegistryResolver {
            engine: self,
            principal,
        };
        let body = compile(query, handle.index.known_paths(), &resolver, cancel).await?;
        tracing::debug!(subject = %handle.subject, "executing compiled query");

        let started = Instant::now();
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            response = handle.index.search(body, &request) => response,
        };
        let took_ms = started.elapsed().as_millis() as u64;

        let response = response.map_err(classify)?;
        Ok(SearchResult {
            took_ms,
            timed_out: response.timed_out,
            total: response.total,
            hits: response
                .hits
                .into_iter()
                .map(|hit| SearchHit {
                    id: hit.id,
                    fields: hit.source,
                })
                .collect(),
        })
    }
}

fn classify(error: BackendError) -> Error {
    if error.is_client_fault() {
        Error::BackendValidation(error.message)
    } else {
        tracing::warn!(status = error.status, message = %error.message, "index fault");
        Error::BackendFault {
            status: error.status,
            message: error.message,
        }
    }
}

/// Resolves subqueries by running them through the full
/// permission-checked path of the target entity, capped at one hit.
struct RegistryResolver<'e> {
    engine: &'e QueryEngine,
    principal: &'e dyn Principal,
}

impl SubqueryResolver for RegistryResolver<'_> {
    fn resolve<'a>(
        &'a self,
        entity: &'a Literal,
        inner: &'a Query,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<String>> {
        async move {
            let name = entity.as_text();
            let params = ExtraQueryParams {
                size: Some(1),
                ..Default::default()
            };
            let result = self
                .engine
                .execute(self.principal, &name, inner, &params, cancel)
                .await?;
            let hit = result
                .hits
                .into_iter()
                .next()
                .ok_or(Error::NoMatchingRecord(name))?;
            Ok(hit.id)
        }
        .boxed()
    }
}
