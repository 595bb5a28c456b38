//! AST to search-request compilation.
//!
//! The compiler walks the query tree and emits the bool-query fragment
//! grammar understood by the document index. Binary nodes evaluate
//! their children concurrently; subquery nodes suspend on the resolver
//! before their result can be substituted.

use crate::ast::{Literal, Query, RangeOp};
use crate::coerce::coerce;
use crate::fields::match_fields;
use crate::{Error, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::{json, Value as JsonValue};
use tokio_util::sync::CancellationToken;

/// Resolves a subquery node against another entity's index, yielding
/// the identifier of the single matching record.
pub trait SubqueryResolver: Send + Sync {
    fn resolve<'a>(
        &'a self,
        entity: &'a Literal,
        inner: &'a Query,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<String>>;
}

/// Compile a query expression into a search-request fragment.
///
/// `known_paths` is the entity's field-path set; literal field names
/// outside it fail with [`Error::UnknownField`] before any backend
/// call. The cancellation token is observed on every recursive entry
/// and handed to the resolver for in-flight subqueries.
pub async fn compile(
    node: &Query,
    known_paths: &[String],
    resolver: &dyn SubqueryResolver,
    cancel: &CancellationToken,
) -> Result<JsonValue> {
    compile_node(node, known_paths, resolver, cancel).await
}

fn compile_node<'a>(
    node: &'a Query,
    known_paths: &'a [String],
    resolver: &'a dyn SubqueryResolver,
    cancel: &'a CancellationToken,
) -> BoxFuture<'a, Result<JsonValue>> {
    async move {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        match node {
            Query::Or { left, right } => {
                let (left, right) = futures::try_join!(
                    compile_node(left, known_paths, resolver, cancel),
                    compile_node(right, known_paths, resolver, cancel),
                )?;
                Ok(json!({ "bool": { "should": [left, right] } }))
            }
            Query::And { left, right } => {
                let (left, right) = futures::try_join!(
                    compile_node(left, known_paths, resolver, cancel),
                    compile_node(right, known_paths, resolver, cancel),
                )?;
                Ok(json!({ "bool": { "filter": [left, right] } }))
            }
            Query::Not { inner } => {
                let negated = compile_node(inner, known_paths, resolver, cancel).await?;
                Ok(json!({ "bool": { "must_not": negated } }))
            }
            Query::Is {
                field,
                value,
                is_phrase,
            } => compile_is(field.as_ref(), value, *is_phrase, known_paths),
            Query::Range {
                field,
                operator,
                value,
            } => compile_range(field, *operator, value, known_paths),
            Query::Subquery {
                field,
                entity,
                inner,
            } => {
                // The round trip must finish before its result can be
                // substituted into the enclosing expression.
                let id = resolver.resolve(entity, inner, cancel).await?;
                compile_is(field.as_ref(), &Literal::String(id), false, known_paths)
            }
        }
    }
    .boxed()
}

fn compile_is(
    field: Option<&Literal>,
    value: &Literal,
    is_phrase: bool,
    known_paths: &[String],
) -> Result<JsonValue> {
    let Some(field) = field else {
        // Field-less test: free-text search across all fields.
        return Ok(match value {
            Literal::Wildcard(segments) => json!({
                "query_string": { "query": escaped_wildcard_text(segments) }
            }),
            Literal::String(raw) => json!({
                "multi_match": {
                    "type": if is_phrase { "phrase" } else { "best_fields" },
                    "query": coerce(raw),
                    "lenient": true,
                }
            }),
        });
    };

    let fields = resolve_fields(field, known_paths)?;
    let is_exists_test = matches!(
        value,
        Literal::Wildcard(segments)
            if segments.len() >= 2 && segments.iter().all(|s| s.is_empty())
    );
    if is_exists_test && fields.len() == known_paths.len() {
        // `field:*` over the whole path set matches every document.
        return Ok(json!({ "match_all": {} }));
    }

    let clauses: Vec<JsonValue> = fields
        .iter()
        .map(|field| {
            if is_exists_test {
                json!({ "exists": { "field": field } })
            } else {
                match value {
                    Literal::Wildcard(segments) => json!({
                        "query_string": {
                            "fields": [field],
                            "query": escaped_wildcard_text(segments),
                        }
                    }),
                    Literal::String(raw) => {
                        let kind = if is_phrase { "match_phrase" } else { "match" };
                        json!({ (kind): { (field.as_str()): coerce(raw) } })
                    }
                }
            }
        })
        .collect();
    Ok(any_of(clauses))
}

fn compile_range(
    field: &Literal,
    operator: RangeOp,
    value: &Literal,
    known_paths: &[String],
) -> Result<JsonValue> {
    let fields = resolve_fields(field, known_paths)?;
    let bound = match value {
        Literal::String(raw) => coerce(raw),
        Literal::Wildcard(segments) => JsonValue::String(segments.join("*")),
    };
    let clauses: Vec<JsonValue> = fields
        .iter()
        .map(|field| {
            json!({
                "range": { (field.as_str()): { (operator.as_str()): bound.clone() } }
            })
        })
        .collect();
    Ok(any_of(clauses))
}

fn resolve_fields(field: &Literal, known_paths: &[String]) -> Result<Vec<String>> {
    match field {
        Literal::String(name) => {
            if !known_paths.iter().any(|path| path == name) {
                return Err(Error::UnknownField(name.clone()));
            }
            Ok(vec![name.clone()])
        }
        // Zero wildcard matches is not an error; the clause simply
        // matches nothing.
        Literal::Wildcard(segments) => Ok(match_fields(
            known_paths,
            std::slice::from_ref(segments),
            false,
        )),
    }
}

fn any_of(clauses: Vec<JsonValue>) -> JsonValue {
    json!({
        "bool": {
            "should": clauses,
            "minimum_should_match": 1,
        }
    })
}

/// Escape the index's query-string special characters in each segment,
/// then join the segments with the live wildcard operator.
fn escaped_wildcard_text(segments: &[String]) -> String {
    segments
        .iter()
        .map(|segment| escape_query_string(segment))
        .collect::<Vec<_>>()
        .join("*")
}

fn escape_query_string(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(
            c,
            '+' | '-'
                | '='
                | '&'
                | '|'
                | '>'
                | '<'
                | '!'
                | '('
                | ')'
                | '{'
                | '}'
                | '['
                | ']'
                | '^'
                | '"'
                | '~'
                | '*'
                | '?'
                | ':'
                | '\\'
                | '/'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
