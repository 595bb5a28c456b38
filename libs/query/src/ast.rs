//! Query AST produced by the query-language parser.
//!
//! Nodes are immutable once built. The constructors exist so that
//! embedding code (and tests) can assemble queries without going
//! through the textual grammar.

/// A literal argument inside a query expression.
///
/// A wildcard literal holds the literal pieces of a glob pattern,
/// split at each wildcard marker; the segment list always has at
/// least one element, and a pattern that is exactly one wildcard
/// marker yields two empty segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(String),
    Wildcard(Vec<String>),
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn wildcard<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Wildcard(segments.into_iter().map(Into::into).collect())
    }

    /// Render the literal as plain text, joining wildcard segments
    /// with `*`. Used for entity names and range bounds.
    pub fn as_text(&self) -> String {
        match self {
            Self::String(value) => value.clone(),
            Self::Wildcard(segments) => segments.join("*"),
        }
    }
}

/// Range comparison operators supported by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    Lt,
    Lte,
    Gt,
    Gte,
}

impl RangeOp {
    /// The operator keyword as it appears in the search request body.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
        }
    }
}

/// A parsed query expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Or {
        left: Box<Query>,
        right: Box<Query>,
    },
    And {
        left: Box<Query>,
        right: Box<Query>,
    },
    Not {
        inner: Box<Query>,
    },
    Is {
        field: Option<Literal>,
        value: Literal,
        is_phrase: bool,
    },
    Range {
        field: Literal,
        operator: RangeOp,
        value: Literal,
    },
    /// A join against another entity: `inner` runs against the entity
    /// named by `entity`, and the single matching record's identifier
    /// is substituted into an equality test on `field`.
    Subquery {
        field: Option<Literal>,
        entity: Literal,
        inner: Box<Query>,
    },
}

impl Query {
    pub fn or(left: Query, right: Query) -> Self {
        Self::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Query, right: Query) -> Self {
        Self::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(inner: Query) -> Self {
        Self::Not {
            inner: Box::new(inner),
        }
    }

    pub fn is(field: Option<Literal>, value: Literal, is_phrase: bool) -> Self {
        Self::Is {
            field,
            value,
            is_phrase,
        }
    }

    pub fn range(field: Literal, operator: RangeOp, value: Literal) -> Self {
        Self::Range {
            field,
            operator,
            value,
        }
    }

    pub fn subquery(field: Option<Literal>, entity: Literal, inner: Query) -> Self {
        Self::Subquery {
            field,
            entity,
            inner: Box::new(inner),
        }
    }
}
