// src/extract.rs

//! Field extraction from execution input payloads.
//!
//! The payload is parsed as JSON and a JMESPath expression is evaluated
//! against it. The expression is expected to build an object
//! (e.g. `{ id: detail.id, type: detail.type }`); each key of that object
//! becomes an output column.

use std::fmt;

use serde_json::{Map, Value};

use crate::errors::QueryError;

/// Field name → value, as produced by the query expression.
///
/// Keys iterate in sorted order, which is also the order JMESPath objects
/// are built in.
pub type ExtractedFields = Map<String, Value>;

/// A compiled query expression.
///
/// Compiling happens once, up front, so an invalid expression fails the run
/// before any remote call is made.
pub struct Query {
    source: String,
    compiled: jmespath::Expression<'static>,
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl Query {
    pub fn compile(expression: &str) -> Result<Self, QueryError> {
        let compiled = jmespath::compile(expression).map_err(|e| QueryError::Invalid {
            expression: expression.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: expression.to_string(),
            compiled,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Evaluate against a parsed document, returning the raw result.
    pub fn evaluate(&self, document: &Value) -> Result<Value, QueryError> {
        let result = self
            .compiled
            .search(document)
            .map_err(|e| self.evaluation_error(e.to_string()))?;

        serde_json::to_value(&*result).map_err(|e| self.evaluation_error(e.to_string()))
    }

    fn evaluation_error(&self, reason: String) -> QueryError {
        QueryError::Evaluation {
            expression: self.source.clone(),
            reason,
        }
    }
}

/// Outcome of extracting fields from one payload.
#[derive(Debug)]
pub enum Extraction {
    Fields(ExtractedFields),
    /// The payload was not valid JSON; the query was not evaluated.
    Malformed(serde_json::Error),
}

/// Parses payloads and applies the query to them.
#[derive(Debug)]
pub struct FieldExtractor {
    query: Query,
}

impl FieldExtractor {
    pub fn new(query: Query) -> Self {
        Self { query }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Extract fields from a raw payload.
    ///
    /// A missing payload is treated as a `null` document. Malformed JSON is
    /// reported as [`Extraction::Malformed`] so the caller can apply its
    /// policy; query failures are errors.
    pub fn extract(&self, raw_payload: Option<&str>) -> Result<Extraction, QueryError> {
        let document = match raw_payload {
            Some(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(doc) => doc,
                Err(e) => return Ok(Extraction::Malformed(e)),
            },
            None => Value::Null,
        };

        self.extract_document(&document).map(Extraction::Fields)
    }

    /// Evaluate the query against an already-parsed document.
    ///
    /// A `null` result (the paths did not match) yields no fields; any other
    /// non-object result is [`QueryError::UnexpectedShape`].
    pub fn extract_document(&self, document: &Value) -> Result<ExtractedFields, QueryError> {
        match self.query.evaluate(document)? {
            Value::Object(fields) => Ok(fields),
            Value::Null => Ok(ExtractedFields::new()),
            other => Err(QueryError::UnexpectedShape {
                expression: self.query.as_str().to_string(),
                found: value_kind(&other),
            }),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
