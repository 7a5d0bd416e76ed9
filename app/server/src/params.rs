//! FILENAME: app/server/src/params.rs
//! Query-string parameters and their translation into engine types.
//!
//! Parameters are read as raw strings so that a malformed value surfaces as
//! an invalid-parameter error naming the parameter, not as a generic
//! extractor rejection. The "all" sentinels of the dashboard ("Toutes",
//! "Tous") and empty strings are mapped to "no restriction" here.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use chrono::NaiveDate;
use query_engine::{FilterSpec, LimitBounds, QueryError};

use crate::error::AppError;

const ALL_FEMININE: &str = "Toutes";
const ALL_MASCULINE: &str = "Tous";

#[derive(Debug, Clone, Default)]
pub struct QueryParams(HashMap<String, String>);

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(map) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(QueryParams(map))
    }
}

impl QueryParams {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        QueryParams(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// The raw value, with empty strings treated as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// A dimension value; the given sentinel means "no restriction".
    fn dimension(&self, name: &str, sentinel: &str) -> Option<String> {
        self.get(name).filter(|v| *v != sentinel).map(str::to_string)
    }

    pub fn date(&self, name: &str) -> Result<Option<NaiveDate>, QueryError> {
        self.get(name)
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| QueryError::invalid(name, raw, "expected a date as YYYY-MM-DD"))
            })
            .transpose()
    }

    pub fn usize_or(&self, name: &str, default: usize) -> Result<usize, QueryError> {
        match self.get(name) {
            None => Ok(default),
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| QueryError::invalid(name, raw, "expected a non-negative integer")),
        }
    }

    /// A bounded limit. Range checking is left to the engine.
    pub fn limit(&self, bounds: LimitBounds) -> Result<usize, QueryError> {
        self.usize_or(bounds.name, bounds.default)
    }

    /// Any token-valued parameter whose `FromStr` already names itself in
    /// its error (sort key, granularity).
    pub fn token_or<T>(&self, name: &str, default: T) -> Result<T, QueryError>
    where
        T: FromStr<Err = QueryError>,
    {
        match self.get(name) {
            None => Ok(default),
            Some(raw) => raw.parse(),
        }
    }

    /// `date_debut`, `date_fin`, `categorie`, `region`, `segment`.
    pub fn filter(&self) -> Result<FilterSpec, QueryError> {
        Ok(FilterSpec {
            date_start: self.date("date_debut")?,
            date_end: self.date("date_fin")?,
            category: self.dimension("categorie", ALL_FEMININE),
            region: self.dimension("region", ALL_FEMININE),
            segment: self.dimension("segment", ALL_MASCULINE),
        })
    }
}
