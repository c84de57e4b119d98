use crate::CatalogError;
use std::fmt;

/// Ordered, non-empty sequence of search terms (collection/type/variant).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    pub fn from_terms<I, S>(terms: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        if terms.is_empty() {
            return Err(CatalogError::invalid_query("no search terms given"));
        }
        if terms.iter().any(String::is_empty) {
            return Err(CatalogError::invalid_query("search terms must not be empty"));
        }
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.terms.join("/"))
    }
}

/// Turns free text typed by the user into a query.
///
/// Only ASCII alphanumerics and `/` survive; repeated separators collapse,
/// leading and trailing separators are dropped, and the rest is split on `/`.
pub fn sanitize(raw: &str) -> Result<Query, CatalogError> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '/')
        .collect();
    let terms: Vec<&str> = kept.split('/').filter(|term| !term.is_empty()).collect();
    if terms.is_empty() {
        return Err(CatalogError::invalid_query(format!(
            "{raw:?} has no searchable characters"
        )));
    }
    Query::from_terms(terms)
}
