//! payment-client/src/query.rs
//!
//! URL query parameter normalization. Routers surface a repeated parameter as
//! a list and a single occurrence as a scalar; callers here always want at
//! most one value.

use web_sys::UrlSearchParams;

/// A query parameter value as a router reports it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    Many(Vec<String>),
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Many(values)
    }
}

/// Collapse a possibly-multi-valued parameter into at most one value.
///
/// A scalar passes through unchanged; a sequence yields its first element;
/// an empty sequence or absent input yields `None`.
pub fn first_or_self(value: Option<QueryValue>) -> Option<String> {
    match value? {
        QueryValue::Single(s) => Some(s),
        QueryValue::Many(values) => values.into_iter().next(),
    }
}

/// Read the named parameter from the current page's query string.
pub fn search_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = UrlSearchParams::new_with_str(&search).ok()?;
    let values: Vec<String> = params
        .get_all(name)
        .iter()
        .filter_map(|v| v.as_string())
        .collect();
    first_or_self(Some(QueryValue::Many(values)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_passes_through() {
        assert_eq!(
            first_or_self(Some("cs_1".to_string().into())),
            Some("cs_1".to_string())
        );
    }

    #[test]
    fn sequence_yields_first_element() {
        let value = vec!["cs_1".to_string(), "cs_2".to_string()];
        assert_eq!(
            first_or_self(Some(value.into())),
            Some("cs_1".to_string())
        );
    }

    #[test]
    fn empty_sequence_and_absent_yield_none() {
        assert_eq!(first_or_self(Some(QueryValue::Many(Vec::new()))), None);
        assert_eq!(first_or_self(None), None);
    }
}
