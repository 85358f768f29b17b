use memchr::memchr;
use smallvec::SmallVec;

/// Pathname and raw query of a route path such as `/cachorros?PS=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HrefParts<'a> {
    pub pathname: &'a str,
    pub query: Option<&'a str>,
}

/// Splits at the first `?`. An empty query is reported as absent.
pub fn split_href(href: &str) -> HrefParts<'_> {
    match memchr(b'?', href.as_bytes()) {
        Some(pos) => {
            let query = &href[pos + 1..];
            HrefParts {
                pathname: &href[..pos],
                query: (!query.is_empty()).then_some(query),
            }
        }
        None => HrefParts {
            pathname: href,
            query: None,
        },
    }
}

/// Keys to probe in the href map, most specific first: `path?query`, then
/// the bare path. Comparison is literal; query parameter order matters.
pub fn lookup_keys(path: &str, query: Option<&str>) -> SmallVec<[String; 2]> {
    let mut keys = SmallVec::new();
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        keys.push(format!("{path}?{q}"));
    }
    keys.push(path.to_string());
    keys
}

/// Page path reported to handlers for an href match.
pub fn page_path(path: &str, query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{path}?{q}"),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_redirect_style_href() {
        let parts = split_href("/cachorros?PS=12");
        assert_eq!(parts.pathname, "/cachorros");
        assert_eq!(parts.query, Some("PS=12"));
    }

    #[test]
    fn trailing_question_mark_has_no_query() {
        let parts = split_href("/sale?");
        assert_eq!(parts.pathname, "/sale");
        assert_eq!(parts.query, None);
    }

    #[test]
    fn lookup_prefers_full_href() {
        let keys = lookup_keys("/sale", Some("ref=1"));
        assert_eq!(keys.as_slice(), ["/sale?ref=1".to_string(), "/sale".to_string()]);

        let keys = lookup_keys("/sale", None);
        assert_eq!(keys.as_slice(), ["/sale".to_string()]);
    }
}
