use regex::{Regex, escape};

use super::segment::{SegmentPart, SegmentPattern, parse_template};
use super::{PatternError, PatternResult};
use crate::path::{encode_component, encode_path_segment, split_href};
use crate::types::PathParams;

const DEFAULT_PARAM_PATTERN: &str = "[^/]+";

/// Compiled form of a route template, matched against a request's path and
/// query.
///
/// A literal query in the template (`/cachorros?PS=12`) is percent-encoded
/// into one opaque literal and compared against the equally encoded request
/// query. Without one, any query is accepted.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    template: Box<str>,
    segments: Vec<SegmentPattern>,
    regex: Regex,
    captures: Vec<String>,
    query: Option<Box<str>>,
}

impl PatternMatcher {
    #[tracing::instrument(level = "trace", skip_all, fields(template = %template))]
    pub fn new(template: &str) -> PatternResult<Self> {
        let href = split_href(template);
        let segments = parse_template(href.pathname)?;

        let mut captures = Vec::new();
        let mut source = String::from("^");
        for (idx, segment) in segments.iter().enumerate() {
            if idx > 0 {
                source.push('/');
            }
            push_segment(&mut source, segment, &mut captures);
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|source| PatternError::InvalidRegex {
            template: template.to_string(),
            source,
        })?;

        Ok(Self {
            template: template.into(),
            segments,
            regex,
            captures,
            query: href.query.map(|q| encode_component(q).into_boxed_str()),
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[SegmentPattern] {
        &self.segments
    }

    /// Encoded query literal the template requires, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.captures.iter().map(String::as_str)
    }

    pub fn is_match(&self, path: &str, query: Option<&str>) -> bool {
        self.query_matches(query) && self.regex.is_match(path)
    }

    #[tracing::instrument(level = "trace", skip(self), fields(template=%self.template))]
    pub fn match_parts(&self, path: &str, query: Option<&str>) -> Option<PathParams> {
        if !self.query_matches(query) {
            return None;
        }

        let caps = self.regex.captures(path)?;
        let mut params = PathParams::with_capacity(self.captures.len());
        for (idx, name) in self.captures.iter().enumerate() {
            let value = caps
                .name(&group_name(idx))
                .map(|m| m.as_str().to_string());
            params.insert(name.clone(), value);
        }
        Some(params)
    }

    pub fn match_uri(&self, uri: &http::Uri) -> Option<PathParams> {
        self.match_parts(uri.path(), uri.query())
    }

    fn query_matches(&self, query: Option<&str>) -> bool {
        match self.query.as_deref() {
            None => true,
            Some(expected) => query
                .filter(|q| !q.is_empty())
                .is_some_and(|q| encode_component(q) == expected),
        }
    }
}

fn push_segment(source: &mut String, segment: &SegmentPattern, captures: &mut Vec<String>) {
    for part in segment.parts.iter() {
        match part {
            SegmentPart::Literal(lit) => source.push_str(&escape(&encode_path_segment(lit))),
            SegmentPart::Param { name, constraint } => {
                let body = constraint.as_deref().unwrap_or(DEFAULT_PARAM_PATTERN);
                source.push_str(&format!("(?P<{}>{})", group_name(captures.len()), body));
                captures.push(name.clone());
            }
            SegmentPart::Wildcard { index } => {
                source.push_str(&format!("(?P<{}>.*)", group_name(captures.len())));
                captures.push(index.to_string());
            }
        }
    }
}

#[inline]
fn group_name(idx: usize) -> String {
    format!("c{idx}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a PathParams, name: &str) -> Option<&'a str> {
        params.get(name).and_then(|v| v.as_deref())
    }

    #[test]
    fn dynamic_segment_binds_single_segment() {
        let matcher = PatternMatcher::new("/cat/:slug").unwrap();
        let params = matcher.match_parts("/cat/shoes", None).unwrap();
        assert_eq!(param(&params, "slug"), Some("shoes"));
        assert!(matcher.match_parts("/cat/shoes/red", None).is_none());
        assert!(matcher.match_parts("/cat/", None).is_none());
    }

    #[test]
    fn wildcard_spans_slashes() {
        let matcher = PatternMatcher::new("/files/*").unwrap();
        let params = matcher.match_parts("/files/a/b/c.png", None).unwrap();
        assert_eq!(param(&params, "0"), Some("a/b/c.png"));
    }

    #[test]
    fn static_literals_are_escaped() {
        let matcher = PatternMatcher::new("/a.b/(c)").unwrap();
        assert!(matcher.is_match("/a.b/(c)", None));
        assert!(!matcher.is_match("/axb/(c)", None));
    }

    #[test]
    fn non_ascii_literals_match_the_encoded_request_path() {
        let matcher = PatternMatcher::new("/categoria/calçados/:id").unwrap();
        let uri: http::Uri = "/categoria/cal%C3%A7ados/9".parse().unwrap();
        let params = matcher.match_uri(&uri).unwrap();
        assert_eq!(param(&params, "id"), Some("9"));
    }

    #[test]
    fn constraint_restricts_parameter() {
        let matcher = PatternMatcher::new("/users/:id(\\d+)").unwrap();
        assert!(matcher.is_match("/users/42", None));
        assert!(!matcher.is_match("/users/abc", None));
    }

    #[test]
    fn template_query_is_an_opaque_literal() {
        let matcher = PatternMatcher::new("/cachorros?PS=12").unwrap();
        assert_eq!(matcher.query(), Some("PS%3D12"));
        assert!(matcher.is_match("/cachorros", Some("PS=12")));
        assert!(!matcher.is_match("/cachorros", Some("PS=24")));
        assert!(!matcher.is_match("/cachorros", None));
    }

    #[test]
    fn template_without_query_accepts_any_query() {
        let matcher = PatternMatcher::new("/products/:id").unwrap();
        let uri: http::Uri = "/products/7?color=blue".parse().unwrap();
        let params = matcher.match_uri(&uri).unwrap();
        assert_eq!(param(&params, "id"), Some("7"));
    }

    #[test]
    fn invalid_constraint_is_reported() {
        let err = PatternMatcher::new("/users/:id([)").unwrap_err();
        assert!(matches!(err, PatternError::InvalidRegex { .. }));
    }
}
