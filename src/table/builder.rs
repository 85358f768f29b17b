use hashbrown::HashMap as FastHashMap;

use super::RouteEntry;
use super::ranked::{RankedRoutes, rank_routes};
use crate::handler::HandlerRef;
use crate::path::lookup_keys;
use crate::pattern::RankPolicy;

#[derive(Debug, Clone)]
pub struct PatternRoute {
    pub handler: HandlerRef,
    pub high_priority: bool,
    /// Slot of the template's first appearance across the merge.
    pub(crate) order: usize,
}

#[derive(Debug, Clone)]
pub struct HrefMatch<'a> {
    pub key: String,
    pub handler: &'a HandlerRef,
}

/// Merged routes of one or more audiences: exact href routes and pattern
/// routes. Later entries replace earlier ones sharing the same key.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    href_routes: FastHashMap<String, HandlerRef>,
    pattern_routes: FastHashMap<String, PatternRoute>,
    next_order: usize,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the collections in order; a later collection overrides an
    /// earlier one on key collision.
    #[tracing::instrument(level = "trace", skip(collections))]
    pub fn build<I>(collections: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<[RouteEntry]>,
    {
        let mut table = Self::new();
        for collection in collections {
            table.merge(collection.as_ref());
        }
        tracing::trace!(
            href_routes = table.href_routes.len(),
            pattern_routes = table.pattern_routes.len(),
            "route table built"
        );
        table
    }

    pub fn merge(&mut self, collection: &[RouteEntry]) {
        for entry in collection {
            self.insert(entry);
        }
    }

    pub fn insert(&mut self, entry: &RouteEntry) {
        if entry.is_href {
            self.href_routes
                .insert(entry.path_template.clone(), entry.handler.clone());
            return;
        }

        match self.pattern_routes.get_mut(entry.path_template.as_str()) {
            Some(existing) => {
                existing.handler = entry.handler.clone();
                existing.high_priority = entry.high_priority;
            }
            None => {
                let order = self.next_order;
                self.next_order += 1;
                self.pattern_routes.insert(
                    entry.path_template.clone(),
                    PatternRoute {
                        handler: entry.handler.clone(),
                        high_priority: entry.high_priority,
                        order,
                    },
                );
            }
        }
    }

    pub fn href(&self, key: &str) -> Option<&HandlerRef> {
        self.href_routes.get(key)
    }

    /// Exact lookup: `path?query` first, then the bare path.
    pub fn lookup_href(&self, path: &str, query: Option<&str>) -> Option<HrefMatch<'_>> {
        lookup_keys(path, query).into_iter().find_map(|key| {
            self.href_routes
                .get(key.as_str())
                .map(|handler| HrefMatch { key, handler })
        })
    }

    pub fn pattern(&self, template: &str) -> Option<&PatternRoute> {
        self.pattern_routes.get(template)
    }

    pub fn patterns(&self) -> impl Iterator<Item = (&str, &PatternRoute)> {
        self.pattern_routes
            .iter()
            .map(|(template, route)| (template.as_str(), route))
    }

    pub fn href_len(&self) -> usize {
        self.href_routes.len()
    }

    pub fn pattern_len(&self) -> usize {
        self.pattern_routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.href_routes.is_empty() && self.pattern_routes.is_empty()
    }

    pub fn ranked(&self, policy: &RankPolicy) -> RankedRoutes {
        rank_routes(self, policy)
    }
}
