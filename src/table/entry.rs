use serde::Deserialize;
use serde_json::Value;

use crate::handler::HandlerRef;

/// One route of an audience's route set.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawRouteEntry")]
pub struct RouteEntry {
    pub path_template: String,
    pub handler: HandlerRef,
    /// Keyed by the literal path (plus encoded query) instead of a pattern.
    pub is_href: bool,
    pub high_priority: bool,
}

impl RouteEntry {
    pub fn pattern<S: Into<String>>(path_template: S, handler: HandlerRef) -> Self {
        Self {
            path_template: path_template.into(),
            handler,
            is_href: false,
            high_priority: false,
        }
    }

    pub fn href<S: Into<String>>(path: S, handler: HandlerRef) -> Self {
        Self {
            path_template: path.into(),
            handler,
            is_href: true,
            high_priority: false,
        }
    }

    pub fn high_priority(mut self, value: bool) -> Self {
        self.high_priority = value;
        self
    }
}

pub type RouteCollection = Vec<RouteEntry>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRouteEntry {
    path_template: String,
    handler: RawHandler,
    #[serde(default)]
    is_href: bool,
    #[serde(default)]
    high_priority: bool,
}

#[derive(Deserialize)]
struct RawHandler {
    value: Value,
}

impl From<RawRouteEntry> for RouteEntry {
    fn from(raw: RawRouteEntry) -> Self {
        Self {
            path_template: raw.path_template,
            handler: HandlerRef::Resolvable(raw.handler.value),
            is_href: raw.is_href,
            high_priority: raw.high_priority,
        }
    }
}
