use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;

use super::Monitor;
use crate::table::{RankedRoutes, RouteCollection};
use crate::types::{Flag, PathParams};

/// Connection metadata of the transport that carried the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnInfo {
    pub local_addr: Option<SocketAddr>,
    pub remote_addr: Option<SocketAddr>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterInfo {
    pub flags: Vec<Flag>,
    /// Matched template, or the literal path (and query) of an href route.
    pub page_path: String,
}

/// Per-request state handed to resolution and to the selected handler.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    pub conn: ConnInfo,
    pub params: PathParams,
    pub routes: RankedRoutes,
    pub router_info: RouterInfo,
}

impl DispatchContext {
    pub fn flags(&self) -> &[Flag] {
        &self.router_info.flags
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(|value| value.as_deref())
    }

    pub fn page_path(&self) -> &str {
        &self.router_info.page_path
    }
}

/// Request-scoped inputs: connection info, the visitor's flags, and
/// audience route sets that override the configured ones.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    pub conn: ConnInfo,
    pub flags: Vec<Flag>,
    pub audiences: Vec<RouteCollection>,
    pub monitoring: Option<Arc<dyn Monitor>>,
}

impl RequestScope {
    pub fn new(conn: ConnInfo) -> Self {
        Self {
            conn,
            ..Default::default()
        }
    }

    pub fn with_flags(mut self, flags: Vec<Flag>) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_audience(mut self, routes: RouteCollection) -> Self {
        self.audiences.push(routes);
        self
    }

    pub fn with_monitoring(mut self, monitoring: Arc<dyn Monitor>) -> Self {
        self.monitoring = Some(monitoring);
        self
    }
}
