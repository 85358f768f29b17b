use bytes::Bytes;
use http::{StatusCode, Uri};
use std::sync::Arc;

use super::monitor::TimerGuard;
use super::{ConnInfo, DEFAULT_LOAD_TIMER_LABEL, DispatchContext, ResolveOptions, RouterInfo};
use crate::errors::{DispatchError, DispatchResult};
use crate::handler::{HandlerRef, Resolution, ResolveInput, Resolver, SharedHandler};
use crate::path::page_path;
use crate::pattern::RankPolicy;
use crate::table::{RankedRoutes, RouteTable};
use crate::types::{Flag, HttpRequest, HttpResponse, PathParams};

/// Route selected for a request.
#[derive(Debug, Clone)]
pub enum RouteLookup {
    Href {
        page_path: String,
        handler: HandlerRef,
    },
    Pattern {
        template: String,
        handler: HandlerRef,
        params: PathParams,
    },
}

impl RouteLookup {
    pub fn page_path(&self) -> &str {
        match self {
            Self::Href { page_path, .. } => page_path,
            Self::Pattern { template, .. } => template,
        }
    }

    pub fn handler(&self) -> &HandlerRef {
        match self {
            Self::Href { handler, .. } | Self::Pattern { handler, .. } => handler,
        }
    }

    fn into_parts(self) -> (HandlerRef, String, PathParams) {
        match self {
            Self::Href { page_path, handler } => (handler, page_path, PathParams::new()),
            Self::Pattern {
                template,
                handler,
                params,
            } => (handler, template, params),
        }
    }
}

/// Dispatches requests over one merged route table snapshot.
pub struct Dispatcher {
    table: RouteTable,
    routes: RankedRoutes,
    resolver: Arc<dyn Resolver>,
    options: ResolveOptions,
    timer_label: String,
}

impl Dispatcher {
    pub fn new(
        table: RouteTable,
        policy: &RankPolicy,
        resolver: Arc<dyn Resolver>,
        options: ResolveOptions,
    ) -> Self {
        let routes = table.ranked(policy);
        Self {
            table,
            routes,
            resolver,
            options,
            timer_label: DEFAULT_LOAD_TIMER_LABEL.to_string(),
        }
    }

    pub fn with_timer_label<S: Into<String>>(mut self, label: S) -> Self {
        self.timer_label = label.into();
        self
    }

    pub fn routes(&self) -> &RankedRoutes {
        &self.routes
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Exact href match first; otherwise the first ranked pattern matching
    /// the request's path and query.
    #[tracing::instrument(level = "trace", skip_all, fields(uri = %uri))]
    pub fn lookup(&self, uri: &Uri) -> DispatchResult<Option<RouteLookup>> {
        let path = uri.path();
        let query = uri.query();

        if let Some(found) = self.table.lookup_href(path, query) {
            tracing::trace!(key = %found.key, "href route matched");
            return Ok(Some(RouteLookup::Href {
                page_path: page_path(path, query),
                handler: found.handler.clone(),
            }));
        }

        for route in self.routes.iter() {
            let matcher = match &*route.matcher {
                Ok(matcher) => matcher,
                Err(err) => return Err(err.clone().into()),
            };
            if let Some(params) = matcher.match_parts(path, query) {
                return Ok(Some(RouteLookup::Pattern {
                    template: route.path_template.clone(),
                    handler: route.handler.clone(),
                    params,
                }));
            }
        }

        Ok(None)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(path = %request.uri().path()))]
    pub async fn dispatch(
        &self,
        request: HttpRequest,
        conn: ConnInfo,
        flags: Vec<Flag>,
    ) -> DispatchResult<HttpResponse> {
        let Some(selected) = self.lookup(request.uri())? else {
            tracing::debug!("no route matched");
            return Ok(not_found());
        };

        let (reference, page_path, params) = selected.into_parts();
        tracing::debug!(page_path = %page_path, kind = ?reference.kind(), "route selected");

        let context = DispatchContext {
            conn,
            params,
            routes: self.routes.clone(),
            router_info: RouterInfo { flags, page_path },
        };

        let handler = self.resolve(&reference, &request, &context).await?;
        handler
            .call(request, context)
            .await
            .map_err(DispatchError::Handler)
    }

    async fn resolve(
        &self,
        reference: &HandlerRef,
        request: &HttpRequest,
        context: &DispatchContext,
    ) -> DispatchResult<SharedHandler> {
        let _timer = TimerGuard::start(self.options.monitoring.as_ref(), &self.timer_label);
        let input = ResolveInput { request, context };

        let resolution = match reference {
            HandlerRef::Value(handler) => Resolution::Ready(handler.clone()),
            HandlerRef::Deferred(deferred) => deferred.defer(input),
            HandlerRef::Resolvable(value) => self.resolver.resolve(value, &self.options, input),
        };

        resolution.settle().await.map_err(DispatchError::Resolution)
    }
}

pub fn not_found() -> HttpResponse {
    let mut response = HttpResponse::new(Bytes::new());
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}
