use parking_lot::RwLock;
use std::sync::Arc;

use super::{Dispatcher, RequestScope, ResolveOptions, RouterOptions, SelectionConfig};
use crate::errors::DispatchResult;
use crate::handler::Resolver;
use crate::table::{RouteCollection, RouteTable};
use crate::types::{HttpRequest, HttpResponse};

/// Selects and dispatches a handler from audience route sets.
///
/// The configured audiences form an immutable snapshot. Each request reads
/// the current snapshot once, appends its own request-scoped audiences after
/// it, and builds a fresh [`Dispatcher`] from the merge. Replacing the
/// audiences swaps the snapshot; in-flight requests keep the one they read.
pub struct RouteSelection {
    audiences: RwLock<Arc<Vec<RouteCollection>>>,
    resolver: Arc<dyn Resolver>,
    options: RouterOptions,
}

impl RouteSelection {
    pub fn new(
        audiences: Vec<RouteCollection>,
        resolver: Arc<dyn Resolver>,
        options: Option<RouterOptions>,
    ) -> DispatchResult<Self> {
        let options = options.unwrap_or_default();
        options.validate()?;

        Ok(Self {
            audiences: RwLock::new(Arc::new(audiences)),
            resolver,
            options,
        })
    }

    pub fn from_config(
        config: SelectionConfig,
        resolver: Arc<dyn Resolver>,
        options: Option<RouterOptions>,
    ) -> DispatchResult<Self> {
        Self::new(config.into_collections(), resolver, options)
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    pub fn audiences(&self) -> Arc<Vec<RouteCollection>> {
        self.audiences.read().clone()
    }

    pub fn replace_audiences(&self, audiences: Vec<RouteCollection>) {
        let snapshot = Arc::new(audiences);
        *self.audiences.write() = snapshot;
    }

    /// Builds the dispatcher for one request: configured audiences first,
    /// request-scoped audiences last so they win on identical keys.
    pub fn dispatcher(&self, scope: &RequestScope) -> Dispatcher {
        let baseline = self.audiences();
        let table = RouteTable::build(baseline.iter().chain(scope.audiences.iter()));
        let options = ResolveOptions {
            monitoring: scope.monitoring.clone(),
        };

        Dispatcher::new(
            table,
            &self.options.rank_policy(),
            self.resolver.clone(),
            options,
        )
        .with_timer_label(self.options.load_timer_label.clone())
    }

    pub async fn handle(
        &self,
        request: HttpRequest,
        scope: RequestScope,
    ) -> DispatchResult<HttpResponse> {
        let dispatcher = self.dispatcher(&scope);
        dispatcher.dispatch(request, scope.conn, scope.flags).await
    }
}
