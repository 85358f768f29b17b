//! Audience-aware HTTP request routing.
//!
//! Route sets from several audiences are merged into one table of exact
//! href routes and pattern routes. Pattern routes are ranked by structural
//! specificity (plus an optional priority bonus) and tried in order after an
//! exact href lookup. The selected handler reference is resolved, either
//! directly, from the request context, or through an external resolver, and
//! then invoked with the request and its [`DispatchContext`].

pub mod errors;
pub mod handler;
pub mod path;
pub mod pattern;
pub mod router;
pub mod table;
pub mod types;

pub use errors::{DispatchError, DispatchResult};
pub use handler::{
    Deferred, Handler, HandlerKind, HandlerRef, Resolution, ResolveInput, Resolver, SharedHandler,
    Unresolvable, resolver_fn,
};
pub use pattern::{PatternMatcher, RankPolicy, rank_template};
pub use router::{
    ConnInfo, DispatchContext, Dispatcher, Monitor, RequestScope, ResolveOptions, RouteLookup,
    RouteSelection, RouterInfo, RouterOptions, RouterOptionsBuilder, RouterOptionsError,
    SelectionConfig, StopTimer, TracingMonitor, not_found,
};
pub use table::{RankedRoute, RankedRoutes, RouteCollection, RouteEntry, RouteTable};
pub use types::{BoxError, Flag, HttpRequest, HttpResponse, PathParams};
