mod context;
mod dispatcher;
mod monitor;
mod options;
mod service;

pub use context::{ConnInfo, DispatchContext, RequestScope, RouterInfo};
pub use dispatcher::{Dispatcher, RouteLookup, not_found};
pub use monitor::{Monitor, StopTimer, TracingMonitor};
pub use options::{
    DEFAULT_LOAD_TIMER_LABEL, ResolveOptions, RouterOptions, RouterOptionsBuilder,
    RouterOptionsError, SelectionConfig,
};
pub use service::RouteSelection;
