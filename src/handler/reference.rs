use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::{Deferred, Handler, Resolution, ResolveInput, SharedHandler};
use crate::router::DispatchContext;
use crate::types::{BoxError, HttpRequest, HttpResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Value,
    Deferred,
    Resolvable,
}

/// Reference to the handler of a route.
#[derive(Clone)]
pub enum HandlerRef {
    /// Already a handler.
    Value(SharedHandler),
    /// Produces its handler from the request context, bypassing the resolver.
    Deferred(Arc<dyn Deferred>),
    /// Opaque reference for the resolver.
    Resolvable(Value),
}

impl HandlerRef {
    pub fn handler<F, Fut>(f: F) -> Self
    where
        F: Fn(HttpRequest, DispatchContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, BoxError>> + Send + 'static,
    {
        Self::Value(Arc::new(f))
    }

    pub fn from_handler<H: Handler>(handler: H) -> Self {
        Self::Value(Arc::new(handler))
    }

    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn(ResolveInput<'_>) -> Resolution + Send + Sync + 'static,
    {
        Self::Deferred(Arc::new(f))
    }

    pub fn resolvable(reference: Value) -> Self {
        Self::Resolvable(reference)
    }

    pub fn kind(&self) -> HandlerKind {
        match self {
            Self::Value(_) => HandlerKind::Value,
            Self::Deferred(_) => HandlerKind::Deferred,
            Self::Resolvable(_) => HandlerKind::Resolvable,
        }
    }
}

impl From<Value> for HandlerRef {
    fn from(reference: Value) -> Self {
        Self::Resolvable(reference)
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(_) => f.write_str("HandlerRef::Value"),
            Self::Deferred(_) => f.write_str("HandlerRef::Deferred"),
            Self::Resolvable(reference) => {
                f.debug_tuple("HandlerRef::Resolvable").field(reference).finish()
            }
        }
    }
}
