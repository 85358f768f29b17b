use futures::FutureExt;
use futures::future::{self, BoxFuture};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::router::{DispatchContext, ResolveOptions};
use crate::types::{BoxError, HttpRequest, HttpResponse};

pub type HandlerFuture = BoxFuture<'static, Result<HttpResponse, BoxError>>;
pub type ResolutionFuture = BoxFuture<'static, Result<SharedHandler, BoxError>>;

/// Terminal request handler.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: HttpRequest, context: DispatchContext) -> HandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(HttpRequest, DispatchContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, BoxError>> + Send + 'static,
{
    fn call(&self, request: HttpRequest, context: DispatchContext) -> HandlerFuture {
        Box::pin((self)(request, context))
    }
}

pub type SharedHandler = Arc<dyn Handler>;

/// What resolving a reference produced: a handler that is usable right
/// away, or a computation that still has to finish.
pub enum Resolution {
    Ready(SharedHandler),
    Pending(ResolutionFuture),
}

impl Resolution {
    pub fn ready<H: Handler>(handler: H) -> Self {
        Self::Ready(Arc::new(handler))
    }

    pub fn handler<F, Fut>(f: F) -> Self
    where
        F: Fn(HttpRequest, DispatchContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, BoxError>> + Send + 'static,
    {
        Self::Ready(Arc::new(f))
    }

    pub fn pending<Fut>(fut: Fut) -> Self
    where
        Fut: Future<Output = Result<SharedHandler, BoxError>> + Send + 'static,
    {
        Self::Pending(fut.boxed())
    }

    pub fn failed<E: Into<BoxError>>(err: E) -> Self {
        Self::Pending(future::ready(Err(err.into())).boxed())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub async fn settle(self) -> Result<SharedHandler, BoxError> {
        match self {
            Self::Ready(handler) => Ok(handler),
            Self::Pending(fut) => fut.await,
        }
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("Resolution::Ready"),
            Self::Pending(_) => f.write_str("Resolution::Pending"),
        }
    }
}

/// Request-scoped data handed to deferred references and resolvers.
#[derive(Debug, Clone, Copy)]
pub struct ResolveInput<'a> {
    pub request: &'a HttpRequest,
    pub context: &'a DispatchContext,
}

/// A reference that produces its handler straight from the request context,
/// without going through the resolver.
pub trait Deferred: Send + Sync + 'static {
    fn defer(&self, input: ResolveInput<'_>) -> Resolution;
}

impl<F> Deferred for F
where
    F: Fn(ResolveInput<'_>) -> Resolution + Send + Sync + 'static,
{
    fn defer(&self, input: ResolveInput<'_>) -> Resolution {
        (self)(input)
    }
}

/// Resolution engine for opaque references.
pub trait Resolver: Send + Sync + 'static {
    fn resolve(
        &self,
        reference: &Value,
        options: &ResolveOptions,
        input: ResolveInput<'_>,
    ) -> Resolution;
}

impl<F> Resolver for F
where
    F: Fn(&Value, &ResolveOptions, ResolveInput<'_>) -> Resolution + Send + Sync + 'static,
{
    fn resolve(
        &self,
        reference: &Value,
        options: &ResolveOptions,
        input: ResolveInput<'_>,
    ) -> Resolution {
        (self)(reference, options, input)
    }
}

pub fn resolver_fn<F>(f: F) -> Arc<dyn Resolver>
where
    F: Fn(&Value, &ResolveOptions, ResolveInput<'_>) -> Resolution + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Resolver for route sets that never carry opaque references; any opaque
/// reference fails resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unresolvable;

#[derive(Debug, thiserror::Error)]
#[error("no resolver is configured for reference {reference}")]
struct UnresolvableReference {
    reference: String,
}

impl Resolver for Unresolvable {
    fn resolve(&self, reference: &Value, _: &ResolveOptions, _: ResolveInput<'_>) -> Resolution {
        Resolution::failed(UnresolvableReference {
            reference: reference.to_string(),
        })
    }
}
