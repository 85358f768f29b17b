mod reference;
mod resolution;

pub use reference::{HandlerKind, HandlerRef};
pub use resolution::{
    Deferred, Handler, HandlerFuture, Resolution, ResolutionFuture, ResolveInput, Resolver,
    SharedHandler, Unresolvable, resolver_fn,
};
