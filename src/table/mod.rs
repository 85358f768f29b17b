mod builder;
mod entry;
mod ranked;

pub use builder::{HrefMatch, PatternRoute, RouteTable};
pub use entry::{RouteCollection, RouteEntry};
pub use ranked::{RankedRoute, RankedRoutes, rank_routes};
