use std::sync::Arc;

use super::RouteTable;
use crate::handler::HandlerRef;
use crate::pattern::{PatternMatcher, PatternResult, RankPolicy};

#[derive(Debug, Clone)]
pub struct RankedRoute {
    pub path_template: String,
    pub handler: HandlerRef,
    pub high_priority: bool,
    pub score: u32,
    /// Compiled once per ranking. A malformed template keeps its error here
    /// until a lookup reaches the route.
    pub matcher: Arc<PatternResult<PatternMatcher>>,
}

pub type RankedRoutes = Arc<[RankedRoute]>;

/// Orders the pattern routes by descending score. Equal scores keep the
/// order in which their templates first appeared. Every template is
/// compiled here so lookups never rebuild a matcher.
#[tracing::instrument(level = "trace", skip(table, policy), fields(routes=table.pattern_len() as u64))]
pub fn rank_routes(table: &RouteTable, policy: &RankPolicy) -> RankedRoutes {
    let mut ranked: Vec<(usize, RankedRoute)> = table
        .patterns()
        .map(|(template, route)| {
            let matcher = PatternMatcher::new(template);
            if let Err(err) = &matcher {
                tracing::debug!(template = %template, error = %err, "template does not compile");
            }
            (
                route.order,
                RankedRoute {
                    path_template: template.to_string(),
                    handler: route.handler.clone(),
                    high_priority: route.high_priority,
                    score: policy.score(template, route.high_priority),
                    matcher: Arc::new(matcher),
                },
            )
        })
        .collect();

    ranked.sort_by(|(order_a, a), (order_b, b)| {
        b.score.cmp(&a.score).then_with(|| order_a.cmp(order_b))
    });

    ranked.into_iter().map(|(_, route)| route).collect()
}
