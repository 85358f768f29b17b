use audience_router_rs::{
    ConnInfo, DispatchContext, DispatchError, Flag, HandlerRef, HttpRequest, HttpResponse,
    RequestScope, Resolution, ResolveInput, ResolveOptions, RouteEntry, RouteSelection,
    RouterOptions, RouterOptionsError, SelectionConfig, Unresolvable, resolver_fn,
};
use bytes::Bytes;
use http::StatusCode;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;

fn respond(name: &'static str) -> HandlerRef {
    HandlerRef::handler(move |_req: HttpRequest, _ctx: DispatchContext| async move {
        Ok(HttpResponse::new(Bytes::from_static(name.as_bytes())))
    })
}

fn request(uri: &str) -> HttpRequest {
    http::Request::builder()
        .uri(uri)
        .body(Bytes::new())
        .expect("request should build")
}

fn body(response: &HttpResponse) -> String {
    String::from_utf8(response.body().to_vec()).expect("utf-8 body")
}

fn echo_resolver() -> Arc<dyn audience_router_rs::Resolver> {
    resolver_fn(|reference: &Value, _: &ResolveOptions, _: ResolveInput<'_>| {
        let name = reference["page"].as_str().unwrap_or("unknown").to_string();
        Resolution::handler(move |_req: HttpRequest, ctx: DispatchContext| {
            let name = name.clone();
            async move {
                let flags: Vec<&str> = ctx.flags().iter().map(|f| f.name.as_str()).collect();
                let body = format!("{}|{}", name, flags.join(","));
                Ok(HttpResponse::new(Bytes::from(body)))
            }
        })
    })
}

#[tokio::test]
async fn selection_when_request_scope_overrides_route_then_scope_wins() {
    let selection = RouteSelection::new(
        vec![vec![RouteEntry::pattern("/p", respond("baseline"))]],
        Arc::new(Unresolvable),
        None,
    )
    .unwrap();

    let response = selection
        .handle(request("/p"), RequestScope::default())
        .await
        .unwrap();
    assert_eq!(body(&response), "baseline");

    let scope = RequestScope::default()
        .with_audience(vec![RouteEntry::pattern("/p", respond("cohort"))]);
    let response = selection.handle(request("/p"), scope).await.unwrap();
    assert_eq!(body(&response), "cohort");
}

#[tokio::test]
async fn selection_when_built_from_config_then_absent_audiences_are_skipped() {
    let config: SelectionConfig = serde_json::from_value(json!({
        "audiences": [
            [
                { "pathTemplate": "/p/:id", "handler": { "value": { "page": "product" } } },
                { "pathTemplate": "/promo", "handler": { "value": { "page": "promo" } }, "isHref": true }
            ],
            null,
            [
                { "pathTemplate": "/p/*", "handler": { "value": { "page": "legacy" } }, "highPriority": true }
            ]
        ]
    }))
    .unwrap();

    let selection = RouteSelection::from_config(config, echo_resolver(), None).unwrap();
    assert_eq!(selection.audiences().len(), 2);

    let scope = RequestScope::default().with_flags(vec![Flag::new("summer", true)]);
    let response = selection.handle(request("/p/7"), scope).await.unwrap();
    assert_eq!(body(&response), "legacy|summer");

    let response = selection
        .handle(request("/promo"), RequestScope::default())
        .await
        .unwrap();
    assert_eq!(body(&response), "promo|");
}

#[tokio::test]
async fn selection_when_audiences_replaced_then_next_request_sees_new_snapshot() {
    let selection = RouteSelection::new(
        vec![vec![RouteEntry::pattern("/old", respond("old"))]],
        Arc::new(Unresolvable),
        None,
    )
    .unwrap();
    let before = selection.audiences();

    selection.replace_audiences(vec![vec![RouteEntry::pattern("/new", respond("new"))]]);

    assert_eq!(before[0][0].path_template, "/old");
    let response = selection
        .handle(request("/old"), RequestScope::default())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = selection
        .handle(request("/new"), RequestScope::default())
        .await
        .unwrap();
    assert_eq!(body(&response), "new");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn selection_when_requests_run_concurrently_then_each_gets_its_own_context() {
    let handler = HandlerRef::handler(|_req: HttpRequest, ctx: DispatchContext| async move {
        tokio::task::yield_now().await;
        let remote = ctx
            .conn
            .remote_addr
            .map(|addr| addr.port().to_string())
            .unwrap_or_default();
        let body = format!("{}:{}", ctx.param("id").unwrap_or("-"), remote);
        Ok(HttpResponse::new(Bytes::from(body)))
    });
    let selection = Arc::new(
        RouteSelection::new(
            vec![vec![RouteEntry::pattern("/items/:id", handler)]],
            Arc::new(Unresolvable),
            None,
        )
        .unwrap(),
    );

    let mut tasks = Vec::new();
    for port in 1000u16..1016 {
        let selection = selection.clone();
        tasks.push(tokio::spawn(async move {
            let conn = ConnInfo {
                local_addr: None,
                remote_addr: Some(SocketAddr::from(([127, 0, 0, 1], port))),
            };
            let uri = format!("/items/{port}");
            let response = selection
                .handle(request(&uri), RequestScope::new(conn))
                .await
                .unwrap();
            (port, body(&response))
        }));
    }

    for task in tasks {
        let (port, body) = task.await.unwrap();
        assert_eq!(body, format!("{port}:{port}"));
    }
}

#[tokio::test]
async fn selection_when_reference_is_opaque_without_resolver_then_resolution_fails() {
    let selection = RouteSelection::new(
        vec![vec![RouteEntry::pattern(
            "/cms",
            HandlerRef::resolvable(json!({ "__resolveType": "page" })),
        )]],
        Arc::new(Unresolvable),
        None,
    )
    .unwrap();

    let err = selection
        .handle(request("/cms"), RequestScope::default())
        .await
        .unwrap_err();
    assert!(err.is_resolution());
}

#[test]
fn selection_when_options_invalid_then_construction_fails() {
    let options = RouterOptions {
        high_priority_bonus: 0,
        ..Default::default()
    };

    let result = RouteSelection::new(Vec::new(), Arc::new(Unresolvable), Some(options));
    match result {
        Err(DispatchError::Options(RouterOptionsError::HighPriorityBonusInvalid { provided })) => {
            assert_eq!(provided, 0)
        }
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("expected options error"),
    }
}

#[tokio::test]
async fn selection_when_bonus_is_small_then_structural_rank_can_still_win() {
    let options = RouterOptions::builder()
        .high_priority_bonus(1)
        .build()
        .unwrap();
    let selection = RouteSelection::new(
        vec![vec![
            RouteEntry::pattern("/a/*", respond("priority")).high_priority(true),
            RouteEntry::pattern("/a/b", respond("static")),
        ]],
        Arc::new(Unresolvable),
        Some(options),
    )
    .unwrap();

    let response = selection
        .handle(request("/a/b"), RequestScope::default())
        .await
        .unwrap();
    assert_eq!(body(&response), "static");
}
