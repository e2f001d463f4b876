//! Middleware pipelines driven end to end without a network.

mod common;

use std::collections::HashSet;

use gatehouse::middleware::{
    Chain, Middleware, authenticate, logged_authentication, request_logger,
    request_response_logger, require_roles,
};
use gatehouse::{Method, Request, Response, Role, Router, Status};

use common::capture_logs;

fn resource_router() -> Router {
    let chain = Chain::new()
        .with(request_response_logger())
        .with(authenticate())
        .with(require_roles([Role::Root]));

    Router::new().on(
        Method::Get,
        "/resource",
        chain.apply(|_req: Request| async { Response::text("ok") }),
    )
}

#[tokio::test]
async fn logger_replays_recorded_response_and_logs_status_once() {
    let (logs, _guard) = capture_logs();

    let handler = request_response_logger().apply(|_req: Request| async {
        Response::builder().status(Status::Created).text("created")
    });
    let res = handler.call(Request::new(Method::Post, "/things")).await;

    assert_eq!(res.status_code(), 201);
    assert_eq!(res.body(), b"created");
    assert_eq!(res.header_value("content-type"), Some("text/plain; charset=utf-8"));
    assert_eq!(logs.count("status=201"), 1, "{:#?}", logs.lines());
    assert_eq!(logs.count("method=POST path=/things"), 1);
}

#[tokio::test]
async fn root_reaches_root_only_resource() {
    let (logs, _guard) = capture_logs();

    let req = Request::new(Method::Get, "/resource").header("Authorization", "Bearer 1");
    let res = resource_router().handle(req).await;

    assert_eq!(res.status_code(), 200);
    assert_eq!(res.body(), b"ok");
    assert_eq!(logs.count("method=GET path=/resource"), 1, "{:#?}", logs.lines());
    assert_eq!(logs.count("status=200"), 1);
}

#[tokio::test]
async fn superuser_is_refused_and_the_refusal_is_logged() {
    let (logs, _guard) = capture_logs();

    let req = Request::new(Method::Get, "/resource").header("Authorization", "Bearer 42");
    let res = resource_router().handle(req).await;

    assert_eq!(res.status_code(), 401);
    assert_eq!(res.body(), b"Unauthorized");
    assert_eq!(logs.count("status=401"), 1);
    assert_eq!(logs.count("authorization denied"), 1);
    assert!(logs.lines().iter().any(|l| l.contains("user_id=\"42\"") || l.contains("user_id=42")));
}

#[tokio::test]
async fn authentication_and_authorization_failures_look_identical() {
    let router = resource_router();

    let missing = router.handle(Request::new(Method::Get, "/resource")).await;
    let malformed = router
        .handle(Request::new(Method::Get, "/resource").header("Authorization", "Bearer abc"))
        .await;
    let forbidden_role = router
        .handle(Request::new(Method::Get, "/resource").header("Authorization", "Bearer 500"))
        .await;

    for res in [&missing, &malformed, &forbidden_role] {
        assert_eq!(res.status_code(), 401);
        assert_eq!(res.body(), b"Unauthorized");
    }
}

#[tokio::test]
async fn request_logger_logs_without_status() {
    let (logs, _guard) = capture_logs();

    let handler = request_logger().apply(|_req: Request| async { Status::NoContent });
    let res = handler.call(Request::new(Method::Delete, "/things/1")).await;

    assert_eq!(res.status_code(), 204);
    assert_eq!(logs.count("method=DELETE path=/things/1"), 1);
    assert_eq!(logs.count("status="), 0);
}

#[tokio::test]
async fn request_logger_includes_the_query_string() {
    let (logs, _guard) = capture_logs();

    let handler = request_logger().apply(|req: Request| async move {
        req.query().unwrap_or_default().to_owned()
    });
    let res = handler.call(Request::new(Method::Get, "/search?q=rust&page=2")).await;

    assert_eq!(res.body(), b"q=rust&page=2");
    assert_eq!(logs.count("method=GET path=/search?q=rust&page=2"), 1, "{:#?}", logs.lines());
}

#[tokio::test]
async fn preset_chain_logs_before_authenticating() {
    let (logs, _guard) = capture_logs();

    let handler = logged_authentication().apply(|_req: Request| async { "hidden" });
    let res = handler.call(Request::new(Method::Get, "/secret")).await;

    assert_eq!(res.status_code(), 401);
    assert_eq!(logs.count("method=GET path=/secret"), 1);
    assert_eq!(logs.count("status=401"), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_each_see_their_own_identity() {
    let handler = authenticate().apply(|req: Request| async move {
        let id = req.context().identity().map(|id| id.to_string()).unwrap_or_default();
        let role = req.context().role().map(|r| r.to_string()).unwrap_or_default();
        format!("{id}:{role}")
    });

    let mut tasks = tokio::task::JoinSet::new();
    for id in 1..=300u32 {
        let handler = handler.clone();
        tasks.spawn(async move {
            let req = Request::new(Method::Get, "/").header("authorization", &format!("Bearer {id}"));
            (id, handler.call(req).await)
        });
    }

    let mut seen = HashSet::new();
    while let Some(joined) = tasks.join_next().await {
        let (id, res) = joined.unwrap();
        let expected = format!("{id}:{}", Role::classify(u64::from(id)));
        assert_eq!(String::from_utf8_lossy(res.body()), expected);
        seen.insert(id);
    }
    assert_eq!(seen.len(), 300);
}

#[tokio::test]
async fn chain_is_reusable_across_routes() {
    let shared = Chain::new().with(authenticate());
    let router = Router::new()
        .on(Method::Get, "/a", shared.apply(|_req: Request| async { "a" }))
        .on(Method::Get, "/b", shared.apply(|_req: Request| async { "b" }));

    let a = router
        .handle(Request::new(Method::Get, "/a").header("authorization", "Bearer 9"))
        .await;
    let b = router
        .handle(Request::new(Method::Get, "/b").header("authorization", "Bearer 9"))
        .await;

    assert_eq!(a.body(), b"a");
    assert_eq!(b.body(), b"b");
}
