mod common;

use admissions_coach::models::question::BUILTIN_QUESTIONS;
use axum::http::{header, StatusCode};
use tower::ServiceExt;

use common::{body_json, body_string, get, post_form, post_json, session_cookie, StubGenerator};

#[tokio::test]
async fn test_get_session_initializes_with_bank_question() {
    let (app, _) = common::create_test_app(StubGenerator::replying("OK"), &[2]);

    let response = app.oneshot(get("/api/v1/session", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_some());

    let json = body_json(response).await;
    assert_eq!(json["question"]["text"], BUILTIN_QUESTIONS[2].0);
    assert_eq!(json["question"]["hint"], BUILTIN_QUESTIONS[2].1);
    assert!(json["session_id"].as_str().is_some());
}

#[tokio::test]
async fn test_repeated_reads_keep_the_same_question() {
    let (app, state) = common::create_test_app(StubGenerator::replying("OK"), &[1, 3, 0]);

    let first = app
        .clone()
        .oneshot(get("/api/v1/session", None))
        .await
        .unwrap();
    let cookie = session_cookie(&first).unwrap();
    let first = body_json(first).await;

    for _ in 0..3 {
        let again = app
            .clone()
            .oneshot(get("/api/v1/session", Some(&cookie)))
            .await
            .unwrap();
        let again = body_json(again).await;
        assert_eq!(again["session_id"], first["session_id"]);
        assert_eq!(again["question"], first["question"]);
    }
    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn test_shuffle_replaces_question() {
    let (app, _) = common::create_test_app(StubGenerator::replying("OK"), &[0, 3]);

    let first = app
        .clone()
        .oneshot(get("/api/v1/session", None))
        .await
        .unwrap();
    let cookie = session_cookie(&first).unwrap();
    assert_eq!(body_json(first).await["question"]["text"], BUILTIN_QUESTIONS[0].0);

    let shuffled = app
        .clone()
        .oneshot(post_json(
            "/api/v1/session/shuffle",
            Some(&cookie),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(shuffled.status(), StatusCode::OK);
    assert_eq!(
        body_json(shuffled).await["question"]["text"],
        BUILTIN_QUESTIONS[3].0
    );

    let after = app
        .oneshot(get("/api/v1/session", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(body_json(after).await["question"]["text"], BUILTIN_QUESTIONS[3].0);
}

#[tokio::test]
async fn test_separate_cookies_are_separate_sessions() {
    let (app, state) = common::create_test_app(StubGenerator::replying("OK"), &[0, 1, 2]);

    let a = app
        .clone()
        .oneshot(get("/api/v1/session", None))
        .await
        .unwrap();
    let b = app
        .clone()
        .oneshot(get("/api/v1/session", None))
        .await
        .unwrap();
    let cookie_a = session_cookie(&a).unwrap();
    let cookie_b = session_cookie(&b).unwrap();
    assert_ne!(cookie_a, cookie_b);

    app.clone()
        .oneshot(post_json(
            "/api/v1/session/shuffle",
            Some(&cookie_a),
            serde_json::json!({}),
        ))
        .await
        .unwrap();

    let b_after = app
        .oneshot(get("/api/v1/session", Some(&cookie_b)))
        .await
        .unwrap();
    assert_eq!(body_json(b_after).await["question"]["text"], BUILTIN_QUESTIONS[1].0);
    assert_eq!(state.sessions.len(), 2);
}

#[tokio::test]
async fn test_garbage_cookie_starts_new_session() {
    let (app, _) = common::create_test_app(StubGenerator::replying("OK"), &[0]);

    let response = app
        .oneshot(get("/api/v1/session", Some("coach_session=not-a-uuid")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).unwrap();
    assert_ne!(cookie, "coach_session=not-a-uuid");
}

#[tokio::test]
async fn test_page_shows_question_and_hint() {
    let (app, _) = common::create_test_app(StubGenerator::replying("OK"), &[0]);

    let response = app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(response
        .headers()
        .get(header::CONTENT_SECURITY_POLICY)
        .is_some());
    assert!(session_cookie(&response).is_some());

    let html = body_string(response).await;
    assert!(html.contains("AI Admissions Coach"));
    assert!(html.contains("best&#32;friend"));
    assert!(html.contains("<strong>What they are really asking:</strong>"));
    assert!(html.contains("Shuffle Question"));
}

#[tokio::test]
async fn test_page_shuffle_redirects_home() {
    let (app, _) = common::create_test_app(StubGenerator::replying("OK"), &[0, 2]);

    let page = app.clone().oneshot(get("/", None)).await.unwrap();
    let cookie = session_cookie(&page).unwrap();

    let response = app
        .clone()
        .oneshot(post_form("/shuffle", Some(&cookie), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    let page = app.oneshot(get("/", Some(&cookie))).await.unwrap();
    let html = body_string(page).await;
    assert!(html.contains("changed&#32;your&#32;mind"));
}

#[tokio::test]
async fn test_trace_id_echoed() {
    let (app, _) = common::create_test_app(StubGenerator::replying("OK"), &[0]);

    let request = axum::http::Request::builder()
        .uri("/health")
        .header("x-trace-id", "trace-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers().get("x-trace-id").unwrap(), "trace-123");
}
