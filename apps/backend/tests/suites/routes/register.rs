// POST /api/v1/user/register

use actix_web::test;
use backend::auth::jwt::verify_access_token;
use time::Duration;

use crate::common::{assert_error_view, has_set_cookie, location, session_token};
use crate::support::{create_test_app, memory_state, sqlite_state, test_security};

#[actix_web::test]
async fn register_sets_cookie_and_redirects_home() {
    let state = sqlite_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/register")
        .set_form([("username", "alice"), ("password", "pw1")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp).as_deref(), Some("/api/v1/user/home"));

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "Authorization")
        .expect("session cookie");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));

    let claims = verify_access_token(cookie.value(), &test_security()).unwrap();
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.user_id(), Some(1));
}

#[actix_web::test]
async fn duplicate_username_is_400_and_keeps_one_row() {
    let state = sqlite_state().await;
    let app = create_test_app(state.clone()).with_prod_routes().build().await;

    let first = test::TestRequest::post()
        .uri("/api/v1/user/register")
        .set_form([("username", "alice"), ("password", "pw1")])
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status().as_u16(), 303);

    let second = test::TestRequest::post()
        .uri("/api/v1/user/register")
        .set_form([("username", "alice"), ("password", "other")])
        .to_request();
    let resp = test::call_service(&app, second).await;
    assert!(!has_set_cookie(&resp));
    assert_error_view(resp, 400, "DUPLICATE_USER", "user already exists").await;

    let users = state.users.list_all().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "alice");
}

#[actix_web::test]
async fn invalid_input_is_400_without_cookie() {
    let (state, store) = memory_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let cases: [(&[(&str, &str)], &str); 3] = [
        (&[("username", "   "), ("password", "pw")], "Username is required"),
        (&[("username", "bob")], "Password is required"),
        (&[], "Username is required"),
    ];

    for (fields, detail) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/user/register")
            .set_form(fields)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(session_token(&resp).is_none());
        assert_error_view(resp, 400, "VALIDATION_ERROR", detail).await;
    }

    assert_eq!(store.create_calls(), 0);
}

#[actix_web::test]
async fn storage_failure_is_400_with_message() {
    let (state, store) = memory_state().await;
    store.set_failing(true);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/register")
        .set_form([("username", "carol"), ("password", "pw")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_view(resp, 400, "DB_UNAVAILABLE", "store offline").await;
}

#[actix_web::test]
async fn non_form_body_is_400() {
    let (state, _store) = memory_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/register")
        .set_json(serde_json::json!({"username": "dave", "password": "pw"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
}
