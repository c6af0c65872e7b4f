// GET /api/v1/user/home

use actix_web::test;

use crate::common::{assert_error_view, read_html};
use crate::support::auth::{auth_cookie, mint_test_token};
use crate::support::{create_test_app, memory_state, test_security};

#[actix_web::test]
async fn home_without_cookie_is_401() {
    let (state, _store) = memory_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/v1/user/home").to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_view(resp, 401, "UNAUTHORIZED", "Authorization token not provided").await;
}

#[actix_web::test]
async fn home_lists_every_user_and_escapes_names() {
    let (state, _store) = memory_state().await;
    state.users.register("alice", "pw").await.unwrap();
    state.users.register("<b>bob</b>", "pw").await.unwrap();
    let app = create_test_app(state).with_prod_routes().build().await;

    let token = mint_test_token(1, "alice", &test_security());
    let req = test::TestRequest::get()
        .uri("/api/v1/user/home")
        .cookie(auth_cookie(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = read_html(resp).await;
    assert!(body.contains("Welcome, alice"));
    assert!(body.contains("<td>1</td><td>alice</td>"));
    assert!(body.contains("&lt;b&gt;bob&lt;/b&gt;"));
    assert!(!body.contains("<b>bob</b>"));
    assert!(body.contains("action=\"/api/v1/user/add\""));
}

#[actix_web::test]
async fn storage_failure_is_500() {
    let (state, store) = memory_state().await;
    store.set_failing(true);
    let app = create_test_app(state).with_prod_routes().build().await;

    let token = mint_test_token(1, "alice", &test_security());
    let req = test::TestRequest::get()
        .uri("/api/v1/user/home")
        .cookie(auth_cookie(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_view(resp, 500, "DB_ERROR", "Failed to load users").await;
}
