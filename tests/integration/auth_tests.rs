//! Session handling: login, token injection, forced logout on 401

use serde_json::json;

use hotel_desk::{
    error::AppError,
    guard::GuardDecision,
    models::{Credentials, Room, User},
    navigation::Route,
    storage::{SETTINGS_KEY, TOKEN_KEY, USER_KEY},
};

use crate::support::{admin_user, StubBackend};

fn staff_user() -> serde_json::Value {
    json!({ "id": 2, "username": "letan", "vai_tro": "staff" })
}

#[tokio::test]
async fn test_login_stores_session_and_opens_dashboard() {
    let stub = StubBackend::start().await;
    stub.on(
        "POST",
        "auth/login",
        200,
        json!({ "token": "t-123", "user": admin_user() }),
    );
    let app = stub.app();
    app.navigator.navigate(Route::Login);

    let user = app
        .services
        .auth
        .login(&Credentials::new("admin", "secret"))
        .await
        .unwrap();

    assert_eq!(user.username, "admin");
    assert_eq!(app.storage.token().unwrap(), Some("t-123".to_string()));
    let stored: Option<User> = app.storage.user().unwrap();
    assert_eq!(stored.map(|u| u.id), Some(1));
    assert_eq!(app.navigator.current(), Route::Dashboard);

    let request = stub.last("POST", "auth/login").unwrap();
    assert_eq!(request.body["username"], "admin");
    assert_eq!(request.body["password"], "secret");
    assert_eq!(request.authorization, None);
}

#[tokio::test]
async fn test_login_with_empty_password_sends_nothing() {
    let stub = StubBackend::start().await;
    let app = stub.app();

    let result = app.services.auth.login(&Credentials::new("admin", "")).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(app.services.auth.state().error.is_some());
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_rejected_login_stays_on_login_screen() {
    let stub = StubBackend::start().await;
    stub.on(
        "POST",
        "auth/login",
        401,
        json!({ "message": "Invalid credentials" }),
    );
    let app = stub.app();
    app.navigator.navigate(Route::Login);

    let result = app
        .services
        .auth
        .login(&Credentials::new("admin", "wrong"))
        .await;

    assert!(matches!(result, Err(AppError::Authentication(_))));
    assert_eq!(app.navigator.current(), Route::Login);
    assert_eq!(
        app.services.auth.state().error.as_deref(),
        Some("Tên đăng nhập hoặc mật khẩu không đúng")
    );
}

#[tokio::test]
async fn test_bearer_token_read_from_storage_on_each_request() {
    let stub = StubBackend::start().await;
    stub.on("GET", "rooms", 200, json!([]));
    let app = stub.app();

    app.repository.rooms.list().await.unwrap();
    app.storage.set_token("abc").unwrap();
    app.repository.rooms.list().await.unwrap();

    let requests = stub.requests();
    assert_eq!(requests[0].authorization, None);
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer abc"));
}

#[tokio::test]
async fn test_unauthorized_response_clears_session_and_redirects() {
    let stub = StubBackend::start().await;
    stub.on("GET", "rooms", 401, json!({ "message": "Token expired" }));
    let app = stub.app();
    app.storage.set_token("stale").unwrap();
    app.storage.set_user(&admin_user()).unwrap();
    app.navigator.navigate(Route::Rooms);

    let result: Result<Vec<Room>, _> = app.repository.rooms.list().await;

    match result {
        Err(AppError::Authentication(msg)) => assert_eq!(msg, "Token expired"),
        other => panic!("expected authentication error, got {:?}", other.is_ok()),
    }
    assert_eq!(app.storage.get_item(TOKEN_KEY).unwrap(), None);
    assert_eq!(app.storage.get_item(USER_KEY).unwrap(), None);
    assert_eq!(app.navigator.current(), Route::Login);
}

#[tokio::test]
async fn test_init_without_token_is_anonymous() {
    let stub = StubBackend::start().await;
    let app = stub.app();

    let state = app.services.auth.init().await;

    assert!(!state.loading);
    assert!(state.user.is_none());
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_init_keeps_cached_user_when_backend_fails() {
    let stub = StubBackend::start().await;
    stub.on("GET", "auth/profile", 500, json!({ "message": "boom" }));
    let app = stub.app();
    app.storage.set_token("t").unwrap();
    app.storage.set_user(&admin_user()).unwrap();

    let state = app.services.auth.init().await;

    assert_eq!(state.user.map(|u| u.username), Some("admin".to_string()));
    assert_eq!(app.storage.token().unwrap(), Some("t".to_string()));
}

#[tokio::test]
async fn test_init_drops_session_on_unauthorized_profile() {
    let stub = StubBackend::start().await;
    stub.on("GET", "auth/profile", 401, json!({}));
    let app = stub.app();
    app.storage.set_token("t").unwrap();
    app.storage.set_user(&admin_user()).unwrap();

    let state = app.services.auth.init().await;

    assert!(state.user.is_none());
    assert_eq!(app.storage.token().unwrap(), None);
}

#[tokio::test]
async fn test_init_refreshes_user_from_profile() {
    let stub = StubBackend::start().await;
    stub.on(
        "GET",
        "auth/profile",
        200,
        json!({ "user": { "id": 1, "username": "admin", "vai_tro": "manager" } }),
    );
    let app = stub.app();
    app.storage.set_token("t").unwrap();
    app.storage.set_user(&admin_user()).unwrap();

    let state = app.services.auth.init().await;

    assert_eq!(state.user.as_ref().map(|u| u.role()), Some("manager"));
    let stored: Option<User> = app.storage.user().unwrap();
    assert_eq!(stored.map(|u| u.vai_tro), Some("manager".to_string()));
}

#[tokio::test]
async fn test_staff_denied_management_route() {
    let stub = StubBackend::start().await;
    stub.on("GET", "auth/profile", 200, staff_user());
    let app = stub.app();
    app.storage.set_token("t").unwrap();

    let state = app.services.auth.init().await;

    assert_eq!(
        app.navigator.enter(Route::Statistics, &state),
        GuardDecision::AccessDenied
    );
    assert_eq!(app.navigator.enter(Route::Rooms, &state), GuardDecision::Render);
    assert_eq!(app.navigator.current(), Route::Rooms);
}

#[tokio::test]
async fn test_logout_clears_storage() {
    let stub = StubBackend::start().await;
    let app = stub.app();
    app.storage.set_token("t").unwrap();
    app.storage.set_user(&admin_user()).unwrap();

    app.services.auth.logout().unwrap();

    assert_eq!(app.storage.token().unwrap(), None);
    assert_eq!(app.navigator.current(), Route::Login);
}

#[tokio::test]
async fn test_forced_logout_drops_the_auth_context() {
    let stub = StubBackend::start().await;
    stub.on("GET", "auth/profile", 200, admin_user())
        .on("GET", "rooms", 401, json!({ "message": "Token expired" }));
    let app = stub.app();
    app.storage.set_token("t").unwrap();
    let auth = &app.services.auth;
    assert!(auth.init().await.is_authenticated());
    app.navigator.navigate(Route::Rooms);

    let _ = app.repository.rooms.list().await;

    assert!(auth.state().user.is_none());
    assert_eq!(
        app.navigator.enter(Route::Rooms, &auth.state()),
        GuardDecision::RedirectToLogin
    );
    assert_eq!(app.navigator.current(), Route::Login);
}

#[tokio::test]
async fn test_user_written_without_token_is_ignored() {
    let stub = StubBackend::start().await;
    let app = stub.app();
    app.services.auth.init().await;

    app.storage.set_user(&admin_user()).unwrap();

    assert!(!app.services.auth.is_authenticated());
}

#[tokio::test]
async fn test_settings_written_elsewhere_reach_the_running_app() {
    let stub = StubBackend::start().await;
    let app = stub.app();
    assert!(!app.services.settings.current().compact_mode);

    app.storage
        .set_item(SETTINGS_KEY, r#"{"compactMode":true}"#)
        .unwrap();

    tokio::time::timeout(std::time::Duration::from_secs(2), async {
        while !app.services.settings.current().compact_mode {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("settings watcher did not reload");
}
