use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use nuar::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // A single connection keeps every statement on the same in-memory db.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.server.secure_cookies = false;

    let state = nuar::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    nuar::api::router(state).await
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Expected a Set-Cookie header")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user and return the session cookie from the response.
async fn register(app: &Router, username: &str, email: &str, password: &str) -> String {
    let response = send(
        app,
        "POST",
        "/api/register",
        Some(serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        })),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

async fn add_favorite(
    app: &Router,
    cookie: &str,
    item_id: i64,
    title: &str,
    category: &str,
) -> Response<Body> {
    send(
        app,
        "POST",
        "/api/favorites/add",
        Some(serde_json::json!({
            "item_id": item_id,
            "title": title,
            "year": "2020",
            "rating": "8.0",
            "image": "x.jpg",
            "category": category,
        })),
        Some(cookie),
    )
    .await
}

#[tokio::test]
async fn test_register_establishes_session() {
    let app = spawn_app().await;

    let response = send(
        &app,
        "POST",
        "/api/register",
        Some(serde_json::json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "hunter2",
        })),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["user"]["username"], "alice");
    assert_eq!(json["user"]["email"], "alice@example.com");
    assert!(json["user"].get("password").is_none());

    let response = send(&app, "GET", "/api/check-auth", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["authenticated"], true);
    assert_eq!(json["username"], "alice");
    assert_eq!(json["email"], "alice@example.com");
}

#[tokio::test]
async fn test_register_then_login_same_summary() {
    let app = spawn_app().await;
    register(&app, "bob", "bob@example.com", "secret123").await;

    let response = send(
        &app,
        "POST",
        "/api/login",
        Some(serde_json::json!({
            "email": "bob@example.com",
            "password": "secret123",
        })),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["user"]["username"], "bob");
    assert_eq!(json["user"]["email"], "bob@example.com");
}

#[tokio::test]
async fn test_register_rejects_missing_fields() {
    let app = spawn_app().await;

    let response = send(
        &app,
        "POST",
        "/api/register",
        Some(serde_json::json!({ "username": "carol" })),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_register_rejects_duplicates() {
    let app = spawn_app().await;
    register(&app, "dave", "dave@example.com", "pw123456").await;

    // Same email, different username
    let response = send(
        &app,
        "POST",
        "/api/register",
        Some(serde_json::json!({
            "username": "dave2",
            "email": "dave@example.com",
            "password": "pw123456",
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Same username, different email
    let response = send(
        &app,
        "POST",
        "/api/register",
        Some(serde_json::json!({
            "username": "dave",
            "email": "dave2@example.com",
            "password": "pw123456",
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = spawn_app().await;
    register(&app, "erin", "erin@example.com", "rightpass").await;

    let wrong_password = send(
        &app,
        "POST",
        "/api/login",
        Some(serde_json::json!({
            "email": "erin@example.com",
            "password": "wrongpass",
        })),
        None,
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(wrong_password).await;

    let unknown_email = send(
        &app,
        "POST",
        "/api/login",
        Some(serde_json::json!({
            "email": "nobody@example.com",
            "password": "rightpass",
        })),
        None,
    )
    .await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email = body_json(unknown_email).await;

    assert_eq!(wrong_password["error"], unknown_email["error"]);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = spawn_app().await;
    let cookie = register(&app, "frank", "frank@example.com", "pw123456").await;

    let response = send(&app, "POST", "/api/logout", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    let response = send(&app, "GET", "/api/check-auth", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["authenticated"], false);
    assert!(json.get("username").is_none());

    // Logging out again is fine.
    let response = send(&app, "POST", "/api/logout", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_check_auth_without_session() {
    let app = spawn_app().await;

    let response = send(&app, "GET", "/api/check-auth", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["authenticated"], false);
}

#[tokio::test]
async fn test_favorites_require_login() {
    let app = spawn_app().await;

    let response = send(
        &app,
        "POST",
        "/api/favorites/add",
        Some(serde_json::json!({ "item_id": 1, "category": "movie" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, "GET", "/api/favorites", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, "DELETE", "/api/favorites/remove/1", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The check endpoint fails open instead of demanding a session.
    let response = send(&app, "GET", "/api/favorites/check/movie/1", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["favorited"], false);
}

#[tokio::test]
async fn test_add_favorite_requires_item_id() {
    let app = spawn_app().await;
    let cookie = register(&app, "gina", "gina@example.com", "pw123456").await;

    let response = send(
        &app,
        "POST",
        "/api/favorites/add",
        Some(serde_json::json!({ "title": "No id", "category": "movie" })),
        Some(&cookie),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_favorite_rejects_duplicate_per_category() {
    let app = spawn_app().await;
    let cookie = register(&app, "hank", "hank@example.com", "pw123456").await;

    let response = add_favorite(&app, &cookie, 42, "X", "movie").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Same item, same category: conflict.
    let response = add_favorite(&app, &cookie, 42, "X", "movie").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Same item, different category: fine.
    let response = add_favorite(&app, &cookie, 42, "X", "anime").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_favorites_partitions_by_category() {
    let app = spawn_app().await;
    let cookie = register(&app, "iris", "iris@example.com", "pw123456").await;

    assert_eq!(
        add_favorite(&app, &cookie, 1, "First Movie", "movie").await.status(),
        StatusCode::OK
    );
    assert_eq!(
        add_favorite(&app, &cookie, 2, "Second Movie", "movie").await.status(),
        StatusCode::OK
    );
    assert_eq!(
        add_favorite(&app, &cookie, 3, "A Series", "series").await.status(),
        StatusCode::OK
    );
    assert_eq!(
        add_favorite(&app, &cookie, 4, "An Anime", "anime").await.status(),
        StatusCode::OK
    );

    let response = send(&app, "GET", "/api/favorites", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["movies"].as_array().unwrap().len(), 2);
    assert_eq!(json["series"].as_array().unwrap().len(), 1);
    assert_eq!(json["animes"].as_array().unwrap().len(), 1);

    // Newest first within each group.
    assert_eq!(json["movies"][0]["item_id"], 2);
    assert_eq!(json["movies"][1]["item_id"], 1);

    assert_eq!(json["series"][0]["title"], "A Series");
    assert_eq!(json["series"][0]["year"], "2020");
    assert_eq!(json["series"][0]["rating"], "8.0");
    assert_eq!(json["series"][0]["image"], "x.jpg");
}

#[tokio::test]
async fn test_list_drops_unrecognized_categories() {
    let app = spawn_app().await;
    let cookie = register(&app, "judy", "judy@example.com", "pw123456").await;

    // The add endpoint stores the category verbatim...
    let response = add_favorite(&app, &cookie, 7, "Um Filme", "filme").await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = add_favorite(&app, &cookie, 8, "A Movie", "movie").await;
    assert_eq!(response.status(), StatusCode::OK);

    // ...but listing only surfaces the closed enumeration.
    let response = send(&app, "GET", "/api/favorites", None, Some(&cookie)).await;
    let json = body_json(response).await;

    assert_eq!(json["movies"].as_array().unwrap().len(), 1);
    assert_eq!(json["movies"][0]["item_id"], 8);
    assert_eq!(json["series"].as_array().unwrap().len(), 0);
    assert_eq!(json["animes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_remove_favorite_spans_categories() {
    let app = spawn_app().await;
    let cookie = register(&app, "kate", "kate@example.com", "pw123456").await;

    add_favorite(&app, &cookie, 42, "X", "movie").await;
    add_favorite(&app, &cookie, 42, "X", "anime").await;
    add_favorite(&app, &cookie, 43, "Y", "movie").await;

    let response = send(
        &app,
        "DELETE",
        "/api/favorites/remove/42",
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/api/favorites", None, Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["movies"].as_array().unwrap().len(), 1);
    assert_eq!(json["movies"][0]["item_id"], 43);
    assert_eq!(json["animes"].as_array().unwrap().len(), 0);

    // Nothing left to remove.
    let response = send(
        &app,
        "DELETE",
        "/api/favorites/remove/42",
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_is_scoped_to_the_user() {
    let app = spawn_app().await;
    let kate = register(&app, "kate2", "kate2@example.com", "pw123456").await;
    let liam = register(&app, "liam", "liam@example.com", "pw123456").await;

    add_favorite(&app, &kate, 42, "X", "movie").await;

    // Liam cannot remove Kate's favorite.
    let response = send(&app, "DELETE", "/api/favorites/remove/42", None, Some(&liam)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/api/favorites", None, Some(&kate)).await;
    let json = body_json(response).await;
    assert_eq!(json["movies"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_check_favorite_lifecycle() {
    let app = spawn_app().await;
    let cookie = register(&app, "mona", "mona@example.com", "pw123456").await;

    let response = send(
        &app,
        "GET",
        "/api/favorites/check/movie/42",
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["favorited"], false);
    assert!(json.get("fav_id").is_none());

    add_favorite(&app, &cookie, 42, "X", "movie").await;

    let response = send(
        &app,
        "GET",
        "/api/favorites/check/movie/42",
        None,
        Some(&cookie),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["favorited"], true);
    assert!(json["fav_id"].is_i64());

    // The check is per category.
    let response = send(
        &app,
        "GET",
        "/api/favorites/check/anime/42",
        None,
        Some(&cookie),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["favorited"], false);

    send(
        &app,
        "DELETE",
        "/api/favorites/remove/42",
        None,
        Some(&cookie),
    )
    .await;

    let response = send(
        &app,
        "GET",
        "/api/favorites/check/movie/42",
        None,
        Some(&cookie),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["favorited"], false);
}
