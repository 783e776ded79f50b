//! Registration, login, refresh, and profile flows.

use http::StatusCode;
use sqlx::PgPool;

use crate::helpers;

#[sqlx::test(migrations = "./migrations")]
async fn register_returns_user_and_token_pair(pool: PgPool) {
    let app = helpers::build_app(pool);

    let res = helpers::post_json(
        &app,
        "/api/auth/register",
        None,
        serde_json::json!({
            "email": "dev@example.com",
            "display_name": "Dev",
            "password": "correct-horse-battery",
        }),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
    let data = res.data();
    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());
    assert_eq!(data["user"]["email"], "dev@example.com");
    assert_eq!(data["user"]["display_name"], "Dev");
    assert!(data["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_email_conflicts_case_insensitively(pool: PgPool) {
    let app = helpers::build_app(pool);
    helpers::register_user(&app, "Dev@Example.com", "Dev").await;

    let res = helpers::post_json(
        &app,
        "/api/auth/register",
        None,
        serde_json::json!({
            "email": "dev@example.com",
            "display_name": "Impostor",
            "password": "another-password-1",
        }),
    )
    .await;

    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["error"], "CONFLICT");
}

#[sqlx::test(migrations = "./migrations")]
async fn short_password_is_rejected_before_any_write(pool: PgPool) {
    let app = helpers::build_app(pool.clone());

    let res = helpers::post_json(
        &app,
        "/api/auth/register",
        None,
        serde_json::json!({
            "email": "dev@example.com",
            "display_name": "Dev",
            "password": "short",
        }),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(users, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn login_with_wrong_password_is_unauthorized(pool: PgPool) {
    let app = helpers::build_app(pool);
    helpers::register_user(&app, "dev@example.com", "Dev").await;

    let res = helpers::post_json(
        &app,
        "/api/auth/login",
        None,
        serde_json::json!({"email": "dev@example.com", "password": "wrong-password!"}),
    )
    .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_email_gets_the_same_error_as_wrong_password(pool: PgPool) {
    let app = helpers::build_app(pool);
    helpers::register_user(&app, "dev@example.com", "Dev").await;

    let wrong_pw = helpers::post_json(
        &app,
        "/api/auth/login",
        None,
        serde_json::json!({"email": "dev@example.com", "password": "wrong-password!"}),
    )
    .await;
    let unknown = helpers::post_json(
        &app,
        "/api/auth/login",
        None,
        serde_json::json!({"email": "ghost@example.com", "password": "wrong-password!"}),
    )
    .await;

    assert_eq!(wrong_pw.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw.body["message"], unknown.body["message"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn refresh_exchanges_a_refresh_token_for_a_new_pair(pool: PgPool) {
    let app = helpers::build_app(pool);

    let res = helpers::post_json(
        &app,
        "/api/auth/register",
        None,
        serde_json::json!({
            "email": "dev@example.com",
            "display_name": "Dev",
            "password": "correct-horse-battery",
        }),
    )
    .await;
    let refresh_token = res.data()["refresh_token"].as_str().unwrap().to_string();

    let res = helpers::post_json(
        &app,
        "/api/auth/refresh",
        None,
        serde_json::json!({"refresh_token": refresh_token}),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.data()["access_token"].is_string());
    assert!(res.data()["refresh_token"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn access_token_is_rejected_on_the_refresh_path(pool: PgPool) {
    let app = helpers::build_app(pool);
    let access = helpers::register_user(&app, "dev@example.com", "Dev").await;

    let res = helpers::post_json(
        &app,
        "/api/auth/refresh",
        None,
        serde_json::json!({"refresh_token": access}),
    )
    .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn me_requires_authentication(pool: PgPool) {
    let app = helpers::build_app(pool);

    let missing = helpers::get(&app, "/api/auth/me", None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = helpers::get(&app, "/api/auth/me", Some("not-a-jwt")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn me_returns_the_caller_profile(pool: PgPool) {
    let app = helpers::build_app(pool);
    let token = helpers::register_user(&app, "dev@example.com", "Dev").await;

    let res = helpers::get(&app, "/api/auth/me", Some(&token)).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["email"], "dev@example.com");
}

#[sqlx::test(migrations = "./migrations")]
async fn update_profile_changes_the_display_name(pool: PgPool) {
    let app = helpers::build_app(pool);
    let token = helpers::register_user(&app, "dev@example.com", "Dev").await;

    let res = helpers::put_json(
        &app,
        "/api/users/me",
        Some(&token),
        serde_json::json!({"display_name": "Jordan Q. Developer"}),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["display_name"], "Jordan Q. Developer");
}
