//! Project CRUD and ownership enforcement.

use http::StatusCode;
use sqlx::PgPool;

use crate::helpers;

#[sqlx::test(migrations = "./migrations")]
async fn created_projects_are_listed_newest_first(pool: PgPool) {
    let app = helpers::build_app(pool);
    let token = helpers::register_user(&app, "dev@example.com", "Dev").await;

    helpers::create_project(&app, &token, "First").await;
    helpers::create_project(&app, &token, "Second").await;

    let res = helpers::get(&app, "/api/projects", Some(&token)).await;
    assert_eq!(res.status, StatusCode::OK);

    let projects = res.data().as_array().expect("array").clone();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["name"], "Second");
    assert_eq!(projects[1]["name"], "First");
}

#[sqlx::test(migrations = "./migrations")]
async fn malformed_url_is_rejected_and_nothing_is_written(pool: PgPool) {
    let app = helpers::build_app(pool.clone());
    let token = helpers::register_user(&app, "dev@example.com", "Dev").await;

    let res = helpers::post_json(
        &app,
        "/api/projects",
        Some(&token),
        serde_json::json!({
            "name": "Demo",
            "client": "Acme",
            "project_url": "not a url",
            "github_url": "https://github.com/x/demo",
        }),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "VALIDATION_ERROR");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_rewrites_all_fields(pool: PgPool) {
    let app = helpers::build_app(pool);
    let token = helpers::register_user(&app, "dev@example.com", "Dev").await;
    let id = helpers::create_project(&app, &token, "Demo").await;

    let res = helpers::put_json(
        &app,
        &format!("/api/projects/{id}"),
        Some(&token),
        serde_json::json!({
            "name": "Demo v2",
            "client": "Globex",
            "project_url": "https://v2.globex.com",
            "github_url": "https://github.com/x/demo-v2",
        }),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["name"], "Demo v2");
    assert_eq!(res.data()["client"], "Globex");
}

#[sqlx::test(migrations = "./migrations")]
async fn another_users_project_is_not_found_not_forbidden(pool: PgPool) {
    let app = helpers::build_app(pool);
    let owner = helpers::register_user(&app, "owner@example.com", "Owner").await;
    let intruder = helpers::register_user(&app, "intruder@example.com", "Intruder").await;
    let id = helpers::create_project(&app, &owner, "Private").await;

    let update = helpers::put_json(
        &app,
        &format!("/api/projects/{id}"),
        Some(&intruder),
        serde_json::json!({
            "name": "Hijacked",
            "client": "Evil Corp",
            "project_url": "https://evil.example.com",
            "github_url": "https://github.com/evil/hijack",
        }),
    )
    .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let delete = helpers::delete(&app, &format!("/api/projects/{id}"), Some(&intruder)).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    // The owner still sees the project untouched.
    let res = helpers::get(&app, "/api/projects", Some(&owner)).await;
    let projects = res.data().as_array().expect("array").clone();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["name"], "Private");
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_twice_yields_not_found_the_second_time(pool: PgPool) {
    let app = helpers::build_app(pool);
    let token = helpers::register_user(&app, "dev@example.com", "Dev").await;
    let id = helpers::create_project(&app, &token, "Ephemeral").await;

    let first = helpers::delete(&app, &format!("/api/projects/{id}"), Some(&token)).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = helpers::delete(&app, &format!("/api/projects/{id}"), Some(&token)).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn project_routes_require_authentication(pool: PgPool) {
    let app = helpers::build_app(pool);

    let res = helpers::get(&app, "/api/projects", None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}
