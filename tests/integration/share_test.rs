//! Owner-side share-link lifecycle and statistics.

use chrono::Utc;
use http::StatusCode;
use sqlx::PgPool;

use crate::helpers;

#[sqlx::test(migrations = "./migrations")]
async fn issuing_a_share_link_returns_an_opaque_token(pool: PgPool) {
    let app = helpers::build_app(pool);
    let auth = helpers::register_user(&app, "dev@example.com", "Dev").await;

    let res = helpers::post_json(&app, "/api/share", Some(&auth), serde_json::json!({})).await;

    assert_eq!(res.status, StatusCode::OK);
    let data = res.data();
    let token = data["token"].as_str().expect("token");
    assert_eq!(token.len(), 43);
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    assert_eq!(data["is_active"], true);
    assert_eq!(data["view_count"], 0);
    assert!(data["expires_at"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn reissuing_leaves_exactly_one_active_link(pool: PgPool) {
    let app = helpers::build_app(pool.clone());
    let auth = helpers::register_user(&app, "dev@example.com", "Dev").await;

    let first = helpers::create_share_link(&app, &auth).await;
    let second = helpers::create_share_link(&app, &auth).await;
    assert_ne!(first, second, "tokens are never reused");

    let active: Vec<String> =
        sqlx::query_scalar("SELECT token FROM share_links WHERE is_active")
            .fetch_all(&pool)
            .await
            .expect("active tokens");
    assert_eq!(active, vec![second.clone()]);

    // The old row survives deactivated, its history intact.
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM share_links")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(total, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn deactivation_is_idempotent(pool: PgPool) {
    let app = helpers::build_app(pool);
    let auth = helpers::register_user(&app, "dev@example.com", "Dev").await;
    helpers::create_share_link(&app, &auth).await;

    let first = helpers::delete(&app, "/api/share", Some(&auth)).await;
    assert_eq!(first.status, StatusCode::OK);

    // No active link left; a second call is a no-op, not an error.
    let second = helpers::delete(&app, "/api/share", Some(&auth)).await;
    assert_eq!(second.status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn sharing_status_reports_the_active_link_or_nothing(pool: PgPool) {
    let app = helpers::build_app(pool);
    let auth = helpers::register_user(&app, "dev@example.com", "Dev").await;

    let before = helpers::get(&app, "/api/share", Some(&auth)).await;
    assert_eq!(before.status, StatusCode::OK);
    assert!(before.data().is_null());

    let token = helpers::create_share_link(&app, &auth).await;

    let after = helpers::get(&app, "/api/share", Some(&auth)).await;
    assert_eq!(after.data()["token"], token.as_str());
    assert_eq!(after.data()["view_count"], 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn expiry_in_the_past_is_rejected(pool: PgPool) {
    let app = helpers::build_app(pool);
    let auth = helpers::register_user(&app, "dev@example.com", "Dev").await;

    let yesterday = Utc::now() - chrono::Duration::days(1);
    let res = helpers::post_json(
        &app,
        "/api/share",
        Some(&auth),
        serde_json::json!({"expires_at": yesterday}),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn future_expiry_is_stored(pool: PgPool) {
    let app = helpers::build_app(pool);
    let auth = helpers::register_user(&app, "dev@example.com", "Dev").await;

    let tomorrow = Utc::now() + chrono::Duration::days(1);
    let res = helpers::post_json(
        &app,
        "/api/share",
        Some(&auth),
        serde_json::json!({"expires_at": tomorrow}),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.data()["expires_at"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn stats_on_someone_elses_token_is_not_found(pool: PgPool) {
    let app = helpers::build_app(pool);
    let owner = helpers::register_user(&app, "owner@example.com", "Owner").await;
    let other = helpers::register_user(&app, "other@example.com", "Other").await;
    let token = helpers::create_share_link(&app, &owner).await;

    let res = helpers::get(&app, &format!("/api/share/{token}/stats"), Some(&other)).await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.get("data").is_none(), "no statistics may leak");
}

#[sqlx::test(migrations = "./migrations")]
async fn stats_remain_available_after_deactivation(pool: PgPool) {
    let app = helpers::build_app(pool);
    let auth = helpers::register_user(&app, "dev@example.com", "Dev").await;
    let token = helpers::create_share_link(&app, &auth).await;

    let tracked = helpers::post_json(
        &app,
        &format!("/api/shared/{token}/view"),
        None,
        serde_json::json!({"ip": "1.2.3.4"}),
    )
    .await;
    assert_eq!(tracked.data()["counted"], true);

    helpers::delete(&app, "/api/share", Some(&auth)).await;

    // The owner can still inspect the revoked link's history.
    let res = helpers::get(&app, &format!("/api/share/{token}/stats"), Some(&auth)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["total_views"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn stats_aggregate_views_and_unique_ips(pool: PgPool) {
    let app = helpers::build_app(pool);
    let auth = helpers::register_user(&app, "dev@example.com", "Dev").await;
    let token = helpers::create_share_link(&app, &auth).await;

    for ip in ["1.2.3.4", "1.2.3.4", "5.6.7.8"] {
        let res = helpers::post_json(
            &app,
            &format!("/api/shared/{token}/view"),
            None,
            serde_json::json!({"ip": ip}),
        )
        .await;
        assert_eq!(res.data()["counted"], true);
    }
    // One anonymous view with no metadata at all.
    let res =
        helpers::post_json(&app, &format!("/api/shared/{token}/view"), None, serde_json::json!({}))
            .await;
    assert_eq!(res.data()["counted"], true);

    let res = helpers::get(&app, &format!("/api/share/{token}/stats"), Some(&auth)).await;
    assert_eq!(res.status, StatusCode::OK);

    let stats = res.data();
    assert_eq!(stats["total_views"], 4);
    assert_eq!(stats["unique_ips"], 2, "NULL ips do not count as unique visitors");
    assert_eq!(stats["views_today"], 4);
    assert_eq!(stats["views_this_week"], 4);
    assert_eq!(stats["views_this_month"], 4);
    assert_eq!(stats["recent_views"].as_array().expect("array").len(), 4);
}

#[sqlx::test(migrations = "./migrations")]
async fn recent_views_are_capped_at_ten_newest_first(pool: PgPool) {
    let app = helpers::build_app(pool);
    let auth = helpers::register_user(&app, "dev@example.com", "Dev").await;
    let token = helpers::create_share_link(&app, &auth).await;

    for _ in 0..12 {
        helpers::post_json(&app, &format!("/api/shared/{token}/view"), None, serde_json::json!({}))
            .await;
    }

    let res = helpers::get(&app, &format!("/api/share/{token}/stats"), Some(&auth)).await;
    let recent = res.data()["recent_views"].as_array().expect("array").clone();
    assert_eq!(recent.len(), 10);

    let timestamps: Vec<chrono::DateTime<Utc>> = recent
        .iter()
        .map(|v| v.as_str().expect("ts").parse().expect("rfc3339"))
        .collect();
    assert!(
        timestamps.windows(2).all(|w| w[0] >= w[1]),
        "recent views must be newest first"
    );
}
