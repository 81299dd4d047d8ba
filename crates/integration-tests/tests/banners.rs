//! Integration tests for banner ordering.
//!
//! Run with: cargo test -p copperleaf-integration-tests -- --ignored

use copperleaf_integration_tests::{TestContext, unique_suffix};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn create_banner(ctx: &TestContext, title: &str) -> i64 {
    let resp = ctx
        .authorized(ctx.client.post(ctx.url("/api/banners")))
        .json(&json!({ "title": title, "image": format!("/images/{title}.jpg") }))
        .send()
        .await
        .expect("Failed to create banner");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse response");
    body["data"]["id"].as_i64().expect("banner id")
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_banner_reorder() {
    let ctx = TestContext::new();
    let suffix = unique_suffix();

    let first = create_banner(&ctx, &format!("banner-a-{suffix}")).await;
    let second = create_banner(&ctx, &format!("banner-b-{suffix}")).await;
    let third = create_banner(&ctx, &format!("banner-c-{suffix}")).await;

    // Collect the full current ordering; reorder requires every id
    let resp = ctx
        .client
        .get(ctx.url("/api/banners"))
        .send()
        .await
        .expect("Failed to list banners");
    let body: Value = resp.json().await.expect("Failed to parse listing");
    let mut ids: Vec<i64> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|b| b["id"].as_i64().expect("id"))
        .collect();

    // Move our three banners to the front, reversed
    ids.retain(|id| ![first, second, third].contains(id));
    let mut reordered = vec![third, second, first];
    reordered.extend(ids);

    let resp = ctx
        .authorized(ctx.client.put(ctx.url("/api/banners/reorder")))
        .json(&json!({ "ids": reordered }))
        .send()
        .await
        .expect("Failed to reorder banners");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    let listed: Vec<i64> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|b| b["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(&listed[..3], &[third, second, first]);

    // Cleanup
    for id in [first, second, third] {
        let _ = ctx
            .authorized(ctx.client.delete(ctx.url(&format!("/api/banners/{id}"))))
            .send()
            .await;
    }
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_banner_reorder_unknown_id_rolls_back() {
    let ctx = TestContext::new();
    let suffix = unique_suffix();

    let id = create_banner(&ctx, &format!("banner-x-{suffix}")).await;

    let resp = ctx
        .authorized(ctx.client.put(ctx.url("/api/banners/reorder")))
        .json(&json!({ "ids": [id, 999_999_999] }))
        .send()
        .await
        .expect("Failed to send reorder");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let _ = ctx
        .authorized(ctx.client.delete(ctx.url(&format!("/api/banners/{id}"))))
        .send()
        .await;
}
