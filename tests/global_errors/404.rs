//! tests/global_errors/404.rs
//! Ensures that unknown routes return the 404 envelope, at the root and under a mounted node.

#[path = "../mod.rs"]
mod common;

use reqwest::StatusCode;
use serde_json::Value;

async fn get_json(url: String) -> (StatusCode, Value) {
    let resp: reqwest::Response = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .expect("Failed to execute request.");

    let status: StatusCode = resp.status();
    let json: Value = resp.json().await.expect("Response is not JSON");
    (status, json)
}

#[tokio::test]
async fn returns_404_for_nonexistent_route() {
    let base_url: String = common::spawn_app();

    let (status, json) = get_json(format!("{}/does-not-exist", base_url)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], "NOT_FOUND");
    assert_eq!(json["code"], 404);
    assert_eq!(json["messages"][0], "Not found");
}

#[tokio::test]
async fn returns_404_for_unknown_path_under_a_mounted_route() {
    let base_url: String = common::spawn_app();

    let (status, json) = get_json(format!("{}/users/unknown", base_url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], 404);

    let (status, json) = get_json(format!("{}/users/profile/deeper/still", base_url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], "NOT_FOUND");
}
