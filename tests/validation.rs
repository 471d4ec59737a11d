//! Input validation at the HTTP boundary: malformed bodies are rejected
//! with 400 and a typed error payload, never accepted or crashed on.

mod common;

use common::TestServer;
use serde_json::{Value, json};

#[tokio::test]
async fn missing_field_is_rejected_with_400() -> anyhow::Result<()> {
    let server = TestServer::spawn(18441).await?;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/addChannel"))
        .json(&json!({ "band": "2.4GHz", "channel": 6 }))
        .send()
        .await?;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await?;
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("invalid input"));

    // Nothing was added.
    let channels: Value = client
        .get(server.url("/channels"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(channels, json!([]));
    Ok(())
}

#[tokio::test]
async fn wrong_type_is_rejected_with_400() -> anyhow::Result<()> {
    let server = TestServer::spawn(18442).await?;
    let client = reqwest::Client::new();

    // channel must be a positive integer; a string is a type error
    let response = client
        .post(server.url("/addChannel"))
        .json(&json!({ "band": "2.4GHz", "channel": "six", "interference": 5.0 }))
        .send()
        .await?;
    assert_eq!(response.status(), 400);

    // so is a negative channel number
    let response = client
        .post(server.url("/addChannel"))
        .json(&json!({ "band": "2.4GHz", "channel": -6, "interference": 5.0 }))
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    Ok(())
}

#[tokio::test]
async fn non_json_body_is_rejected_with_400() -> anyhow::Result<()> {
    let server = TestServer::spawn(18443).await?;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/addChannel"))
        .header("content-type", "application/json")
        .body("this is not json")
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    Ok(())
}

#[tokio::test]
async fn remove_body_is_validated_too() -> anyhow::Result<()> {
    let server = TestServer::spawn(18444).await?;
    let client = reqwest::Client::new();

    let response = client
        .delete(server.url("/removeChannel"))
        .json(&json!({ "band": "2.4GHz" }))
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    Ok(())
}

#[tokio::test]
async fn double_remove_is_a_safe_noop() -> anyhow::Result<()> {
    let server = TestServer::spawn(18445).await?;
    let client = reqwest::Client::new();

    client
        .post(server.url("/addChannel"))
        .json(&json!({ "band": "5GHz", "channel": 36, "interference": 1.0 }))
        .send()
        .await?;

    for expected_prefix in ["Removed 1", "Removed 0"] {
        let response = client
            .delete(server.url("/removeChannel"))
            .json(&json!({ "band": "5GHz", "channel": 36 }))
            .send()
            .await?;
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await?;
        assert_eq!(body["success"], json!(true));
        assert!(body["message"].as_str().unwrap().starts_with(expected_prefix));
    }
    Ok(())
}

#[tokio::test]
async fn interference_sign_and_band_label_are_not_validated() -> anyhow::Result<()> {
    // Any band string and any interference sign are accepted; only shape
    // and types are enforced.
    let server = TestServer::spawn(18446).await?;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/addChannel"))
        .json(&json!({ "band": "60GHz", "channel": 2, "interference": -3.5 }))
        .send()
        .await?;
    assert_eq!(response.status(), 200);

    // Reachable per-record, invisible to the fixed-band aggregate.
    let channels: Value = client
        .get(server.url("/channels"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(channels.as_array().unwrap().len(), 1);

    let body: Value = client
        .get(server.url("/bestChannels"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body, json!({ "2.4GHz": null, "5GHz": null, "6GHz": null }));
    Ok(())
}
