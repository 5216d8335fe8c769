use api_harness::{api_test, TestSession};
use reqres_suite::{Error, ReqResClient};
use serde_json::json;
use tracing::info;

#[api_test("error_scenarios, negative", reqres_suite::session)]
async fn test_get_user_not_found(session: &TestSession) -> Result<(), Error> {
    let reqres = ReqResClient::from_session(session);

    for user_id in [9999, 999999] {
        let response = reqres.get_user(user_id).await?;

        assert_eq!(
            response.status_code,
            404,
            "Expected status 404 for user {}. Response: {}",
            user_id,
            response.text()
        );
        assert_eq!(response.json_value()?, json!({}));
    }

    Ok(())
}

#[api_test("error_scenarios, negative", reqres_suite::session)]
async fn test_get_user_invalid_id(session: &TestSession) -> Result<(), Error> {
    let reqres = ReqResClient::from_session(session);

    for invalid_id in ["abc", "!@#", "0", "-1"] {
        let response = reqres.get_user(invalid_id).await?;

        assert!(
            [400, 404, 422].contains(&response.status_code),
            "Unexpected status {} for id {}",
            response.status_code,
            invalid_id
        );
    }

    Ok(())
}

#[api_test("error_scenarios, negative", reqres_suite::session)]
async fn test_create_user_empty_payload(session: &TestSession) -> Result<(), Error> {
    let response = ReqResClient::from_session(session)
        .create_user_json(&json!({}))
        .await?;

    // ReqRes accepts empty payloads; a rejection must at least be a client error.
    if response.status_code == 201 {
        let created = response.json_value()?;
        assert!(created.get("id").is_some());
        assert!(created.get("createdAt").is_some());
    } else {
        assert!([400, 422].contains(&response.status_code));
    }

    Ok(())
}

#[api_test("error_scenarios, negative", reqres_suite::session)]
async fn test_create_user_invalid_json(session: &TestSession) -> Result<(), Error> {
    let response = ReqResClient::from_session(session)
        .create_user_raw(r#"{"name": "test", "job":}"#)
        .await?;

    assert_eq!(response.status_code, 400);

    Ok(())
}

#[api_test("error_scenarios, negative", reqres_suite::session)]
async fn test_invalid_endpoint(session: &TestSession) -> Result<(), Error> {
    let response = ReqResClient::from_session(session)
        .get("/api/invalid-endpoint")
        .await?;

    let body = response.text();
    let preview: String = body.chars().take(500).collect();
    match response.status_code {
        200 => info!("Invalid endpoint answered 200 (catch-all route): {}", preview),
        404 => info!("Invalid endpoint answered 404"),
        status => info!("Invalid endpoint answered {}: {}", status, preview),
    }

    Ok(())
}
