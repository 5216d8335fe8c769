use api_harness::{api_test, TestSession};
use reqres_suite::{
    data::users::CreatedUser, large_payload, post_user_payloads, Error, ReqResClient,
};
use serde_json::json;

#[api_test("user_creation, smoke", reqres_suite::session)]
async fn test_create_user(session: &TestSession) -> Result<(), Error> {
    let reqres = ReqResClient::from_session(session);

    for payload in post_user_payloads()? {
        let response = reqres.create_user(&payload).await?;

        assert_eq!(response.status_code, 201, "payload {:?}", payload);
        session.validate_response(&response, "create_user_schema.json")?;

        let created: CreatedUser = response.json()?;
        assert_eq!(created.name.as_deref(), Some(payload.name.as_str()));
        assert_eq!(created.job.as_deref(), Some(payload.job.as_str()));
        assert!(!created.id.is_empty());
    }

    Ok(())
}

#[api_test("user_creation, boundary", reqres_suite::session)]
async fn test_create_user_with_large_payload(session: &TestSession) -> Result<(), Error> {
    let response = ReqResClient::from_session(session)
        .create_user_json(&large_payload()?)
        .await?;

    assert_eq!(response.status_code, 201);
    let created = response.json_value()?;
    assert!(created.get("id").is_some());
    assert!(created.get("createdAt").is_some());

    Ok(())
}

#[api_test("user_creation, regression", reqres_suite::session)]
async fn test_create_user_minimal_data(session: &TestSession) -> Result<(), Error> {
    let payload = json!({"name": "TestUser", "job": "Tester"});
    let response = ReqResClient::from_session(session)
        .create_user_json(&payload)
        .await?;

    assert_eq!(response.status_code, 201);
    let created = response.json_value()?;
    assert!(created.get("id").is_some());
    assert!(created.get("createdAt").is_some());
    assert_eq!(created["name"], payload["name"]);
    assert_eq!(created["job"], payload["job"]);

    Ok(())
}
