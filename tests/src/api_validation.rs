use api_harness::{api_test, TestSession};
use reqres_suite::{data::users::SingleUser, Error, ReqResClient};

#[api_test("api_validation, contract", reqres_suite::session)]
async fn test_headers_validation(session: &TestSession) -> Result<(), Error> {
    let response = ReqResClient::from_session(session).list_users(1).await?;

    assert_eq!(response.status_code, 200);
    let content_type = response.header("content-type").unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "Content-Type was {:?}",
        content_type
    );
    assert!(
        response.has_header("content-length") || response.has_header("transfer-encoding"),
        "Either Content-Length or Transfer-Encoding should be present"
    );
    assert!(response.has_header("date"));

    Ok(())
}

#[api_test("api_validation, contract", reqres_suite::session)]
async fn test_user_list_schema_validation(session: &TestSession) -> Result<(), Error> {
    let response = ReqResClient::from_session(session).list_users(1).await?;

    assert_eq!(response.status_code, 200);
    session.validate_response(&response, "user_list_schema.json")?;

    let users = ReqResClient::from_session(session).fetch_user_list(1).await?;
    assert!(!users.data.is_empty());
    for user in &users.data {
        assert!(user.email.contains('@'), "{} is not an email", user.email);
    }

    Ok(())
}

#[api_test("api_validation, contract", reqres_suite::session)]
async fn test_single_user_schema_validation(session: &TestSession) -> Result<(), Error> {
    let response = ReqResClient::from_session(session).get_user(2).await?;

    assert_eq!(response.status_code, 200);
    session.validate_response(&response, "single_user_schema.json")?;

    let user: SingleUser = response.json()?;
    assert_eq!(user.data.id, 2);
    assert!(!user.support.url.is_empty());
    assert!(!user.support.text.is_empty());

    Ok(())
}

#[api_test("api_validation, performance", reqres_suite::session)]
async fn test_response_time_validation(session: &TestSession) -> Result<(), Error> {
    let reqres = ReqResClient::from_session(session);
    let limit = session.configuration().timeout();

    for path in ["/api/users?page=1", "/api/users/1"] {
        let response = reqres.get(path).await?;

        assert_eq!(response.status_code, 200, "{}", path);
        assert!(
            response.elapsed < limit,
            "Response time {:?} for {} exceeded limit of {:?}",
            response.elapsed,
            path,
            limit
        );
    }

    Ok(())
}
