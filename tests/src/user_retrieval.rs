use api_harness::{api_test, TestSession};
use reqres_suite::{Error, ReqResClient};

#[api_test("user_retrieval, smoke", reqres_suite::session)]
async fn test_get_user_list(session: &TestSession) -> Result<(), Error> {
    let response = ReqResClient::from_session(session).list_users(2).await?;

    assert_eq!(response.status_code, 200);
    session.validate_response(&response, "user_list_schema.json")?;

    Ok(())
}

#[api_test("user_retrieval, smoke", reqres_suite::session)]
async fn test_get_single_user(session: &TestSession) -> Result<(), Error> {
    let reqres = ReqResClient::from_session(session);

    for user_id in [1, 2, 5] {
        let response = reqres.get_user(user_id).await?;

        assert_eq!(response.status_code, 200, "user {}", user_id);
        session.validate_response(&response, "single_user_schema.json")?;
        assert_eq!(response.json_value()?["data"]["id"], user_id);
    }

    Ok(())
}

#[api_test("user_retrieval, regression", reqres_suite::session)]
async fn test_get_user_list_pagination(session: &TestSession) -> Result<(), Error> {
    let reqres = ReqResClient::from_session(session);

    for page in [1, 2] {
        let users = reqres.fetch_user_list(page).await?;

        assert_eq!(users.page, page);
        assert!(users.per_page > 0);
        assert!(users.total_pages >= page);
        assert!(users.data.len() as u32 <= users.per_page);
    }

    Ok(())
}
