use crate::{
    data::users::{CreateUser, SingleUser, User, UserList},
    error::Error,
};
use api_harness::{ApiClient, Method, RequestData, ResponseData, TestSession};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::fmt::Display;
use tracing::debug;

const DEFAULT_USERS_PATH: &str = "/api/users";

/// Struct that represents a ReqRes users API client.
#[derive(Debug, Clone)]
pub struct ReqResClient {
    api: ApiClient,
    users_path: String,
}

impl ReqResClient {
    /// Create a ReqResClient that sends its requests through `api`.
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            users_path: String::from(DEFAULT_USERS_PATH),
        }
    }

    /// Create a ReqResClient sharing the client of a test session.
    pub fn from_session(session: &TestSession) -> Self {
        Self::new(session.client().clone())
    }

    /// Use the given path instead of `/api/users`.
    ///
    /// # Arguments
    /// `users_path` - path of the users collection relative to the base URL.
    ///
    /// # Returns
    /// This client.
    pub fn with_users_path<T: Into<String>>(mut self, users_path: T) -> Self {
        self.users_path = users_path.into();
        self
    }

    /// Gets one page of the user list.
    pub async fn list_users(&self, page: u32) -> Result<ResponseData, Error> {
        Ok(self
            .api
            .get(&format!("{}?page={}", self.users_path, page))
            .await?)
    }

    /// Gets a single user. `id` is sent as is, so malformed ids can be used too.
    pub async fn get_user<T: Display>(&self, id: T) -> Result<ResponseData, Error> {
        Ok(self.api.get(&self.user_path(id)).await?)
    }

    pub async fn create_user(&self, user: &CreateUser) -> Result<ResponseData, Error> {
        self.create_user_json(&json!({"name": user.name, "job": user.job}))
            .await
    }

    pub async fn create_user_json(&self, payload: &Value) -> Result<ResponseData, Error> {
        Ok(self.api.post(&self.users_path, payload).await?)
    }

    /// Posts `body` verbatim as a JSON request, valid or not.
    pub async fn create_user_raw(&self, body: &str) -> Result<ResponseData, Error> {
        let request = RequestData::new(Method::POST, self.users_path.as_str())
            .with_header("content-type", "application/json")
            .with_body(body);

        Ok(self.api.send(request).await?)
    }

    pub async fn get(&self, path: &str) -> Result<ResponseData, Error> {
        Ok(self.api.get(path).await?)
    }

    /// Gets and decodes one page of the user list.
    ///
    /// # Returns
    /// The page, or `Error::UnexpectedStatus` when the API does not answer with 200.
    pub async fn fetch_user_list(&self, page: u32) -> Result<UserList, Error> {
        Self::decode_ok(self.list_users(page).await?)
    }

    /// Gets and decodes a single user.
    pub async fn fetch_user(&self, id: u64) -> Result<User, Error> {
        let single: SingleUser = Self::decode_ok(self.get_user(id).await?)?;
        Ok(single.data)
    }

    fn user_path<T: Display>(&self, id: T) -> String {
        format!("{}/{}", self.users_path, id)
    }

    fn decode_ok<T: DeserializeOwned>(response: ResponseData) -> Result<T, Error> {
        if response.status_code != 200 {
            debug!(
                "Expected 200, got {} after {:?}",
                response.status_code, response.elapsed
            );
            return Err(Error::UnexpectedStatus(
                response.status_code,
                response.text().into_owned(),
            ));
        }

        Ok(response.json()?)
    }
}
