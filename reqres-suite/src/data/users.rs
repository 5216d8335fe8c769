use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Support {
    pub url: String,
    pub text: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserList {
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub data: Vec<User>,
    pub support: Option<Support>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SingleUser {
    pub data: User,
    pub support: Support,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub job: String,
}

impl CreateUser {
    pub fn new<N: Into<String>, J: Into<String>>(name: N, job: J) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    pub id: String,
    pub created_at: String,
    pub name: Option<String>,
    pub job: Option<String>,
}
