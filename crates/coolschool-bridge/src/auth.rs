use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Held state of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub address: String,
    pub email: String,
    pub password: String,
    pub repeat_password: String,
}

impl RegistrationForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Body of the `auth/register` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub username: String,
}

impl From<&RegistrationForm> for RegisterRequest {
    fn from(form: &RegistrationForm) -> Self {
        Self {
            firstname: form.first_name.clone(),
            lastname: form.last_name.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            address: form.address.clone(),
            username: form.username.clone(),
        }
    }
}

/// Authenticated platform user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Session returned by the authentication endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    #[serde(alias = "token", default)]
    pub access_token: String,
    pub user: User,
}
