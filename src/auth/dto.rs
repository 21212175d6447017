use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{auth::repo::User, error::ApiError};

/// Request body shared by /auth/register, /auth/login and POST /users.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let name_len = self.username.chars().count();
        if !(3..=20).contains(&name_len) {
            return Err(ApiError::Validation(
                "username must be 3-20 characters".into(),
            ));
        }
        let pass_len = self.password.chars().count();
        if !(8..=20).contains(&pass_len) {
            return Err(ApiError::Validation(
                "password must be 8-20 characters".into(),
            ));
        }
        Ok(())
    }
}

/// Public projection of a user. The password digest never leaves the store
/// layer; `updatedAt` is internal bookkeeping and stays off the wire too.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

/// Response for register, login and refresh: the user plus a token pair.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub status: &'static str,
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
}

/// Response for session introspection and POST /users.
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub status: &'static str,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(username: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn accepts_valid_credentials() {
        assert!(creds("alice", "password1").validate().is_ok());
        assert!(creds("abc", "12345678").validate().is_ok());
        assert!(creds("a".repeat(20).as_str(), "p".repeat(20).as_str())
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_out_of_bounds_username() {
        assert!(creds("ab", "password1").validate().is_err());
        assert!(creds(&"a".repeat(21), "password1").validate().is_err());
    }

    #[test]
    fn rejects_out_of_bounds_password() {
        assert!(creds("alice", "short").validate().is_err());
        assert!(creds("alice", &"p".repeat(21)).validate().is_err());
    }

    #[test]
    fn public_user_serializes_camel_case_without_secrets() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        let json = serde_json::to_string(&PublicUser::from(&user)).expect("serialize");
        assert!(json.contains("createdAt"));
        assert!(json.contains("alice"));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }
}
