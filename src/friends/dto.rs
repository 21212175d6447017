use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{error::ApiError, friends::repo::Friend, pagination::PageInfo};

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Deserialize)]
pub struct CreateFriendRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CreateFriendRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let name_len = self.name.chars().count();
        if !(3..=20).contains(&name_len) {
            return Err(ApiError::Validation("name must be 3-20 characters".into()));
        }
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err(ApiError::Validation("email is invalid".into()));
            }
        }
        if let Some(phone) = &self.phone {
            let phone_len = phone.chars().count();
            if !(10..=20).contains(&phone_len) {
                return Err(ApiError::Validation(
                    "phone must be 10-20 characters".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Public projection of a friend record; the owning user id stays internal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicFriend {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&Friend> for PublicFriend {
    fn from(friend: &Friend) -> Self {
        PublicFriend {
            id: friend.id,
            name: friend.name.clone(),
            email: friend.email.clone(),
            phone: friend.phone.clone(),
            created_at: friend.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FriendEnvelope {
    pub status: &'static str,
    pub friend: PublicFriend,
}

/// Delete returns `friend: null` when nothing matched; see DESIGN.md.
#[derive(Debug, Serialize)]
pub struct DeletedFriendEnvelope {
    pub status: &'static str,
    pub friend: Option<PublicFriend>,
}

#[derive(Debug, Serialize)]
pub struct FriendsListResponse {
    pub status: &'static str,
    pub friends: Vec<PublicFriend>,
    pub pagination: PageInfo,
}
