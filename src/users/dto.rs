use serde::Serialize;

use crate::{auth::dto::PublicUser, pagination::PageInfo};

#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub status: &'static str,
    pub users: Vec<PublicUser>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_users: i64,
    pub total_friends: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub status: &'static str,
    pub stats: Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_serialize_camel_case() {
        let response = StatsResponse {
            status: "ok",
            stats: Stats {
                total_users: 3,
                total_friends: 7,
            },
        };
        let json = serde_json::to_string(&response).expect("serialize");
        assert!(json.contains(r#""totalUsers":3"#));
        assert!(json.contains(r#""totalFriends":7"#));
        assert!(json.contains(r#""status":"ok""#));
    }
}
