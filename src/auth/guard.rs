use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;

/// Ownership check shared by every `/users/:id/friends*` route: the
/// authenticated subject may only touch resources owned by itself. A
/// mismatch is unauthorized, never not-found, so the response does not
/// reveal whether the path's target user exists.
pub fn authorize_owner(subject_id: Uuid, owner_id: Uuid) -> Result<(), ApiError> {
    if subject_id == owner_id {
        Ok(())
    } else {
        warn!(%subject_id, %owner_id, "ownership check failed");
        Err(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_matching_owner() {
        let id = Uuid::new_v4();
        assert!(authorize_owner(id, id).is_ok());
    }

    #[test]
    fn denies_any_other_subject() {
        let err = authorize_owner(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
