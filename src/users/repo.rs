use sqlx::PgPool;

use crate::{auth::repo::User, pagination::SortOrder};

/// Page of users ordered by creation time. The id tiebreak keeps ordering
/// deterministic when several rows share a timestamp.
pub async fn list(
    db: &PgPool,
    limit: i64,
    offset: i64,
    sort: SortOrder,
) -> Result<Vec<User>, sqlx::Error> {
    let sql = match sort {
        SortOrder::Asc => {
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM users
            ORDER BY created_at ASC, id ASC
            LIMIT $1 OFFSET $2
            "#
        }
        SortOrder::Desc => {
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM users
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#
        }
    };
    sqlx::query_as::<_, User>(sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
}

pub async fn count(db: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await
}
