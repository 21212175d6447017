use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::pagination::SortOrder;

#[derive(Debug, Clone, FromRow)]
pub struct Friend {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

pub async fn create(
    db: &PgPool,
    owner_id: Uuid,
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<Friend, sqlx::Error> {
    sqlx::query_as::<_, Friend>(
        r#"
        INSERT INTO friends (user_id, name, email, phone)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, name, email, phone, created_at, updated_at
        "#,
    )
    .bind(owner_id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .fetch_one(db)
    .await
}

pub async fn list_by_owner(
    db: &PgPool,
    owner_id: Uuid,
    limit: i64,
    offset: i64,
    sort: SortOrder,
) -> Result<Vec<Friend>, sqlx::Error> {
    let sql = match sort {
        SortOrder::Asc => {
            r#"
            SELECT id, user_id, name, email, phone, created_at, updated_at
            FROM friends
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#
        }
        SortOrder::Desc => {
            r#"
            SELECT id, user_id, name, email, phone, created_at, updated_at
            FROM friends
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        }
    };
    sqlx::query_as::<_, Friend>(sql)
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
}

/// Deletes the friend matching both owner and id. Returns the deleted row,
/// or None when nothing matched.
pub async fn delete_by_owner(
    db: &PgPool,
    owner_id: Uuid,
    friend_id: Uuid,
) -> Result<Option<Friend>, sqlx::Error> {
    sqlx::query_as::<_, Friend>(
        r#"
        DELETE FROM friends
        WHERE user_id = $1 AND id = $2
        RETURNING id, user_id, name, email, phone, created_at, updated_at
        "#,
    )
    .bind(owner_id)
    .bind(friend_id)
    .fetch_optional(db)
    .await
}

pub async fn count_by_owner(db: &PgPool, owner_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM friends WHERE user_id = $1")
        .bind(owner_id)
        .fetch_one(db)
        .await
}

pub async fn count_all(db: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM friends")
        .fetch_one(db)
        .await
}
