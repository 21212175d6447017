use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{CredentialsRequest, PublicUser, UserEnvelope},
        password::hash_password,
        repo::User,
    },
    error::ApiError,
    pagination::{PageInfo, PageQuery},
    state::AppState,
    users::{
        dto::{Stats, StatsResponse, UsersListResponse},
        repo,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route("/users/stats", get(stats))
}

/// Account creation without token issuance. Shares the register contract:
/// a duplicate username maps to the same conflict outcome.
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<UserEnvelope>, ApiError> {
    payload.validate()?;

    let digest = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.username, &digest).await?;

    info!(user_id = %user.id, username = %user.username, "user created");
    Ok(Json(UserEnvelope {
        status: "ok",
        user: PublicUser::from(&user),
    }))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<UsersListResponse>, ApiError> {
    query.validate()?;

    let users = repo::list(&state.db, query.limit, query.offset(), query.sort).await?;
    // total is the unfiltered row count, not the size of this page.
    let total = repo::count(&state.db).await?;

    Ok(Json(UsersListResponse {
        status: "ok",
        users: users.iter().map(PublicUser::from).collect(),
        pagination: PageInfo {
            page: query.page,
            total,
        },
    }))
}

#[instrument(skip(state))]
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let total_users = repo::count(&state.db).await?;
    let total_friends = crate::friends::repo::count_all(&state.db).await?;

    Ok(Json(StatsResponse {
        status: "ok",
        stats: Stats {
            total_users,
            total_friends,
        },
    }))
}
