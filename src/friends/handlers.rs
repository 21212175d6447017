use axum::{
    extract::{Path, Query, State},
    routing::{delete, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{extractors::AuthSubject, guard::authorize_owner},
    error::ApiError,
    friends::{
        dto::{
            CreateFriendRequest, DeletedFriendEnvelope, FriendEnvelope, FriendsListResponse,
            PublicFriend,
        },
        repo,
    },
    pagination::{PageInfo, PageQuery},
    state::AppState,
};

pub fn friend_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:id/friends", post(create_friend).get(list_friends))
        .route("/users/:id/friends/:friend_id", delete(delete_friend))
}

#[instrument(skip(state, subject, payload))]
pub async fn create_friend(
    State(state): State<AppState>,
    AuthSubject(subject): AuthSubject,
    Path(owner_id): Path<Uuid>,
    Json(payload): Json<CreateFriendRequest>,
) -> Result<Json<FriendEnvelope>, ApiError> {
    authorize_owner(subject.id, owner_id)?;
    payload.validate()?;

    let friend = repo::create(
        &state.db,
        owner_id,
        &payload.name,
        payload.email.as_deref(),
        payload.phone.as_deref(),
    )
    .await?;

    info!(user_id = %owner_id, friend_id = %friend.id, "friend created");
    Ok(Json(FriendEnvelope {
        status: "ok",
        friend: PublicFriend::from(&friend),
    }))
}

#[instrument(skip(state, subject))]
pub async fn list_friends(
    State(state): State<AppState>,
    AuthSubject(subject): AuthSubject,
    Path(owner_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<FriendsListResponse>, ApiError> {
    authorize_owner(subject.id, owner_id)?;
    query.validate()?;

    let friends =
        repo::list_by_owner(&state.db, owner_id, query.limit, query.offset(), query.sort).await?;
    // total counts every friend of this owner, not just this page.
    let total = repo::count_by_owner(&state.db, owner_id).await?;

    Ok(Json(FriendsListResponse {
        status: "ok",
        friends: friends.iter().map(PublicFriend::from).collect(),
        pagination: PageInfo {
            page: query.page,
            total,
        },
    }))
}

#[instrument(skip(state, subject))]
pub async fn delete_friend(
    State(state): State<AppState>,
    AuthSubject(subject): AuthSubject,
    Path((owner_id, friend_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<DeletedFriendEnvelope>, ApiError> {
    authorize_owner(subject.id, owner_id)?;

    // A miss still answers 200 with friend: null; see DESIGN.md.
    let deleted = repo::delete_by_owner(&state.db, owner_id, friend_id).await?;
    if deleted.is_some() {
        info!(user_id = %owner_id, %friend_id, "friend deleted");
    }

    Ok(Json(DeletedFriendEnvelope {
        status: "ok",
        friend: deleted.as_ref().map(PublicFriend::from),
    }))
}
