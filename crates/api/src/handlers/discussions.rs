//! Handlers for the `/discussions` resource and its replies.

use axum::extract::{Path, State};
use dissio_core::validation::Schema;
use dissio_db::models::discussion::{CreateDiscussion, CreateReply};
use dissio_db::repositories::DiscussionRepo;

use crate::error::{AppError, AppResult, WithFallback};
use crate::extract::{JsonBody, QueryParams};
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::state::AppState;

const DISCUSSION_NOT_FOUND: &str = "Discussion not found";

/// POST /discussions
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateDiscussion>,
) -> AppResult<ApiResponse> {
    create_discussion(&state, body)
        .await
        .fallback_message("Error creating discussion")
}

async fn create_discussion(state: &AppState, body: CreateDiscussion) -> AppResult<ApiResponse> {
    let input = body.validate()?;
    let discussion = DiscussionRepo::create(state.store.as_ref(), &input).await?;

    tracing::info!(
        discussion_id = %discussion.id,
        author_id = %discussion.author_id,
        "Discussion created",
    );
    Ok(ApiResponse::success(discussion, "Discussion created"))
}

/// GET /discussions
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<ApiResponse> {
    let page = params.resolve(state.config.default_page_size);
    let (discussions, total) = DiscussionRepo::list(state.store.as_ref(), &page)
        .await
        .map_err(AppError::from)
        .fallback_message("Error getting discussions")?;

    Ok(ApiResponse::paginated(
        discussions,
        page.pagination(total),
        "Discussions retrieved",
    ))
}

/// GET /discussions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse> {
    let discussion = DiscussionRepo::find_by_id(state.store.as_ref(), &id)
        .await
        .map_err(AppError::from)
        .fallback_message("Error getting discussion")?;

    Ok(match discussion {
        Some(discussion) => ApiResponse::success(discussion, "Discussion retrieved"),
        None => ApiResponse::not_found(DISCUSSION_NOT_FOUND),
    })
}

/// POST /discussions/{discussion_id}/replies
pub async fn create_reply(
    State(state): State<AppState>,
    Path(discussion_id): Path<String>,
    JsonBody(body): JsonBody<CreateReply>,
) -> AppResult<ApiResponse> {
    add_reply(&state, &discussion_id, body)
        .await
        .fallback_message("Error adding reply")
}

async fn add_reply(
    state: &AppState,
    discussion_id: &str,
    body: CreateReply,
) -> AppResult<ApiResponse> {
    // The body is checked before the parent lookup.
    let input = body.validate()?;
    let store = state.store.as_ref();

    if DiscussionRepo::find_by_id(store, discussion_id).await?.is_none() {
        return Ok(ApiResponse::not_found(DISCUSSION_NOT_FOUND));
    }

    let reply = DiscussionRepo::add_reply(store, discussion_id, &input).await?;

    tracing::info!(discussion_id, reply_id = %reply.id, "Reply added");
    Ok(ApiResponse::success(reply, "Reply added"))
}

/// GET /discussions/{discussion_id}/replies
pub async fn list_replies(
    State(state): State<AppState>,
    Path(discussion_id): Path<String>,
) -> AppResult<ApiResponse> {
    replies_for(&state, &discussion_id)
        .await
        .fallback_message("Error getting replies")
}

async fn replies_for(state: &AppState, discussion_id: &str) -> AppResult<ApiResponse> {
    let store = state.store.as_ref();

    if DiscussionRepo::find_by_id(store, discussion_id).await?.is_none() {
        return Ok(ApiResponse::not_found(DISCUSSION_NOT_FOUND));
    }

    let replies = DiscussionRepo::list_replies(store, discussion_id).await?;
    Ok(ApiResponse::success(replies, "Replies retrieved"))
}
