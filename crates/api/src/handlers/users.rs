//! Handlers for the `/users` resource.
//!
//! A user is two records: an identity-provider account (credentials) and a
//! document in the `users` collection (profile). Handlers keep both in step.

use axum::extract::{Path, State};
use dissio_core::error::{codes, ProviderError};
use dissio_core::validation::Schema;
use dissio_db::models::user::{CreateUser, UpdateUser, User, UserChanges};
use dissio_db::repositories::UserRepo;

use crate::auth::identity::AccountUpdate;
use crate::error::{AppError, AppResult, WithFallback};
use crate::extract::{JsonBody, QueryParams};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::state::AppState;

const USER_NOT_FOUND: &str = "User not found";
const EMAIL_IN_USE: &str = "Email already in use";

fn email_in_use() -> AppError {
    AppError::from(ProviderError::new(
        codes::AUTH_ALREADY_EXISTS,
        "A user with this email already exists",
    ))
    .with_message(EMAIL_IN_USE)
}

/// The identity provider may still report a taken email when a concurrent
/// sign-up won the race past the document lookup.
fn account_error(err: ProviderError) -> AppError {
    if err.code == codes::AUTH_ALREADY_EXISTS {
        AppError::from(err).with_message(EMAIL_IN_USE)
    } else {
        err.into()
    }
}

/// Only the account holder may change or delete their user document.
fn ensure_owner(caller: &AuthUser, user: &User) -> Option<ApiResponse> {
    (caller.0.uid != user.uid)
        .then(|| ApiResponse::unauthorized("You can only modify your own account"))
}

// ---------------------------------------------------------------------------
// POST /users
// ---------------------------------------------------------------------------

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateUser>,
) -> AppResult<ApiResponse> {
    create_user(&state, body)
        .await
        .fallback_message("Error creating user")
}

async fn create_user(state: &AppState, body: CreateUser) -> AppResult<ApiResponse> {
    let input = body.validate()?;

    if UserRepo::find_by_email(state.store.as_ref(), &input.email)
        .await?
        .is_some()
    {
        return Err(email_in_use());
    }

    let account = state
        .identity
        .create_account(&input.email, &input.password, &input.display_name)
        .await
        .map_err(account_error)?;

    let user = match UserRepo::create(state.store.as_ref(), &account.uid, &input).await {
        Ok(user) => user,
        Err(e) => {
            // Do not leave an account behind without a profile.
            if let Err(cleanup) = state.identity.delete_account(&account.uid).await {
                tracing::error!(
                    uid = %account.uid,
                    error = %cleanup,
                    "Failed to roll back account",
                );
            }
            return Err(e.into());
        }
    };

    tracing::info!(user_id = %user.id, uid = %user.uid, "User created");
    Ok(ApiResponse::success(user, "User created successfully"))
}

// ---------------------------------------------------------------------------
// GET /users
// ---------------------------------------------------------------------------

pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<ApiResponse> {
    let page = params.resolve(state.config.default_page_size);
    let (users, total) = UserRepo::list(state.store.as_ref(), &page)
        .await
        .map_err(AppError::from)
        .fallback_message("Error getting users")?;

    Ok(ApiResponse::paginated(
        users,
        page.pagination(total),
        "Users retrieved successfully",
    ))
}

// ---------------------------------------------------------------------------
// GET /users/{id}
// ---------------------------------------------------------------------------

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse> {
    let user = UserRepo::find_by_id(state.store.as_ref(), &id)
        .await
        .map_err(AppError::from)
        .fallback_message("Error getting user")?;

    Ok(match user {
        Some(user) => ApiResponse::success(user, "User retrieved successfully"),
        None => ApiResponse::not_found(USER_NOT_FOUND),
    })
}

// ---------------------------------------------------------------------------
// PUT /users/{id}
// ---------------------------------------------------------------------------

pub async fn update(
    caller: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateUser>,
) -> AppResult<ApiResponse> {
    update_user(&state, &caller, &id, body)
        .await
        .fallback_message("Error updating user")
}

async fn update_user(
    state: &AppState,
    caller: &AuthUser,
    id: &str,
    body: UpdateUser,
) -> AppResult<ApiResponse> {
    let changes = body.validate()?;
    let store = state.store.as_ref();

    let Some(user) = UserRepo::find_by_id(store, id).await? else {
        return Ok(ApiResponse::not_found(USER_NOT_FOUND));
    };
    if let Some(rejection) = ensure_owner(caller, &user) {
        return Ok(rejection);
    }

    if let Some(email) = changes.email.as_deref().filter(|e| *e != user.email) {
        if UserRepo::find_by_email(store, email).await?.is_some() {
            return Err(email_in_use());
        }
    }

    // The document is written first and reverted if the account refuses.
    let Some(updated) = UserRepo::update(store, id, &changes).await? else {
        return Ok(ApiResponse::not_found(USER_NOT_FOUND));
    };

    if !changes.is_empty() {
        let update = AccountUpdate {
            email: changes.email.clone(),
            display_name: changes.display_name.clone(),
        };
        if let Err(e) = state.identity.update_account(&user.uid, &update).await {
            let revert = UserChanges {
                display_name: changes
                    .display_name
                    .as_ref()
                    .map(|_| user.display_name.clone()),
                email: changes.email.as_ref().map(|_| user.email.clone()),
            };
            if let Err(cleanup) = UserRepo::update(store, id, &revert).await {
                tracing::error!(user_id = %id, error = %cleanup, "Failed to revert user document");
            }
            return Err(account_error(e));
        }
    }

    tracing::info!(user_id = %updated.id, "User updated");
    Ok(ApiResponse::success(updated, "User updated successfully"))
}

// ---------------------------------------------------------------------------
// DELETE /users/{id}
// ---------------------------------------------------------------------------

pub async fn delete(
    caller: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse> {
    delete_user(&state, &caller, &id)
        .await
        .fallback_message("Error deleting user")
}

async fn delete_user(state: &AppState, caller: &AuthUser, id: &str) -> AppResult<ApiResponse> {
    let store = state.store.as_ref();

    let Some(user) = UserRepo::find_by_id(store, id).await? else {
        return Ok(ApiResponse::not_found(USER_NOT_FOUND));
    };
    if let Some(rejection) = ensure_owner(caller, &user) {
        return Ok(rejection);
    }

    // The document goes first so a failed account delete can put it back
    // while the owner's token still verifies.
    UserRepo::delete(store, id).await?;
    if let Err(e) = state.identity.delete_account(&user.uid).await {
        if let Err(cleanup) = UserRepo::restore(store, &user).await {
            tracing::error!(user_id = %id, error = %cleanup, "Failed to restore user document");
        }
        return Err(e.into());
    }

    tracing::info!(user_id = %id, uid = %user.uid, "User deleted");
    Ok(ApiResponse::success((), "User deleted successfully"))
}
