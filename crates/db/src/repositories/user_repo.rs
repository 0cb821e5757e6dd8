//! Repository for the `users` collection.

use chrono::Utc;
use dissio_core::pagination::PageRequest;
use dissio_core::types::Timestamp;
use serde::Serialize;

use crate::models::user::{NewUser, User, UserChanges};
use crate::store::{to_fields, Direction, Document, DocumentStore, Query, StoreResult};

pub const COLLECTION: &str = "users";

/// Stored shape of a user (the id lives outside the fields).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord<'a> {
    uid: &'a str,
    display_name: &'a str,
    email: &'a str,
    created_at: Timestamp,
}

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user document linked to the identity account `uid`.
    pub async fn create(
        store: &dyn DocumentStore,
        uid: &str,
        input: &NewUser,
    ) -> StoreResult<User> {
        let created_at = Utc::now();
        let record = UserRecord {
            uid,
            display_name: &input.display_name,
            email: &input.email,
            created_at,
        };
        let id = store.add(COLLECTION, to_fields(&record)?).await?;

        Ok(User {
            id,
            uid: uid.to_string(),
            display_name: input.display_name.clone(),
            email: input.email.clone(),
            created_at,
        })
    }

    pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> StoreResult<Option<User>> {
        store
            .get(COLLECTION, id)
            .await?
            .map(Document::decode)
            .transpose()
    }

    /// Find the user holding `email`, if any.
    pub async fn find_by_email(
        store: &dyn DocumentStore,
        email: &str,
    ) -> StoreResult<Option<User>> {
        let query = Query::new().filter("email", email).limit(1);
        store
            .query(COLLECTION, &query)
            .await?
            .into_iter()
            .next()
            .map(Document::decode)
            .transpose()
    }

    /// One page of users, newest first, plus the total count.
    pub async fn list(
        store: &dyn DocumentStore,
        page: &PageRequest,
    ) -> StoreResult<(Vec<User>, u64)> {
        let query = Query::new()
            .order_by("createdAt", Direction::Desc)
            .offset(page.offset())
            .limit(page.limit as usize);
        let users = store
            .query(COLLECTION, &query)
            .await?
            .into_iter()
            .map(Document::decode)
            .collect::<StoreResult<Vec<User>>>()?;
        let total = store.count(COLLECTION, &[]).await?;
        Ok((users, total))
    }

    /// Apply `changes` and return the updated user.
    ///
    /// Returns `None` if no user with the given `id` exists.
    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        changes: &UserChanges,
    ) -> StoreResult<Option<User>> {
        if Self::find_by_id(store, id).await?.is_none() {
            return Ok(None);
        }
        if !changes.is_empty() {
            store.update(COLLECTION, id, to_fields(changes)?).await?;
        }
        Self::find_by_id(store, id).await
    }

    pub async fn delete(store: &dyn DocumentStore, id: &str) -> StoreResult<()> {
        store.delete(COLLECTION, id).await
    }

    /// Write `user` back under its original id, e.g. after a failed delete.
    pub async fn restore(store: &dyn DocumentStore, user: &User) -> StoreResult<()> {
        let record = UserRecord {
            uid: &user.uid,
            display_name: &user.display_name,
            email: &user.email,
            created_at: user.created_at,
        };
        store.set(COLLECTION, &user.id, to_fields(&record)?).await
    }
}
