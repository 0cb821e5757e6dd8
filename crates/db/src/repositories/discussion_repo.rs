//! Repository for the `discussions` collection and its `replies`
//! sub-collections.

use chrono::Utc;
use dissio_core::pagination::PageRequest;
use dissio_core::types::Timestamp;
use serde::Serialize;

use crate::models::discussion::{Discussion, NewDiscussion, NewReply, Reply};
use crate::store::{to_fields, Direction, Document, DocumentStore, Query, StoreResult};

pub const COLLECTION: &str = "discussions";

/// Path of the replies sub-collection of one discussion.
pub fn replies_collection(discussion_id: &str) -> String {
    format!("{COLLECTION}/{discussion_id}/replies")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stamped<'a, T: Serialize> {
    #[serde(flatten)]
    input: &'a T,
    created_at: Timestamp,
}

pub struct DiscussionRepo;

impl DiscussionRepo {
    pub async fn create(
        store: &dyn DocumentStore,
        input: &NewDiscussion,
    ) -> StoreResult<Discussion> {
        let created_at = Utc::now();
        let fields = to_fields(&Stamped { input, created_at })?;
        let id = store.add(COLLECTION, fields).await?;

        Ok(Discussion {
            id,
            title: input.title.clone(),
            content: input.content.clone(),
            author_id: input.author_id.clone(),
            created_at,
        })
    }

    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> StoreResult<Option<Discussion>> {
        store
            .get(COLLECTION, id)
            .await?
            .map(Document::decode)
            .transpose()
    }

    /// One page of discussions, newest first, plus the total count.
    pub async fn list(
        store: &dyn DocumentStore,
        page: &PageRequest,
    ) -> StoreResult<(Vec<Discussion>, u64)> {
        let query = Query::new()
            .order_by("createdAt", Direction::Desc)
            .offset(page.offset())
            .limit(page.limit as usize);
        let discussions = store
            .query(COLLECTION, &query)
            .await?
            .into_iter()
            .map(Document::decode)
            .collect::<StoreResult<Vec<Discussion>>>()?;
        let total = store.count(COLLECTION, &[]).await?;
        Ok((discussions, total))
    }

    /// Add a reply under `discussion_id`. The caller checks that the
    /// discussion exists.
    pub async fn add_reply(
        store: &dyn DocumentStore,
        discussion_id: &str,
        input: &NewReply,
    ) -> StoreResult<Reply> {
        let created_at = Utc::now();
        let fields = to_fields(&Stamped { input, created_at })?;
        let id = store.add(&replies_collection(discussion_id), fields).await?;

        Ok(Reply {
            id,
            content: input.content.clone(),
            author_id: input.author_id.clone(),
            created_at,
        })
    }

    /// All replies of a discussion, oldest first.
    pub async fn list_replies(
        store: &dyn DocumentStore,
        discussion_id: &str,
    ) -> StoreResult<Vec<Reply>> {
        let query = Query::new().order_by("createdAt", Direction::Asc);
        store
            .query(&replies_collection(discussion_id), &query)
            .await?
            .into_iter()
            .map(Document::decode)
            .collect()
    }
}
