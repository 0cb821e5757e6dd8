//! Discussion and reply document models and request schemas.

use dissio_core::error::ValidationError;
use dissio_core::types::{DocId, Timestamp};
use dissio_core::validation::{Field, Schema};
use serde::{Deserialize, Serialize};

/// A document from the `discussions` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: DocId,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub created_at: Timestamp,
}

/// A document from a discussion's `replies` sub-collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: DocId,
    pub content: String,
    pub author_id: String,
    pub created_at: Timestamp,
}

/// Body of `POST /discussions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscussion {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiscussion {
    pub title: String,
    pub content: String,
    pub author_id: String,
}

impl Schema for CreateDiscussion {
    type Output = NewDiscussion;

    fn validate(self) -> Result<NewDiscussion, ValidationError> {
        Ok(NewDiscussion {
            title: Field::new("title", self.title)
                .required("Title is required")
                .into_required()?,
            content: Field::new("content", self.content)
                .required("Content is required")
                .into_required()?,
            author_id: Field::new("authorId", self.author_id)
                .required("Author ID is required")
                .into_required()?,
        })
    }
}

/// Body of `POST /discussions/{discussionId}/replies`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReply {
    pub content: Option<String>,
    pub author_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReply {
    pub content: String,
    pub author_id: String,
}

impl Schema for CreateReply {
    type Output = NewReply;

    fn validate(self) -> Result<NewReply, ValidationError> {
        Ok(NewReply {
            content: Field::new("content", self.content)
                .required("Content is required")
                .into_required()?,
            author_id: Field::new("authorId", self.author_id)
                .required("Author ID is required")
                .into_required()?,
        })
    }
}
