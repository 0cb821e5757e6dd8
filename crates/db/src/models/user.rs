//! User document model and request schemas.

use dissio_core::error::ValidationError;
use dissio_core::types::{DocId, Timestamp};
use dissio_core::validation::{Field, Schema};
use serde::{Deserialize, Serialize};

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// A document from the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DocId,
    /// Identity-provider account backing this user.
    pub uid: String,
    pub display_name: String,
    pub email: String,
    pub created_at: Timestamp,
}

/// Body of `POST /users`. Every field is optional so the schema, not the
/// JSON decoder, reports what is missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A validated sign-up request.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

impl Schema for CreateUser {
    type Output = NewUser;

    fn validate(self) -> Result<NewUser, ValidationError> {
        let display_name = Field::new("displayName", self.display_name)
            .required("Display Name is required")
            .into_required()?;
        let email = Field::new("email", self.email)
            .email("Must be a valid email")
            .required("Email is required")
            .into_required()?;
        let password = Field::new("password", self.password)
            .required("Password is required")
            .min_length(
                MIN_PASSWORD_LENGTH,
                "Password must be at least 6 characters",
            )
            .into_required()?;

        Ok(NewUser {
            display_name,
            email,
            password,
        })
    }
}

/// Body of `PUT /users/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Validated changes to a user. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.email.is_none()
    }
}

impl Schema for UpdateUser {
    type Output = UserChanges;

    fn validate(self) -> Result<UserChanges, ValidationError> {
        let display_name = Field::new("displayName", self.display_name)
            .not_blank("Display Name cannot be empty")
            .into_optional()?;
        let email = Field::new("email", self.email)
            .email("Must be a valid email")
            .into_optional()?;

        Ok(UserChanges {
            display_name,
            email,
        })
    }
}
