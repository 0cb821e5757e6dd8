pub mod auth;
pub mod discussions;
pub mod users;
