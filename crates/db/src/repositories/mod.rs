//! Typed access to the collections the API uses.

pub mod discussion_repo;
pub mod user_repo;

pub use discussion_repo::DiscussionRepo;
pub use user_repo::UserRepo;
