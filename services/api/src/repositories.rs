//! Repositories for database operations
//!
//! Handlers only see the traits below, so the PostgreSQL adapters can be
//! swapped for in-memory ones in tests.

use async_trait::async_trait;
use common::error::StoreResult;
use uuid::Uuid;

use crate::models::{Idea, IdeaDraft, NewUser, User};

pub mod idea;
#[cfg(test)]
pub mod memory;
pub mod user;

pub use idea::PgIdeaRepository;
pub use user::PgUserRepository;

/// Storage for idea records
#[async_trait]
pub trait IdeaRepository: Send + Sync {
    /// All ideas, newest first, truncated to `limit` when given
    async fn list(&self, limit: Option<i64>) -> StoreResult<Vec<Idea>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Idea>>;

    async fn create(&self, draft: &IdeaDraft) -> StoreResult<Idea>;

    /// Replace title, summary, description and tags; `None` when no record matched
    async fn update(&self, id: Uuid, draft: &IdeaDraft) -> StoreResult<Option<Idea>>;

    /// Returns whether a record was deleted
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

/// Storage for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Validate, hash the password and insert
    async fn create(&self, new_user: &NewUser) -> StoreResult<User>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
}
