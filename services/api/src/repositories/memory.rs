//! In-memory repositories used by handler tests
//!
//! They enforce the same rules the PostgreSQL schema does: unique emails,
//! newest-first listing and validated users.

use async_trait::async_trait;
use chrono::Utc;
use common::error::{StoreError, StoreResult};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{IdeaRepository, UserRepository};
use crate::{
    models::{Idea, IdeaDraft, NewUser, User},
    password::hash_password,
};

/// Ideas kept in insertion order; the last entry is the newest
#[derive(Clone, Default)]
pub struct MemoryIdeaRepository {
    ideas: Arc<RwLock<Vec<Idea>>>,
}

#[async_trait]
impl IdeaRepository for MemoryIdeaRepository {
    async fn list(&self, limit: Option<i64>) -> StoreResult<Vec<Idea>> {
        let ideas = self.ideas.read().await;
        let newest_first = ideas.iter().rev().cloned();

        Ok(match limit {
            Some(limit) => newest_first.take(limit as usize).collect(),
            None => newest_first.collect(),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Idea>> {
        let ideas = self.ideas.read().await;
        Ok(ideas.iter().find(|idea| idea.id == id).cloned())
    }

    async fn create(&self, draft: &IdeaDraft) -> StoreResult<Idea> {
        let now = Utc::now();
        let idea = Idea {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            summary: draft.summary.clone(),
            description: draft.description.clone(),
            tags: draft.tags.clone(),
            created_at: now,
            updated_at: now,
        };

        self.ideas.write().await.push(idea.clone());
        Ok(idea)
    }

    async fn update(&self, id: Uuid, draft: &IdeaDraft) -> StoreResult<Option<Idea>> {
        let mut ideas = self.ideas.write().await;
        let Some(idea) = ideas.iter_mut().find(|idea| idea.id == id) else {
            return Ok(None);
        };

        idea.title = draft.title.clone();
        idea.summary = draft.summary.clone();
        idea.description = draft.description.clone();
        idea.tags = draft.tags.clone();
        idea.updated_at = Utc::now();
        Ok(Some(idea.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut ideas = self.ideas.write().await;
        let before = ideas.len();
        ideas.retain(|idea| idea.id != id);
        Ok(ideas.len() < before)
    }
}

#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: &NewUser) -> StoreResult<User> {
        new_user.validate()?;
        let password_hash = hash_password(&new_user.password)?;

        let mut users = self.users.write().await;
        if users.iter().any(|user| user.email == new_user.email) {
            return Err(StoreError::DuplicateKey(
                "Duplicate key error on users_email_key".to_string(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }
}

/// Repository whose every call fails with the given error kind
pub struct FailingIdeaRepository {
    pub error: fn() -> StoreError,
}

#[async_trait]
impl IdeaRepository for FailingIdeaRepository {
    async fn list(&self, _limit: Option<i64>) -> StoreResult<Vec<Idea>> {
        Err((self.error)())
    }

    async fn find_by_id(&self, _id: Uuid) -> StoreResult<Option<Idea>> {
        Err((self.error)())
    }

    async fn create(&self, _draft: &IdeaDraft) -> StoreResult<Idea> {
        Err((self.error)())
    }

    async fn update(&self, _id: Uuid, _draft: &IdeaDraft) -> StoreResult<Option<Idea>> {
        Err((self.error)())
    }

    async fn delete(&self, _id: Uuid) -> StoreResult<bool> {
        Err((self.error)())
    }
}
