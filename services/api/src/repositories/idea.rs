//! Idea repository for database operations

use async_trait::async_trait;
use common::error::StoreResult;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::IdeaRepository;
use crate::models::{Idea, IdeaDraft};

/// PostgreSQL-backed idea repository
#[derive(Clone)]
pub struct PgIdeaRepository {
    pool: PgPool,
}

impl PgIdeaRepository {
    /// Create a new idea repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdeaRepository for PgIdeaRepository {
    async fn list(&self, limit: Option<i64>) -> StoreResult<Vec<Idea>> {
        // LIMIT NULL means no limit in PostgreSQL.
        let ideas = sqlx::query_as::<_, Idea>(
            r#"
            SELECT id, title, summary, description, tags, created_at, updated_at
            FROM ideas
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(ideas)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Idea>> {
        let idea = sqlx::query_as::<_, Idea>(
            r#"
            SELECT id, title, summary, description, tags, created_at, updated_at
            FROM ideas
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(idea)
    }

    async fn create(&self, draft: &IdeaDraft) -> StoreResult<Idea> {
        info!("Creating new idea: {}", draft.title);

        let idea = sqlx::query_as::<_, Idea>(
            r#"
            INSERT INTO ideas (title, summary, description, tags)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, summary, description, tags, created_at, updated_at
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.summary)
        .bind(&draft.description)
        .bind(&draft.tags)
        .fetch_one(&self.pool)
        .await?;

        Ok(idea)
    }

    async fn update(&self, id: Uuid, draft: &IdeaDraft) -> StoreResult<Option<Idea>> {
        info!("Updating idea: {}", id);

        let idea = sqlx::query_as::<_, Idea>(
            r#"
            UPDATE ideas
            SET title = $2, summary = $3, description = $4, tags = $5, updated_at = now()
            WHERE id = $1
            RETURNING id, title, summary, description, tags, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.summary)
        .bind(&draft.description)
        .bind(&draft.tags)
        .fetch_optional(&self.pool)
        .await?;

        Ok(idea)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        info!("Deleting idea: {}", id);

        let result = sqlx::query("DELETE FROM ideas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
