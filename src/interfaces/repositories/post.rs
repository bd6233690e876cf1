use async_trait::async_trait;
use sqlx::{self, FromRow, Row, SqlitePool};

use crate::{
    entities::post::{Post, PostInsert, PostSummary, UpdatePostRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxPostRepo,
};

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest first, without content. Undecodable rows are skipped.
    async fn list_post_summaries(&self) -> Result<Vec<PostSummary>, AppError>;
    async fn get_post_by_slug(&self, slug: &str) -> Result<Post, AppError>;
    /// Inserts, or overwrites title/description/content of an existing slug.
    /// Returns the slug that was written.
    async fn upsert_post(&self, post: &PostInsert) -> Result<String, AppError>;
    async fn update_post_by_slug(&self, slug: &str, post: &UpdatePostRequest) -> Result<(), AppError>;
    async fn delete_post_by_slug(&self, slug: &str) -> Result<(), AppError>;
}

impl SqlxPostRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqlxPostRepo { pool }
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepo {
    async fn list_post_summaries(&self) -> Result<Vec<PostSummary>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT slug, title, description, published_at
            FROM posts
            ORDER BY published_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut posts = Vec::with_capacity(rows.len());

        for row in &rows {
            match PostSummary::from_row(row) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    let slug: Option<String> = row.try_get("slug").ok();
                    tracing::warn!(?slug, error = %e, "Skipping post row that failed to decode");
                }
            }
        }

        Ok(posts)
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT slug, title, description, content, published_at
            FROM posts
            WHERE slug = ?
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Record not found".into()))
    }

    async fn upsert_post(&self, post: &PostInsert) -> Result<String, AppError> {
        sqlx::query(
            r#"
            INSERT INTO posts (slug, title, description, content, published_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(slug) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                content = excluded.content
            "#,
        )
        .bind(&post.slug)
        .bind(&post.title)
        .bind(&post.description)
        .bind(&post.content)
        .bind(post.published_at)
        .execute(&self.pool)
        .await?;

        Ok(post.slug.clone())
    }

    async fn update_post_by_slug(&self, slug: &str, post: &UpdatePostRequest) -> Result<(), AppError> {
        // slug and published_at stay untouched so permalinks and ordering hold
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = ?, description = ?, content = ?
            WHERE slug = ?
            "#,
        )
        .bind(&post.title)
        .bind(&post.description)
        .bind(&post.content)
        .bind(slug)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Record not found".into()));
        }

        Ok(())
    }

    async fn delete_post_by_slug(&self, slug: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE slug = ?
            "#,
        )
        .bind(slug)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Record not found".into()));
        }

        Ok(())
    }
}
