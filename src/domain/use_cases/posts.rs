use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    constants::POST_NOT_FOUND,
    entities::post::{Post, PostStatusResponse, PostSummary, PublishPostRequest, PublishedResponse, UpdatePostRequest},
    errors::AppError,
    repositories::post::PostRepository,
};

pub struct PostHandler<R>
where
    R: PostRepository,
{
    pub post_repo: R,
}

impl<R> PostHandler<R>
where
    R: PostRepository,
{
    pub fn new(post_repo: R) -> Self {
        PostHandler { post_repo }
    }

    /// Lists every post, newest first, without content
    pub async fn list_posts(&self) -> Result<Vec<PostSummary>, AppError> {
        self.post_repo.list_post_summaries().await
    }

    /// Retrieves a full post by its slug
    pub async fn get_post(&self, slug: &str) -> Result<Post, AppError> {
        self.post_repo
            .get_post_by_slug(slug)
            .await
            .map_err(post_not_found)
    }

    /// Publishes a post stamped with the current time
    pub async fn publish_post(&self, request: PublishPostRequest) -> Result<PublishedResponse, AppError> {
        self.publish_post_at(request, Utc::now()).await
    }

    /// Publishes a post with an explicit timestamp. On a slug that already
    /// exists the stored timestamp wins and this one is discarded.
    pub async fn publish_post_at(
        &self,
        request: PublishPostRequest,
        published_at: DateTime<Utc>,
    ) -> Result<PublishedResponse, AppError> {
        let insert_post = request.into_insert(published_at);

        if insert_post.slug.is_empty() {
            tracing::warn!(title = %insert_post.title, "Title normalized to an empty slug");
        }

        let slug = self.post_repo.upsert_post(&insert_post).await?;
        info!(%slug, "Post published");

        Ok(PublishedResponse::new(&slug))
    }

    /// Updates title, description and content of an existing post
    pub async fn update_post(
        &self,
        slug: &str,
        request: &UpdatePostRequest,
    ) -> Result<PostStatusResponse, AppError> {
        self.post_repo
            .update_post_by_slug(slug, request)
            .await
            .map_err(post_not_found)?;

        info!(%slug, "Post updated");
        Ok(PostStatusResponse::updated(slug))
    }

    /// Deletes a post by its slug
    pub async fn delete_post(&self, slug: &str) -> Result<PostStatusResponse, AppError> {
        self.post_repo
            .delete_post_by_slug(slug)
            .await
            .map_err(post_not_found)?;

        info!(%slug, "Post deleted");
        Ok(PostStatusResponse::deleted(slug))
    }
}

fn post_not_found(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound(POST_NOT_FOUND.to_string()),
        _ => e,
    }
}
