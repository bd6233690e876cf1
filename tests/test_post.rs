use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;

/// A post written straight to the table, bypassing the API, so tests can pin
/// `published_at`.
#[derive(Debug, Clone)]
pub struct TestPost {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub published_at: DateTime<Utc>,
}

impl TestPost {
    pub fn new(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            title: format!("Title of {}", slug),
            description: format!("Description of {}", slug),
            content: format!("<p>Content of {}</p>", slug),
            published_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            slug,
        }
    }

    #[allow(dead_code)]
    pub fn published_on(mut self, year: i32, month: u32, day: u32) -> Self {
        self.published_at = Utc.with_ymd_and_hms(year, month, day, 9, 30, 0).unwrap();
        self
    }
}

#[allow(dead_code)]
pub async fn insert_test_post(pool: &SqlitePool, post: TestPost) -> TestPost {
    sqlx::query(
        "INSERT INTO posts (slug, title, description, content, published_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&post.slug)
    .bind(&post.title)
    .bind(&post.description)
    .bind(&post.content)
    .bind(post.published_at)
    .execute(pool)
    .await
    .expect("Failed to insert test post");

    post
}
