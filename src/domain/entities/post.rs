use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::slug::normalize_slug;

// ───── Database Models ───────────────────────────────────────────────

/// A post as stored, content included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub published_at: DateTime<Utc>,
}

/// The list view of a post. Has no content field at all, so it can never leak
/// into list responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
}

/// A fully resolved row ready for the upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct PostInsert {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub published_at: DateTime<Utc>,
}

// ───── Input Requests ───────────────────────────────────────────────

/// Body of `POST /api/publish`. Missing or null fields decode as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishPostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
}

/// Body of `PUT /api/posts/{slug}`. The slug always comes from the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePostRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
}

// Explicit `null` reads the same as an absent field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedResponse {
    pub status: String,
    pub link: String,
}

impl PublishedResponse {
    pub fn new(slug: &str) -> Self {
        PublishedResponse {
            status: "published".to_string(),
            link: format!("/post/{}", slug),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostStatusResponse {
    pub status: String,
    pub slug: String,
}

impl PostStatusResponse {
    pub fn updated(slug: &str) -> Self {
        PostStatusResponse {
            status: "updated".to_string(),
            slug: slug.to_string(),
        }
    }

    pub fn deleted(slug: &str) -> Self {
        PostStatusResponse {
            status: "deleted".to_string(),
            slug: slug.to_string(),
        }
    }
}

// ───── Conversions ──────────────────────────────────────────────────

impl PublishPostRequest {
    /// Resolves the slug (explicit one wins, otherwise derived from the title)
    /// and stamps the publish time.
    pub fn into_insert(self, published_at: DateTime<Utc>) -> PostInsert {
        let slug = match self.slug {
            Some(slug) if !slug.is_empty() => slug,
            _ => normalize_slug(&self.title),
        };

        PostInsert {
            slug,
            title: self.title,
            description: self.description,
            content: self.content,
            published_at,
        }
    }
}

impl From<PublishPostRequest> for PostInsert {
    fn from(request: PublishPostRequest) -> Self {
        request.into_insert(Utc::now())
    }
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        PostSummary {
            slug: post.slug,
            title: post.title,
            description: post.description,
            published_at: post.published_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn explicit_slug_is_kept_verbatim() {
        let request = PublishPostRequest {
            slug: Some("My-Custom_Slug".into()),
            title: "Whatever Title".into(),
            ..Default::default()
        };

        assert_eq!(request.into_insert(at()).slug, "My-Custom_Slug");
    }

    #[test]
    fn missing_or_empty_slug_is_derived_from_title() {
        let missing = PublishPostRequest {
            title: "Hello, World! 2024".into(),
            ..Default::default()
        };
        let empty = PublishPostRequest {
            slug: Some(String::new()),
            title: "Hello, World! 2024".into(),
            ..Default::default()
        };

        assert_eq!(missing.into_insert(at()).slug, "hello-world-2024");
        assert_eq!(empty.into_insert(at()).slug, "hello-world-2024");
    }

    #[test]
    fn publish_body_tolerates_missing_and_unknown_fields() {
        let request: PublishPostRequest =
            serde_json::from_str(r#"{"title":"Only a title","published_at":"1999-01-01T00:00:00Z"}"#)
                .unwrap();

        assert_eq!(request.slug, None);
        assert_eq!(request.title, "Only a title");
        assert_eq!(request.description, "");
        assert_eq!(request.content, "");
    }

    #[test]
    fn null_fields_decode_as_empty_strings() {
        let publish: PublishPostRequest =
            serde_json::from_str(r#"{"title":"x","description":null,"content":null,"slug":null}"#).unwrap();
        let update: UpdatePostRequest =
            serde_json::from_str(r#"{"title":null,"description":"d","content":null}"#).unwrap();

        assert_eq!(publish.title, "x");
        assert_eq!(publish.description, "");
        assert_eq!(publish.content, "");
        assert_eq!(publish.slug, None);
        assert_eq!(update.title, "");
        assert_eq!(update.description, "d");
    }

    #[test]
    fn summary_serializes_without_content() {
        let post = Post {
            slug: "a".into(),
            title: "A".into(),
            description: "first".into(),
            content: "body".into(),
            published_at: at(),
        };

        let json = serde_json::to_value(PostSummary::from(post)).unwrap();

        assert!(json.get("content").is_none());
        assert_eq!(json["slug"], "a");
        assert_eq!(json["published_at"], "2024-03-01T12:00:00Z");
    }

    #[test]
    fn responses_have_expected_shape() {
        assert_eq!(
            serde_json::to_value(PublishedResponse::new("hello-world")).unwrap(),
            serde_json::json!({"status": "published", "link": "/post/hello-world"})
        );
        assert_eq!(
            serde_json::to_value(PostStatusResponse::deleted("x")).unwrap(),
            serde_json::json!({"status": "deleted", "slug": "x"})
        );
    }
}
