use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use malt::{
    db::sqlite::{create_pool, ensure_schema},
    entities::post::{PublishPostRequest, UpdatePostRequest},
    middlewares::auth::PublishKeyMiddleware,
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment, LogFormat},
    AppState,
};
use reqwest::Client;
use sqlx::SqlitePool;
use std::{net::TcpListener, time::Duration};

pub const TEST_KEY: &str = "test_publish_key_that_is_long_enough_123";

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
    pub client: Client,
    pub config: AppConfig,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config()).await
    }

    pub async fn spawn_with(config: AppConfig) -> Self {
        let db_pool = create_pool(&config.database_url, config.max_connections)
            .await
            .expect("Failed to create test DB pool");

        ensure_schema(&db_pool)
            .await
            .expect("Failed to create posts table");

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let state = web::Data::new(AppState::new(&config, db_pool.clone()));

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(PublishKeyMiddleware)
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(config.worker_count)
        .disable_signals()
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client.get(format!("{}/api/posts", address)).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Self {
            address,
            db_pool,
            client,
            config,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn publish(&self, post: &PublishPostRequest) -> reqwest::Response {
        self.publish_with_key(post, Some(TEST_KEY)).await
    }

    pub async fn publish_with_key(&self, post: &PublishPostRequest, key: Option<&str>) -> reqwest::Response {
        let mut request = self.client.post(self.url("/api/publish")).json(post);
        if let Some(key) = key {
            request = request.header("X-MALT-KEY", key);
        }
        request.send().await.expect("Failed to publish post")
    }

    pub async fn update(&self, slug: &str, post: &UpdatePostRequest, key: Option<&str>) -> reqwest::Response {
        let mut request = self.client.put(self.url(&format!("/api/posts/{}", slug))).json(post);
        if let Some(key) = key {
            request = request.header("X-MALT-KEY", key);
        }
        request.send().await.expect("Failed to update post")
    }

    pub async fn delete(&self, slug: &str, key: Option<&str>) -> reqwest::Response {
        let mut request = self.client.delete(self.url(&format!("/api/posts/{}", slug)));
        if let Some(key) = key {
            request = request.header("X-MALT-KEY", key);
        }
        request.send().await.expect("Failed to delete post")
    }

    pub async fn get_post(&self, slug: &str) -> reqwest::Response {
        self.client
            .get(self.url(&format!("/api/posts/{}", slug)))
            .send()
            .await
            .expect("Failed to get post")
    }

    pub async fn count_posts(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count posts")
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        database_url: "sqlite::memory:".into(),
        max_connections: 1,
        secret: TEST_KEY.into(),
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").into(),
        index_file: "index.html".into(),
        read_timeout_secs: 5,
        write_timeout_secs: 10,
        log_format: LogFormat::Pretty,
    }
}

#[allow(dead_code)]
pub fn post(title: &str, content: &str) -> PublishPostRequest {
    PublishPostRequest {
        slug: None,
        title: title.to_string(),
        description: format!("About {}", title),
        content: content.to_string(),
    }
}
