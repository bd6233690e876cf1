pub mod post;
pub mod sqlx_repo;
