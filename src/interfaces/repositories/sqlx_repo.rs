use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SqlxPostRepo {
    pub pool: SqlitePool,
}
