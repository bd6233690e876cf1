pub mod frontend;
pub mod posts;
