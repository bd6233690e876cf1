pub mod extractors;
pub mod posts;
