/// Header carrying the shared publish secret.
pub const PUBLISH_KEY_HEADER: &str = "X-MALT-KEY";

/// Largest JSON body accepted on publish and update.
pub const MAX_POST_BODY_BYTES: usize = 4 * 1024 * 1024;

pub const POST_NOT_FOUND: &str = "Post not found";
