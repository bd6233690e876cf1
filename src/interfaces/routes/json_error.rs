use actix_web::web;

use crate::{constants::MAX_POST_BODY_BYTES, errors::AppError};

/// Bodies are decoded as JSON whatever their content type; any decode
/// failure becomes a plain-text 400.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(MAX_POST_BODY_BYTES)
            .content_type_required(false)
            .error_handler(|err, req| {
                tracing::warn!(path = %req.path(), error = %err, "Rejected malformed JSON body");
                AppError::from(err).into()
            }),
    );
}
