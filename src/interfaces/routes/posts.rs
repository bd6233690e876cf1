use actix_web::web;

use crate::handlers::{frontend, posts};

// Unsupported methods on API paths fall through to the frontend like any
// other unknown route instead of answering 405.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/posts")
            .route(web::get().to(posts::list_posts))
            .default_service(web::to(frontend::index))
    )
    .service(
        web::resource("/posts/{slug}")
            .route(web::get().to(posts::get_post))
            .route(web::put().to(posts::update_post))
            .route(web::delete().to(posts::delete_post))
            .default_service(web::to(frontend::index))
    )
    .service(
        web::resource("/publish")
            .route(web::post().to(posts::publish_post))
            .default_service(web::to(frontend::index))
    );
}
