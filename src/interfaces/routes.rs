use actix_web::web;

use crate::handlers::frontend;

mod json_error;
mod posts;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(json_error::config_routes);

    cfg.service(
        web::scope("/api")
            .configure(posts::config_routes)
    );

    cfg.default_service(web::to(frontend::index));
}
