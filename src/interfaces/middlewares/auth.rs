use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error, HttpMessage, ResponseError,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{constants::PUBLISH_KEY_HEADER, errors::AppError, use_cases::extractors::Publisher, AppState};

/// Rejects mutating API calls whose `X-MALT-KEY` header does not match the
/// configured secret. Reads and the frontend fallback pass straight through.
pub struct PublishKeyMiddleware;

impl<S> Transform<S, ServiceRequest> for PublishKeyMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = PublishKeyMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(PublishKeyMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct PublishKeyMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for PublishKeyMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if !is_protected_route(req.path(), req.method()) {
                return service.call(req).await;
            }

            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                tracing::error!("AppState missing in middleware");
                let err = AppError::Internal("application state is not configured".into());
                return Ok(req.into_response(err.error_response()));
            };

            let admitted = extract_key(&req)
                .map(|key| state.publish_key.matches(key))
                .unwrap_or(false);

            if !admitted {
                tracing::warn!(
                    method = %req.method(),
                    path = %req.path(),
                    "Rejected request with missing or invalid publish key"
                );
                return Ok(req.into_response(AppError::Unauthorized.error_response()));
            }

            req.extensions_mut().insert(Publisher);
            service.call(req).await
        })
    }
}

fn is_protected_route(path: &str, method: &Method) -> bool {
    match *method {
        Method::POST => path == "/api/publish",
        Method::PUT | Method::DELETE => path
            .strip_prefix("/api/posts/")
            .is_some_and(|slug| !slug.is_empty() && !slug.contains('/')),
        _ => false,
    }
}

fn extract_key(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(PUBLISH_KEY_HEADER)
        .and_then(|header| header.to_str().ok())
}
