use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::errors::AppError;

/// Marker left in the request extensions once the publish key checked out.
///
/// Add `_publisher: Publisher` as the first parameter of a mutating handler so
/// it rejects with 401 before the body is read, even if the middleware is
/// missing from the app.
#[derive(Debug, Clone, Copy)]
pub struct Publisher;

impl FromRequest for Publisher {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Publisher>() {
            Some(publisher) => ready(Ok(*publisher)),
            None => ready(Err(AppError::Unauthorized.into())),
        }
    }
}
